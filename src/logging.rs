// src/logging.rs

use crate::config::Config;
use crate::constants::LOG_BASENAME;
use crate::errors::AssistantResult;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// One round trip to the backend.
#[derive(Debug)]
pub struct BackendCallLog {
    pub endpoint: String,
    pub request_chars: usize,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. Dropping the returned handle flushes the log.
pub fn init_logging(config: &Config) -> AssistantResult<LoggerHandle> {
    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.clone())
                .basename(LOG_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}

pub fn format_backend_call(call: &BackendCallLog) -> String {
    let status = call
        .response_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "POST {} - {} chars - Status: {} - Time: {}ms",
        call.endpoint, call.request_chars, status, call.response_time_ms
    )
}

pub fn log_backend_call(call: &BackendCallLog) {
    log::info!("{}", format_backend_call(call));
}
