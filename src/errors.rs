use thiserror::Error;

pub type AssistantResult<T> = Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Backend error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl AssistantError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn terminal_error(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
