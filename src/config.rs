use crate::constants::{DEFAULT_BACKEND_URL, DEFAULT_GREETING, ENV_BACKEND_URL, ENV_LOG_LEVEL};
use crate::errors::{AssistantError, AssistantResult};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    /// Unset means requests never time out.
    pub request_timeout_secs: Option<u64>,
    pub greeting: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: None,
            greeting: DEFAULT_GREETING.to_string(),
            log_level: "info".to_string(),
            log_dir: env::temp_dir(),
        }
    }
}

/// Loads the configuration from `~/.config/car-assistant/config.json`, falling
/// back to defaults when the file is absent, then applies environment overrides.
pub fn load_config() -> AssistantResult<Config> {
    // A missing .env is fine.
    dotenv::dotenv().ok();

    let config_path = get_config_path()?;
    let config = if config_path.exists() {
        load_config_from(&config_path)?
    } else {
        Config::default()
    };

    let config = apply_overrides(config, |key| env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

pub fn load_config_from(path: &Path) -> AssistantResult<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        AssistantError::config_error(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&config_str)
        .map_err(|e| AssistantError::config_error(format!("Failed to parse config: {}", e)))
}

fn get_config_path() -> AssistantResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AssistantError::config_error("Could not determine home directory"))?;

    Ok(home_dir
        .join(".config")
        .join("car-assistant")
        .join("config.json"))
}

pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
        config.backend_url = url.trim().to_string();
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    config
}

pub fn validate_config(config: &Config) -> AssistantResult<()> {
    let url = config.backend_url.trim();
    if url.is_empty() {
        return Err(AssistantError::config_error("backend_url is required"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AssistantError::config_error(format!(
            "backend_url must be an http(s) URL, got {}",
            url
        )));
    }

    if config.greeting.trim().is_empty() {
        return Err(AssistantError::config_error("greeting must not be empty"));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(AssistantError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_url() {
        let mut config = Config::default();
        config.backend_url = "   ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_scheme() {
        let mut config = Config::default();
        config.backend_url = "ftp://example.com/process-command".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "backend_url": "http://localhost:8000/process-command", "request_timeout_secs": 30 }}"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000/process-command");
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_config_from_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, AssistantError::Config(_)));
    }

    #[test]
    fn test_env_overrides_backend_url() {
        let config = apply_overrides(Config::default(), |key| match key {
            ENV_BACKEND_URL => Some(" http://127.0.0.1:9000/cmd ".to_string()),
            _ => None,
        });
        assert_eq!(config.backend_url, "http://127.0.0.1:9000/cmd");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let config = apply_overrides(Config::default(), |_| Some(String::new()));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }
}
