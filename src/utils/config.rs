use crate::api::config::{DEFAULT_GATEWAY_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::deploy::client::DEFAULT_DEPLOY_API_URL;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

/// Environment variable holding the gateway bearer token.
pub const API_KEY_ENV: &str = "LLM_GATEWAY_API_KEY";

/// Environment variable holding the hosting API bearer token.
pub const DEPLOY_TOKEN_ENV: &str = "NETLIFY_ACCESS_TOKEN";

const LOG_LEVELS: [&str; 5] = ["debug", "info", "warn", "error", "off"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub output_directory: String,
    pub model: String,
    pub gateway_url: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub deploy_api_url: String,
    pub deploy_token: Option<String>,
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
    pub server_address: String,
    pub file_reveal_delay_ms: u64,
    pub typing_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "off".to_string(),
            output_directory: "./astra.output".to_string(),
            model: DEFAULT_MODEL.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            deploy_api_url: DEFAULT_DEPLOY_API_URL.to_string(),
            deploy_token: None,
            poll_attempts: 30,
            poll_interval_ms: 1000,
            server_address: "127.0.0.1:3001".to_string(),
            file_reveal_delay_ms: 300,
            typing_delay_ms: 8,
        }
    }
}

impl Config {
    /// Gateway token: the environment wins over the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        from_env_or(API_KEY_ENV, &self.api_key)
    }

    /// Hosting token: the environment wins over the config file.
    pub fn resolve_deploy_token(&self) -> Option<String> {
        from_env_or(DEPLOY_TOKEN_ENV, &self.deploy_token)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn file_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.file_reveal_delay_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

fn from_env_or(var: &str, fallback: &Option<String>) -> Option<String> {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.clone())
}

pub fn get_config_path() -> PathBuf {
    let mut path = get_executable_dir();
    path.push("config.toml");
    path
}

/// Validate config to prevent obviously wrong or missing values.
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.max_tokens == 0 {
        return Err(AppError::InvalidInput(
            "Max tokens cannot be zero".to_string(),
        ));
    }
    if config.poll_attempts == 0 {
        return Err(AppError::InvalidInput(
            "Poll attempts cannot be zero".to_string(),
        ));
    }
    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(AppError::InvalidInput(format!(
            "Unknown log level: {} (expected one of {})",
            config.log_level,
            LOG_LEVELS.join(", ")
        )));
    }
    if config.server_address.parse::<SocketAddr>().is_err() {
        return Err(AppError::InvalidInput(format!(
            "Invalid server address: {}",
            config.server_address
        )));
    }
    if config.gateway_url.trim().is_empty() || config.deploy_api_url.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Gateway and deploy URLs cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Read config from file, and create a default config if none exists.
pub fn read_config() -> Result<Config, AppError> {
    read_config_from(&get_config_path())
}

pub fn read_config_from(config_path: &Path) -> Result<Config, AppError> {
    if !config_path.exists() {
        write_config_to(&Config::default(), config_path)?;
    }
    let config_str = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_str)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn write_config(config: &Config) -> Result<(), AppError> {
    write_config_to(config, &get_config_path())
}

pub fn write_config_to(config: &Config, config_path: &Path) -> Result<(), AppError> {
    let config_str = toml::to_string(config)?;
    fs::write(config_path, config_str)?;
    Ok(())
}

fn get_executable_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
