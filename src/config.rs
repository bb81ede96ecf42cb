// src/config.rs
use crate::error::ConfigError;
use dotenv::dotenv;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` (if any) and reads the `DROPDASH_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("DROPDASH_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "DROPDASH_API_URL",
                value: api_url,
            });
        }

        let session_file = match lookup("DROPDASH_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file(lookup("HOME")),
        };

        let log_level = match lookup("DROPDASH_LOG") {
            Some(raw) => LevelFilter::from_str(raw.trim()).map_err(|_| ConfigError::Invalid {
                key: "DROPDASH_LOG",
                value: raw,
            })?,
            None => LevelFilter::Info,
        };

        let log_file = lookup("DROPDASH_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file,
            log_level,
            log_file,
        })
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".dropdash").join("session.json"),
        _ => PathBuf::from(".dropdash_session.json"),
    }
}
