//! Configuration module for the center directory.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::DigitLocale;

/// Default interval between background pulls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the shared remote document (GET to fetch, PUT to replace)
    pub remote_url: String,
    /// Path to the SQLite file backing the local store
    pub db_path: PathBuf,
    /// Path to the SQLite file backing the blob server
    pub server_db_path: PathBuf,
    /// Address the blob server binds to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Interval between background pulls
    pub poll_interval: Duration,
    /// Digits used when rendering center numbers
    pub digits: DigitLocale,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let remote_url = env::var("CENTERS_REMOTE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/api/blobs/centers".to_string());

        let db_path = env::var("CENTERS_DB_PATH")
            .unwrap_or_else(|_| "./data/local.sqlite".to_string())
            .into();

        let server_db_path = env::var("CENTERS_SERVER_DB_PATH")
            .unwrap_or_else(|_| "./data/blobs.sqlite".to_string())
            .into();

        let bind_addr = env::var("CENTERS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid CENTERS_BIND_ADDR: {}", e)))?;

        let log_level = env::var("CENTERS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let poll_secs = match env::var("CENTERS_POLL_INTERVAL_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid CENTERS_POLL_INTERVAL_SECS: {}", e))
            })?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };
        if poll_secs == 0 {
            return Err(AppError::Config(
                "CENTERS_POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let digits = match env::var("CENTERS_DIGITS") {
            Ok(raw) => DigitLocale::parse(&raw)
                .ok_or_else(|| AppError::Config(format!("Unknown CENTERS_DIGITS: {}", raw)))?,
            Err(_) => DigitLocale::default(),
        };

        Ok(Self {
            remote_url,
            db_path,
            server_db_path,
            bind_addr,
            log_level,
            poll_interval: Duration::from_secs(poll_secs),
            digits,
        })
    }
}
