//! Server configuration read from the environment.
//!
//! An optional `.env` file is loaded first (see `Config::from_env`), then
//! every setting falls back to a default when its variable is unset. A set
//! but malformed value is a startup error rather than a silent default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "dashboards.sqlite";
const DEFAULT_JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_URL_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JOB_RETENTION_SECS: u64 = 600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Maximum accepted JSON body.
    pub json_limit_bytes: usize,
    /// Maximum accepted upload file.
    pub upload_limit_bytes: usize,
    pub open_browser: bool,
    pub url_fetch_timeout: Duration,
    /// How long finished job statuses stay pollable.
    pub job_retention: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Config {
            host: lookup("DASHBOARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed(&lookup, "DASHBOARD_PORT", DEFAULT_PORT, "a port number")?,
            db_path: lookup("DASHBOARD_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            json_limit_bytes: parsed(
                &lookup,
                "DASHBOARD_JSON_LIMIT_BYTES",
                DEFAULT_JSON_LIMIT_BYTES,
                "a byte count",
            )?,
            upload_limit_bytes: parsed(
                &lookup,
                "DASHBOARD_UPLOAD_LIMIT_BYTES",
                DEFAULT_UPLOAD_LIMIT_BYTES,
                "a byte count",
            )?,
            open_browser: flag(&lookup, "DASHBOARD_OPEN_BROWSER", true)?,
            url_fetch_timeout: Duration::from_secs(parsed(
                &lookup,
                "DASHBOARD_URL_FETCH_TIMEOUT_SECS",
                DEFAULT_URL_FETCH_TIMEOUT_SECS,
                "a number of seconds",
            )?),
            job_retention: Duration::from_secs(parsed(
                &lookup,
                "DASHBOARD_JOB_RETENTION_SECS",
                DEFAULT_JOB_RETENTION_SECS,
                "a number of seconds",
            )?),
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "a boolean",
            value,
        }),
    }
}
