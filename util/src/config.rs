//! Global application configuration.
//!
//! `AppConfig` is loaded once from `.env` and the process environment and then
//! shared as a `&'static` reference. Required values that are missing or
//! malformed surface as a [`ConfigError`] so the server can refuse to start.

use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum length of `SESSION_SECRET`, in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

pub const DEFAULT_DATABASE_PATH: &str = "data/store_ratings.db";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("SESSION_SECRET must be at least {} bytes long", MIN_SESSION_SECRET_LEN)]
    WeakSessionSecret,
}

/// Complete runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub cors_origins: Vec<String>,
}

static CONFIG_INSTANCE: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Loads `.env` (if present) and builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_else(|| "development".into());

        let port = match lookup("PORT") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u16>();
                parsed.map_err(|_| ConfigError::Invalid {
                    name: "PORT",
                    value: raw,
                })?
            }
            None => 3000,
        };

        let session_secret = lookup("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::WeakSessionSecret);
        }

        Ok(Self {
            env,
            project_name: lookup("PROJECT_NAME").unwrap_or_else(|| "store-ratings".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "api=info,services=info".into()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "api.log".into()),
            log_to_stdout: lookup("LOG_TO_STDOUT").is_some_and(|v| v == "true"),
            database_path: database_path_from(&lookup),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port,
            session_secret,
            cors_origins: parse_origins(lookup("CORS_ORIGIN").as_deref().unwrap_or("")),
        })
    }

    /// Initializes the global configuration from the environment.
    ///
    /// Subsequent calls return the already-initialized instance.
    pub fn init() -> Result<&'static AppConfig, ConfigError> {
        if let Some(config) = CONFIG_INSTANCE.get() {
            return Ok(config);
        }
        let config = Self::from_env()?;
        Ok(CONFIG_INSTANCE.get_or_init(|| config))
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Database location for tools that do not serve HTTP (migrations, seeding).
///
/// Loads `.env` like [`AppConfig::from_env`] but needs no session secret.
pub fn database_path() -> String {
    dotenvy::dotenv().ok();
    database_path_from(&|key: &str| env::var(key).ok())
}

fn database_path_from<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("DATABASE_PATH")
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_PATH.into())
}

/// Splits a comma-separated origin allow-list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
