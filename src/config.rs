//! Application configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read once at startup, after `.env` has been loaded. Missing Supabase values
//! default to empty strings so the backend wrapper can degrade to its
//! unconfigured variant instead of aborting startup.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUPABASE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_timeout_secs: u64,
    pub port: u16,
    /// Built frontend served as the router fallback.
    pub static_dir: Option<PathBuf>,
    /// Tables the image endpoint may read. `None` permits any valid identifier.
    pub image_tables: Option<Vec<String>>,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// - `SUPABASE_URL` / `VITE_SUPABASE_URL`: project base URL (default empty)
    /// - `SUPABASE_ANON_KEY` / `VITE_SUPABASE_ANON_KEY`: anonymous key (default empty)
    /// - `SUPABASE_TIMEOUT_SECS`: outbound request timeout, default 30
    /// - `PORT`: listen port, default 3000
    /// - `STATIC_DIR`: optional frontend build directory
    /// - `IMAGE_TABLES`: optional comma-separated table allowlist
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            supabase_url: env_with_fallback("SUPABASE_URL", "VITE_SUPABASE_URL"),
            supabase_anon_key: env_with_fallback("SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"),
            supabase_timeout_secs: env_parse("SUPABASE_TIMEOUT_SECS", DEFAULT_SUPABASE_TIMEOUT_SECS),
            port,
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            image_tables: std::env::var("IMAGE_TABLES")
                .ok()
                .map(|raw| parse_table_list(&raw))
                .filter(|tables| !tables.is_empty()),
        })
    }
}

fn env_with_fallback(primary: &str, fallback: &str) -> String {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .unwrap_or_default()
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_table_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
