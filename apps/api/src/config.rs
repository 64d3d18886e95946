use anyhow::{bail, Context, Result};

use crate::bulk::DEFAULT_BULK_CONCURRENCY;
use crate::recruitment_client::DEFAULT_TIMEOUT_MS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub recruitment_api_url: String,
    pub request_timeout_ms: u64,
    pub bulk_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
    /// `None` means permissive CORS.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::load()
    }

    fn load() -> Result<Self> {
        let recruitment_api_url = require_env("RECRUITMENT_API_URL")?
            .trim_end_matches('/')
            .to_string();
        if !recruitment_api_url.starts_with("http://") && !recruitment_api_url.starts_with("https://") {
            bail!("RECRUITMENT_API_URL must be an http(s) URL, got '{recruitment_api_url}'");
        }

        let bulk_concurrency = parse_env("BULK_CONCURRENCY", DEFAULT_BULK_CONCURRENCY)?;
        if bulk_concurrency == 0 {
            bail!("BULK_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            recruitment_api_url,
            request_timeout_ms: parse_env("RECRUITMENT_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            bulk_concurrency,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
