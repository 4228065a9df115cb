use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, MAX_ATTEMPTS};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    /// 1 = single round trip, no retries.
    pub llm_max_attempts: u32,
    pub resume_path: PathBuf,
    pub cors_allow_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            llm_max_attempts: parse_max_attempts(std::env::var("LLM_MAX_ATTEMPTS").ok())?,
            resume_path: std::env::var("RESUME_PATH")
                .unwrap_or_else(|_| "content/resume.md".to_string())
                .into(),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_max_attempts(raw: Option<String>) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    let attempts = raw
        .trim()
        .parse::<u32>()
        .context("LLM_MAX_ATTEMPTS must be a positive integer")?;
    ensure!(
        (1..=MAX_ATTEMPTS).contains(&attempts),
        "LLM_MAX_ATTEMPTS must be between 1 and {MAX_ATTEMPTS}, got {attempts}"
    );
    Ok(attempts)
}
