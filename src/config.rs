//! Runtime configuration loaded from the environment.
//!
//! All settings come from environment variables, read once at startup. A
//! `.env` file in the working directory is loaded first when present.

use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Credential value shipped in development setups; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "default-key-for-development";

/// Server configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Environment label echoed in API responses.
    pub environment: String,
    /// Gemini API key, if a usable one is configured.
    pub gemini_api_key: Option<String>,
    /// Gemini model name used for generation.
    pub gemini_model: String,
}

impl Config {
    /// Loads configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let gemini_api_key = normalize_api_key(env::var("GEMINI_API_KEY").ok());

        let gemini_model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());

        Ok(Self {
            port,
            environment,
            gemini_api_key,
            gemini_model,
        })
    }

    /// Whether a usable Gemini credential is configured.
    pub fn api_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Filters out unset, blank, and placeholder credentials.
fn normalize_api_key(raw: Option<String>) -> Option<String> {
    let key = raw?;
    let key = key.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return None;
    }
    Some(key.to_string())
}
