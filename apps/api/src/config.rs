use std::path::PathBuf;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
/// Every variable has a default, only malformed values fail.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `tfidf_vectorizer.json`, `job_classifier.json`, `job_categories.json`.
    pub model_dir: PathBuf,
    /// NLTK-style data root containing `corpora/stopwords` and `corpora/wordnet`.
    pub nltk_data: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_dir: env_or("MODEL_DIR", "model").into(),
            nltk_data: env_or("NLTK_DATA", "nltk_data").into(),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
