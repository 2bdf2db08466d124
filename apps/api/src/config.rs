use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Root of the public uploads tree. Stored paths are relative to its parent.
    pub uploads_dir: String,
    /// Where the active session record is persisted between runs.
    pub session_file: String,
    /// Where accessibility settings and the language code are persisted.
    pub prefs_file: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            uploads_dir: std::env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "public/uploads".to_string()),
            session_file: std::env::var("SESSION_FILE")
                .unwrap_or_else(|_| ".skillsync/session.json".to_string()),
            prefs_file: std::env::var("PREFS_FILE")
                .unwrap_or_else(|_| ".skillsync/preferences.json".to_string()),
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
