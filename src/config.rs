// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string. A missing value is reported by the
    /// connector at startup rather than aborting the process.
    pub mongo_uri: Option<String>,
    /// Database used when the connection string does not name one.
    pub mongo_db_name: Option<String>,
    pub port: u16,
    /// Root of the single-page frontend (must contain `index.html`).
    pub public_dir: PathBuf,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let mongo_uri = non_empty_var("MONGO_URI");
        let mongo_db_name = non_empty_var("MONGO_DB_NAME");

        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let public_dir = env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            mongo_uri,
            mongo_db_name,
            port,
            public_dir,
            rust_log,
            log_dir,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
