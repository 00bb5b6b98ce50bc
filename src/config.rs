//! Configuration for Notula

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Runtime configuration, supplied through the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_path: PathBuf,

    /// HTTP server port
    pub http_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(default_db_path()),
            http_port: default_http_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `NOTULA_DB`: database file path (default: `notes.db`)
    /// - `PORT`: server port (default: 3000)
    pub fn from_env() -> Result<Self> {
        let db_path = env::var("NOTULA_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(default_db_path()));

        let http_port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT value: {}", raw)))?,
            Err(_) => default_http_port(),
        };

        Ok(Self { db_path, http_port })
    }
}

// Default value functions

fn default_db_path() -> String {
    "notes.db".to_string()
}

fn default_http_port() -> u16 {
    3000
}
