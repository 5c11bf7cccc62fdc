use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite path, or `memory` to skip the database.
    pub db_path: String,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("BOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("BOARD_PORT")
            .unwrap_or_else(|_| "3003".into())
            .parse()
            .context("BOARD_PORT must be a port number")?;
        let db_path = std::env::var("BOARD_DB_PATH").unwrap_or_else(|_| "board.db".into());
        let static_dir: PathBuf = std::env::var("BOARD_STATIC_DIR")
            .unwrap_or_else(|_| "public".into())
            .into();

        Ok(Self {
            host,
            port,
            db_path,
            static_dir,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
