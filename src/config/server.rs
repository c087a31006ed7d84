use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Lifetime of a one-time sign-in code.
    pub otp_ttl_secs: u64,
    /// Lifetime of a session token issued after a successful sign-in.
    pub session_ttl_hours: i64,
    /// Echo generated sign-in codes in the `/signin` response.
    /// Only meant for local development where no delivery channel exists.
    pub expose_otp: bool,
}

impl ServerConfig {
    /// Loads a TOML config file. Missing keys fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("habitual.db")
    }

    #[must_use]
    pub fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.otp_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            otp_ttl_secs: 300,
            session_ttl_hours: 24 * 14,
            expose_otp: false,
        }
    }
}
