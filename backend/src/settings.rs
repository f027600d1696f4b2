//! Server configuration loaded via OrthoConfig.
//!
//! Every value can be set on the command line (`--port 8080`) or through the
//! environment (`EVALUATIONS_PORT=8080`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DATABASE_PATH: &str = "evaluations.db";
const DEFAULT_STATIC_DIR: &str = "public";

/// Configuration values for the evaluations server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVALUATIONS")]
pub struct ServerSettings {
    /// TCP port the HTTP listener binds to.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Interface address to bind; all interfaces when unset.
    pub host: Option<IpAddr>,
    /// SQLite file holding the evaluations table.
    pub database_path: Option<PathBuf>,
    /// Directory of front-end assets served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Return the configured database path, falling back to `evaluations.db`.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Return the configured asset directory, falling back to `public`.
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }
}
