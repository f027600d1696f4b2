//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use evaluations::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) static_dir: PathBuf,
}

impl ServerConfig {
    /// Construct a server configuration around an opened database pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            static_dir: PathBuf::from("public"),
        }
    }

    /// Serve front-end assets from `static_dir`.
    #[must_use]
    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = static_dir.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
