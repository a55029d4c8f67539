//! HTTP server configuration object.

use std::net::SocketAddr;

/// Settings consumed when binding the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) workers: Option<usize>,
}

impl ServerConfig {
    /// Bind to `bind_addr` with Actix's default worker count.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            workers: None,
        }
    }

    /// Override the number of worker threads when `workers` is set.
    #[must_use]
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }
}
