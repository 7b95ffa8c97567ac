//! HTTP server configuration object.

use std::net::SocketAddr;

use sso::settings::ServiceSettings;

/// Listener settings for [`super::create_server`].
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr`.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<&ServiceSettings> for ServerConfig {
    fn from(settings: &ServiceSettings) -> Self {
        Self::new(settings.bind_addr)
    }
}
