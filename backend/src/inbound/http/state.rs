//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the authentication port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::Authenticator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication port driven by the handlers.
    pub auth: Arc<dyn Authenticator>,
}

impl HttpState {
    /// Construct state from an authenticator implementation.
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        Self { auth }
    }
}
