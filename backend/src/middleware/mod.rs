//! Request and service middleware.
//!
//! Purpose: define cross-cutting wrappers for request lifecycle concerns
//! (trace correlation) and for the authentication port (structured logging).

pub mod logged_authenticator;
pub mod trace;

pub use logged_authenticator::LoggedAuthenticator;
pub use trace::Trace;
