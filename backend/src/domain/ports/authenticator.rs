//! Driving port for the authentication use-cases.
//!
//! Inbound adapters call this port without knowing which stores, hasher or
//! decorators sit behind it. HTTP handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{AccessToken, AppId, Credentials, Error, UserId};

/// Domain use-case port for login, registration and privilege checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify `credentials` and issue a token bound to `app_id`.
    async fn login(&self, credentials: &Credentials, app_id: AppId)
    -> Result<AccessToken, Error>;

    /// Create a user and return its id.
    async fn register_new_user(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Report whether `user_id` holds the admin flag.
    async fn is_admin(&self, user_id: UserId) -> Result<bool, Error>;
}
