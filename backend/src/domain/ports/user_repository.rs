//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// A user with the same email already exists.
        Duplicate => "user with this email already exists",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read/write access to user records.
///
/// Absence is reported as `Ok(None)`, never as an error, so the caller can
/// decide how "not found" is presented.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the store-assigned id.
    ///
    /// Returns [`UserRepositoryError::Duplicate`] when `email` is taken.
    async fn save_user(
        &self,
        email: &str,
        pass_hash: &PasswordHash,
    ) -> Result<UserId, UserRepositoryError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Read the admin flag for `id`.
    async fn is_admin(&self, id: UserId) -> Result<Option<bool>, UserRepositoryError>;
}
