//! Authentication service implementing the [`Authenticator`] driving port.
//!
//! Orchestrates the user and app stores, the password hasher and the token
//! issuer. The service holds only shared, immutable collaborators and keeps
//! no state between calls.
//!
//! Unknown emails and wrong passwords produce the same error value, as does an
//! unknown id passed to `is_admin`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{
    AppRepository, AppRepositoryError, Authenticator, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccessToken, AppId, Credentials, Error, PasswordHasher, TokenIssuer, UserId,
};

/// Operation name attached to login failures.
pub const OP_LOGIN: &str = "auth.login";
/// Operation name attached to registration failures.
pub const OP_REGISTER_NEW_USER: &str = "auth.register_new_user";
/// Operation name attached to admin lookup failures.
pub const OP_IS_ADMIN: &str = "auth.is_admin";

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Duplicate => Error::user_exists(),
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_app_error(error: AppRepositoryError) -> Error {
    match error {
        AppRepositoryError::Connection { message } => {
            Error::internal(format!("app repository unavailable: {message}"))
        }
        AppRepositoryError::Query { message } => {
            Error::internal(format!("app repository error: {message}"))
        }
    }
}

/// Credential-issuance service.
pub struct AuthService<U, A, H> {
    users: Arc<U>,
    apps: Arc<A>,
    hasher: Arc<H>,
    issuer: TokenIssuer,
    token_ttl: Duration,
}

impl<U, A, H> AuthService<U, A, H> {
    /// Assemble the service from its collaborators.
    pub fn new(
        users: Arc<U>,
        apps: Arc<A>,
        hasher: Arc<H>,
        issuer: TokenIssuer,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            apps,
            hasher,
            issuer,
            token_ttl,
        }
    }

    /// Lifetime given to every issued token.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl<U, A, H> AuthService<U, A, H>
where
    U: UserRepository,
    A: AppRepository,
    H: PasswordHasher + 'static,
{
    async fn try_login(
        &self,
        credentials: &Credentials,
        app_id: AppId,
    ) -> Result<AccessToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(Error::invalid_credentials)?;

        let hasher = Arc::clone(&self.hasher);
        let stored = user.pass_hash().clone();
        let candidate = credentials.password_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&stored, &candidate))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?;
        if !matches {
            return Err(Error::invalid_credentials());
        }

        let app = self
            .apps
            .find_by_id(app_id)
            .await
            .map_err(map_app_error)?
            .ok_or_else(Error::app_not_found)?;

        self.issuer
            .issue(&user, &app, self.token_ttl)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))
    }

    async fn try_register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = credentials.password_owned();
        let pass_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?;

        self.users
            .save_user(credentials.email(), &pass_hash)
            .await
            .map_err(map_user_error)
    }

    async fn try_is_admin(&self, user_id: UserId) -> Result<bool, Error> {
        self.users
            .is_admin(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(Error::invalid_credentials)
    }
}

#[async_trait]
impl<U, A, H> Authenticator for AuthService<U, A, H>
where
    U: UserRepository,
    A: AppRepository,
    H: PasswordHasher + 'static,
{
    async fn login(
        &self,
        credentials: &Credentials,
        app_id: AppId,
    ) -> Result<AccessToken, Error> {
        self.try_login(credentials, app_id)
            .await
            .map_err(|err| err.with_operation(OP_LOGIN))
    }

    async fn register_new_user(&self, credentials: &Credentials) -> Result<UserId, Error> {
        self.try_register(credentials)
            .await
            .map_err(|err| err.with_operation(OP_REGISTER_NEW_USER))
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, Error> {
        self.try_is_admin(user_id)
            .await
            .map_err(|err| err.with_operation(OP_IS_ADMIN))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
