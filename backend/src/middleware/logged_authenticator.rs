//! Structured logging around the [`Authenticator`] port.
//!
//! [`LoggedAuthenticator`] decorates any authenticator and records one span
//! per call plus attempt/outcome events. Credential failures log at WARN,
//! internal failures at ERROR with their cause. Passwords, hashes, secrets
//! and tokens are never recorded.

use async_trait::async_trait;
use tracing::{Span, error, info, instrument, warn};

use crate::domain::ports::Authenticator;
use crate::domain::{
    AccessToken, AppId, Credentials, Error, ErrorCode, OP_IS_ADMIN, OP_LOGIN,
    OP_REGISTER_NEW_USER, TraceId, UserId,
};

fn record_trace_id() {
    if let Some(trace_id) = TraceId::current() {
        Span::current().record("trace_id", tracing::field::display(trace_id));
    }
}

fn log_failure(err: &Error) {
    match err.code() {
        ErrorCode::InternalError => error!(
            code = ?err.code(),
            cause = err.cause().unwrap_or("unknown"),
            "operation failed"
        ),
        code => warn!(code = ?code, message = err.message(), "operation rejected"),
    }
}

/// Authenticator decorator emitting `tracing` spans and events.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use mockable::DefaultClock;
/// use sso::domain::{AuthService, BcryptPasswordHasher, TokenIssuer};
/// use sso::middleware::LoggedAuthenticator;
/// use sso::outbound::memory::{InMemoryAppRepository, InMemoryUserRepository};
///
/// let service = AuthService::new(
///     Arc::new(InMemoryUserRepository::default()),
///     Arc::new(InMemoryAppRepository::default()),
///     Arc::new(BcryptPasswordHasher::default()),
///     TokenIssuer::new(Arc::new(DefaultClock)),
///     Duration::from_secs(3600),
/// );
/// let _logged = LoggedAuthenticator::new(service);
/// ```
#[derive(Debug, Clone)]
pub struct LoggedAuthenticator<S> {
    inner: S,
}

impl<S> LoggedAuthenticator<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped authenticator.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S> Authenticator for LoggedAuthenticator<S>
where
    S: Authenticator,
{
    #[instrument(
        name = "auth",
        skip(self, credentials),
        fields(
            op = OP_LOGIN,
            email = %credentials.email(),
            app_id = %app_id,
            trace_id = tracing::field::Empty
        )
    )]
    async fn login(
        &self,
        credentials: &Credentials,
        app_id: AppId,
    ) -> Result<AccessToken, Error> {
        record_trace_id();
        info!("attempting to login user");
        let result = self.inner.login(credentials, app_id).await;
        match &result {
            Ok(_) => info!("user logged in successfully"),
            Err(err) => log_failure(err),
        }
        result
    }

    #[instrument(
        name = "auth",
        skip(self, credentials),
        fields(
            op = OP_REGISTER_NEW_USER,
            email = %credentials.email(),
            trace_id = tracing::field::Empty
        )
    )]
    async fn register_new_user(&self, credentials: &Credentials) -> Result<UserId, Error> {
        record_trace_id();
        info!("registering user");
        let result = self.inner.register_new_user(credentials).await;
        match &result {
            Ok(user_id) => info!(user_id = %user_id, "user registered"),
            Err(err) => log_failure(err),
        }
        result
    }

    #[instrument(
        name = "auth",
        skip(self),
        fields(
            op = OP_IS_ADMIN,
            user_id = %user_id,
            trace_id = tracing::field::Empty
        )
    )]
    async fn is_admin(&self, user_id: UserId) -> Result<bool, Error> {
        record_trace_id();
        info!("checking if user is admin");
        let result = self.inner.is_admin(user_id).await;
        match &result {
            Ok(is_admin) => info!(is_admin, "checked if user is admin"),
            Err(err) => log_failure(err),
        }
        result
    }
}
