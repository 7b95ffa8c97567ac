//! Domain primitives, ports and the authentication service.
//!
//! Purpose: define the strongly typed entities and the credential-issuance
//! logic. Nothing in this module performs I/O directly; stores are reached
//! through the traits in [`ports`].
//!
//! Public surface:
//! - [`Error`]: caller-facing error payload.
//! - [`ErrorCode`]: stable error identifier.
//! - [`AuthService`]: implementation of the [`ports::Authenticator`] port.

pub mod error;
pub mod ports;

mod app;
mod auth;
mod auth_service;
mod password;
mod token;
mod trace_id;
mod user;

pub use self::app::{App, AppId, AppSecret};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::auth_service::{AuthService, OP_IS_ADMIN, OP_LOGIN, OP_REGISTER_NEW_USER};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{
    BcryptPasswordHasher, DEFAULT_BCRYPT_COST, HashError, MAX_BCRYPT_COST, MIN_BCRYPT_COST,
    PasswordHash, PasswordHasher,
};
pub use self::token::{AccessToken, TokenClaims, TokenError, TokenIssuer};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId};

/// Convenient result alias for driving-port calls.
///
/// # Examples
/// ```
/// use sso::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<bool> {
///     Err(Error::invalid_credentials())
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
