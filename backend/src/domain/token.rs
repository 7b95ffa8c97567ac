//! Token issuer: signs short-lived access tokens for a (user, app) pair.
//!
//! Tokens are HS256 JWTs keyed by the target app's own secret, so one app can
//! neither forge nor replay tokens meant for another. The issuer holds no key
//! material; the secret arrives with the [`App`] on every call.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::{App, AppId, User, UserId};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id.
    pub uid: i64,
    /// Subject email at issuance time.
    pub email: String,
    /// App the token is bound to.
    pub app_id: i32,
    /// Expiry as Unix seconds.
    pub exp: i64,
}

impl TokenClaims {
    /// Subject as a typed id.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.uid)
    }

    /// Bound app as a typed id.
    pub fn app_id(&self) -> AppId {
        AppId::new(self.app_id)
    }
}

/// Signed, encoded access token. Redacted from `Debug` and wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(Zeroizing::new(encoded.into()))
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl ZeroizeOnDrop for AccessToken {}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Failures raised while issuing or verifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The app has no usable signing secret.
    #[error("app {app_id} has an empty signing secret")]
    EmptySecret {
        /// App whose secret is empty.
        app_id: AppId,
    },
    /// `now + ttl` cannot be represented.
    #[error("token ttl of {ttl_secs}s overflows the expiry timestamp")]
    ExpiryOverflow {
        /// Requested ttl in seconds.
        ttl_secs: u64,
    },
    /// Encoding or signing failed.
    #[error("token signing failed: {message}")]
    Signing {
        /// Library error text.
        message: String,
    },
    /// Signature, structure or claims are invalid for this app.
    #[error("token is invalid: {message}")]
    Invalid {
        /// Library error text.
        message: String,
    },
    /// The token was issued for a different app.
    #[error("token is bound to app {actual}, expected app {expected}")]
    AppMismatch {
        /// App the caller verified against.
        expected: AppId,
        /// App embedded in the token.
        actual: AppId,
    },
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,
}

/// Builds, signs and verifies access tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use mockable::DefaultClock;
/// use sso::domain::{App, AppId, AppSecret, PasswordHash, TokenIssuer, User, UserId};
///
/// let issuer = TokenIssuer::new(Arc::new(DefaultClock));
/// let user = User::new(UserId::new(1), "a@x.com", PasswordHash::from_bytes(Vec::new()));
/// let app = App::new(AppId::new(1), "billing", AppSecret::new("s3cr3t"));
///
/// let token = issuer.issue(&user, &app, Duration::from_secs(60)).expect("issue");
/// let claims = issuer.verify(&token, &app).expect("verify");
/// assert_eq!(claims.email, "a@x.com");
/// ```
#[derive(Clone)]
pub struct TokenIssuer {
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Sign a token for `user` that `app` will accept until `ttl` elapses.
    pub fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<AccessToken, TokenError> {
        if app.secret().is_empty() {
            return Err(TokenError::EmptySecret { app_id: app.id() });
        }

        let claims = TokenClaims {
            uid: user.id().get(),
            email: user.email().to_owned(),
            app_id: app.id().get(),
            exp: expiry(self.clock.utc(), ttl)?,
        };

        jsonwebtoken::encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(app.secret().as_bytes()),
        )
        .map(AccessToken::new)
        .map_err(|err| TokenError::Signing {
            message: err.to_string(),
        })
    }

    /// Decode `token` with `app`'s secret and check binding and expiry.
    pub fn verify(&self, token: &AccessToken, app: &App) -> Result<TokenClaims, TokenError> {
        if app.secret().is_empty() {
            return Err(TokenError::EmptySecret { app_id: app.id() });
        }

        // Expiry is checked against the injected clock below.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;

        let claims = jsonwebtoken::decode::<TokenClaims>(
            token.as_str(),
            &DecodingKey::from_secret(app.secret().as_bytes()),
            &validation,
        )
        .map_err(|err| TokenError::Invalid {
            message: err.to_string(),
        })?
        .claims;

        if claims.app_id() != app.id() {
            return Err(TokenError::AppMismatch {
                expected: app.id(),
                actual: claims.app_id(),
            });
        }
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<i64, TokenError> {
    let overflow = || TokenError::ExpiryOverflow {
        ttl_secs: ttl.as_secs(),
    };
    let ttl = chrono::Duration::from_std(ttl).map_err(|_| overflow())?;
    now.checked_add_signed(ttl)
        .map(|at| at.timestamp())
        .ok_or_else(overflow)
}
