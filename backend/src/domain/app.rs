//! Client applications (tenants) that trust tokens issued by this service.
//!
//! Each app owns its signing secret. Nothing in the crate holds a global
//! signing key; the secret travels with the [`App`] record into the token
//! issuer on every call.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// App identifier as provisioned in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(i32);

impl AppId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// HMAC key bytes used to sign and verify an app's tokens.
///
/// Zeroised on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(Zeroizing<Vec<u8>>);

impl AppSecret {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Whether the key is empty and therefore unusable for signing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(<redacted>)")
    }
}

/// A client application.
///
/// # Examples
/// ```
/// use sso::domain::{App, AppId, AppSecret};
///
/// let app = App::new(AppId::new(1), "billing", AppSecret::new("s3cr3t"));
/// assert_eq!(app.name(), "billing");
/// assert!(!format!("{app:?}").contains("s3cr3t"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    id: AppId,
    name: String,
    secret: AppSecret,
}

impl App {
    /// Assemble an app from stored parts.
    pub fn new(id: AppId, name: impl Into<String>, secret: AppSecret) -> Self {
        Self {
            id,
            name: name.into(),
            secret,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> AppId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Signing secret.
    pub fn secret(&self) -> &AppSecret {
        &self.secret
    }
}
