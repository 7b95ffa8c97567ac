//! User identity as seen by the authentication core.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PasswordHash;

/// Store-assigned user identifier.
///
/// # Examples
/// ```
/// use sso::domain::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user.
///
/// ## Invariants
/// - `email` is unique across users; the store enforces it.
/// - `pass_hash` is opaque hasher output and is redacted from `Debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    pass_hash: PasswordHash,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(id: UserId, email: impl Into<String>, pass_hash: PasswordHash) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored password hash.
    pub fn pass_hash(&self) -> &PasswordHash {
        &self.pass_hash
    }
}
