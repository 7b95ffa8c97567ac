//! Credential hasher: one-way password hashing and verification.
//!
//! Hashes are bcrypt strings stored as opaque bytes. The work factor is fixed
//! per hasher instance and chosen at startup.

use std::fmt;

use thiserror::Error;

/// Smallest bcrypt cost accepted.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Largest bcrypt cost accepted.
pub const MAX_BCRYPT_COST: u32 = 31;
/// Cost used when configuration does not override it.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

// bcrypt only reads the first 72 bytes of its input.
const MAX_PASSWORD_BYTES: usize = 72;

/// Opaque output of a [`PasswordHasher`].
///
/// Never compared as plaintext and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(Vec<u8>);

impl PasswordHash {
    /// Wrap stored hash bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw bytes for persistence.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Failures raised while hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Configured work factor is outside the supported range.
    #[error("bcrypt cost {cost} is outside {}..={}", MIN_BCRYPT_COST, MAX_BCRYPT_COST)]
    InvalidCost {
        /// Rejected cost.
        cost: u32,
    },
    /// Password exceeds the primitive's input limit.
    #[error("password exceeds {} bytes", MAX_PASSWORD_BYTES)]
    TooLong,
    /// The primitive itself failed.
    #[error("password hashing failed: {message}")]
    Primitive {
        /// Primitive error text.
        message: String,
    },
}

/// Port for password hashing so the auth service can be tested with cheap
/// doubles.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted, slow hash suitable for long-term storage.
    fn hash(&self, password: &str) -> Result<PasswordHash, HashError>;

    /// Check `candidate` against `hash`. Malformed hashes never verify.
    fn verify(&self, hash: &PasswordHash, candidate: &str) -> bool;
}

/// bcrypt-backed [`PasswordHasher`].
///
/// # Examples
/// ```
/// use sso::domain::{BcryptPasswordHasher, PasswordHasher};
///
/// let hasher = BcryptPasswordHasher::new(4).expect("valid cost");
/// let hash = hasher.hash("pw123").expect("hash");
/// assert!(hasher.verify(&hash, "pw123"));
/// assert!(!hasher.verify(&hash, "wrong"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher with the given work factor.
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(HashError::InvalidCost { cost });
        }
        Ok(Self { cost })
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, HashError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(HashError::TooLong);
        }
        bcrypt::hash(password, self.cost)
            .map(|encoded| PasswordHash::from_bytes(encoded.into_bytes()))
            .map_err(|err| HashError::Primitive {
                message: err.to_string(),
            })
    }

    fn verify(&self, hash: &PasswordHash, candidate: &str) -> bool {
        // bcrypt ignores bytes past the limit; such candidates cannot match.
        if candidate.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        let Ok(encoded) = std::str::from_utf8(hash.as_bytes()) else {
            return false;
        };
        bcrypt::verify(candidate, encoded).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("minimum cost is valid")
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(32)]
    fn rejects_out_of_range_cost(#[case] cost: u32) {
        assert_eq!(
            BcryptPasswordHasher::new(cost).expect_err("cost must be rejected"),
            HashError::InvalidCost { cost }
        );
    }

    #[rstest]
    fn hashes_are_salted(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("pw123").expect("hash");
        let second = hasher.hash("pw123").expect("hash");
        assert_ne!(first, second);
        assert!(hasher.verify(&first, "pw123"));
        assert!(hasher.verify(&second, "pw123"));
    }

    #[rstest]
    fn hash_does_not_contain_plaintext(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("plaintext-password").expect("hash");
        let encoded = String::from_utf8(hash.as_bytes().to_vec()).expect("bcrypt output is ascii");
        assert!(!encoded.contains("plaintext-password"));
        assert!(encoded.starts_with("$2"));
    }

    #[rstest]
    fn rejects_passwords_past_the_input_limit(hasher: BcryptPasswordHasher) {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert_eq!(hasher.hash(&long), Err(HashError::TooLong));
    }

    #[rstest]
    fn accepts_password_at_the_input_limit(hasher: BcryptPasswordHasher) {
        let exact = "x".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&exact).expect("72 bytes is allowed");
        assert!(hasher.verify(&hash, &exact));
    }

    #[rstest]
    fn candidates_past_the_input_limit_never_verify(hasher: BcryptPasswordHasher) {
        let exact = "x".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&exact).expect("72 bytes is allowed");
        let extended = format!("{exact}DIFFERENT-SUFFIX");
        assert!(!hasher.verify(&hash, &extended));
    }

    #[rstest]
    #[case(b"not a bcrypt hash".to_vec())]
    #[case(vec![0xff, 0xfe, 0xfd])]
    #[case(Vec::new())]
    fn malformed_hashes_never_verify(hasher: BcryptPasswordHasher, #[case] stored: Vec<u8>) {
        assert!(!hasher.verify(&PasswordHash::from_bytes(stored), "anything"));
    }

    #[rstest]
    fn debug_output_is_redacted(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("pw").expect("hash");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
