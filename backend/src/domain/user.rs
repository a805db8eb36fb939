//! User accounts and credential handling.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Validation errors for registration and login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain an @ sign"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Stable user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registration/login email address.
///
/// Validation is intentionally light: trimmed, non-empty, contains an `@`.
/// The store enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from raw form input.
    pub fn new(raw: &str) -> Result<Self, CredentialValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }
        if !trimmed.contains('@') {
            return Err(CredentialValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Salted password digest stored as `hex(salt)$hex(sha256(salt || password))`.
///
/// Raw passwords never reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

const SALT_LEN: usize = 16;

impl PasswordHash {
    /// Derive a digest for a new password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Ok(Self(format!(
            "{}${}",
            hex::encode(salt),
            hex::encode(digest(&salt, password))
        )))
    }

    /// Check a submitted password against the stored digest.
    ///
    /// Unparseable stored values compare unequal rather than erroring, so a
    /// corrupt row behaves like a wrong password.
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt_hex, digest_hex)) = self.0.split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        hex::encode(digest(&salt, password)) == digest_hex
    }

    /// Wrap a digest previously produced by [`PasswordHash::derive`].
    pub fn from_stored(stored: String) -> Self {
        Self(stored)
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: PasswordHash,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", CredentialValidationError::EmptyEmail)]
    #[case("   ", CredentialValidationError::EmptyEmail)]
    #[case("nobody", CredentialValidationError::InvalidEmail)]
    fn rejects_bad_emails(#[case] raw: &str, #[case] expected: CredentialValidationError) {
        assert_eq!(Email::new(raw).unwrap_err(), expected);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = Email::new("  ada@example.com ").unwrap();
        assert_eq!(email.as_ref(), "ada@example.com");
    }

    #[test]
    fn derive_then_verify_round_trips() {
        let hash = PasswordHash::derive("hunter2").unwrap();
        assert!(hash.verify("hunter2"));
        assert!(!hash.verify("hunter3"));
    }

    #[test]
    fn digest_never_contains_the_password() {
        let hash = PasswordHash::derive("correct horse").unwrap();
        assert!(!hash.as_ref().contains("correct horse"));
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(
            PasswordHash::derive("").unwrap_err(),
            CredentialValidationError::EmptyPassword
        );
    }

    #[test]
    fn corrupt_stored_digest_fails_closed() {
        let hash = PasswordHash::from_stored("not-a-digest".into());
        assert!(!hash.verify("anything"));
    }
}
