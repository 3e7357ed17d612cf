//! Password derivation and credential checks for the sign-in form.

use pbkdf2::pbkdf2_hmac;
use sha3::Sha3_512;
use std::collections::HashMap;

/// Length of a SHA3-512 digest; the derived key is as long as one digest.
const DERIVED_KEY_LEN: usize = 64;

/// PBKDF2-HMAC-SHA3-512 with an application-wide salt, hex encoded.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    salt: String,
    iterations: u32,
}

impl PasswordHasher {
    #[must_use]
    pub fn new(salt: impl Into<String>, iterations: u32) -> Self {
        Self {
            salt: salt.into(),
            iterations,
        }
    }

    /// Lowercase hex of the 64 byte derived key (128 characters).
    #[must_use]
    pub fn hash(&self, password: &str) -> String {
        let mut key = [0u8; DERIVED_KEY_LEN];
        pbkdf2_hmac::<Sha3_512>(
            password.as_bytes(),
            self.salt.as_bytes(),
            self.iterations,
            &mut key,
        );
        hex::encode(key)
    }
}

/// Decides whether a username and an already derived password hash match.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password_hash: &str) -> bool;
}

/// Fixed user list from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    users: HashMap<String, String>,
}

impl StaticAuthenticator {
    pub fn new<I>(users: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(user, hash)| (user, hash.to_lowercase()))
                .collect(),
        }
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password_hash: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected.eq_ignore_ascii_case(password_hash))
    }
}
