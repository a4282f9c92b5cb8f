//! API key handling.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;

/// The API key attached to every request as the `api_key` query parameter.
///
/// The key is fixed for the lifetime of a client. Its `Debug` output shows a
/// short fingerprint instead of the key itself, so it is safe to log.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    fingerprint: String,
}

impl Credential {
    /// Wrap an API key, rejecting empty or whitespace-only keys.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::Config("API key is required".into()));
        }
        let fingerprint = fingerprint(&key);
        Ok(Self { key, fingerprint })
    }

    /// First 16 hex chars of the SHA-256 of the key.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub(crate) fn expose(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential")
            .field(&format_args!("sha256:{}", self.fingerprint))
            .finish()
    }
}

fn fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
