//! Credential digesting
//!
//! One-way transform applied to plaintext passwords before they reach
//! storage. Digests are deterministic by contract: the same plaintext always
//! produces the same string, which is what lets verification digest a login
//! attempt and compare it against the stored value.

use std::fmt::Debug;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

/// One-way deterministic digest of plaintext credentials
pub trait CredentialDigester: Send + Sync + Debug {
    /// Digest a plaintext credential into its stored form
    fn digest(&self, plaintext: &str) -> String;

    /// Verify a plaintext attempt against a stored digest
    fn matches(&self, plaintext: &str, stored: &str) -> bool {
        constant_time_compare(&self.digest(plaintext), stored)
    }
}

/// SHA-256 digester producing `sha256$<base64>` strings
#[derive(Debug, Clone, Default)]
pub struct Sha256Digester;

impl Sha256Digester {
    /// Create a new SHA-256 digester
    pub fn new() -> Self {
        Self
    }
}

impl CredentialDigester for Sha256Digester {
    fn digest(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        let result = hasher.finalize();
        format!("sha256${}", URL_SAFE_NO_PAD.encode(result))
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut result = 0u8;

    for i in 0..a.len() {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}
