//! Password hashing for the credential store
//!
//! SHA-256 of the raw password, hex encoded. The scheme is deterministic and
//! carries no per-user salt: two accounts with the same password store the
//! same hash, and the stored values are vulnerable to precomputed-table
//! attacks. This matches the existing credential records; moving to a salted,
//! slow hash invalidates every stored password and is a deployment decision,
//! not a drop-in change.

use sha2::{Digest, Sha256};

/// Hash a password for storage (64 lowercase hex characters)
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare a candidate password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}
