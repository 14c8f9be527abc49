//! Password digests stored in the `users` table.
//!
//! SHA-512/256, lowercase hex, no salt. Stored digests depend on this exact
//! algorithm, so changing it invalidates every existing credential.

use sha2::{Digest, Sha512_256};

pub fn hash_password(plaintext: &str) -> String {
    hex::encode(Sha512_256::digest(plaintext.as_bytes()))
}
