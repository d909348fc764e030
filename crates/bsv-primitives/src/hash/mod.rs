//! Hash function primitives.
//!
//! SHA-256 and double SHA-256, the two digests used when deriving
//! transaction identifiers. Both return fixed-size arrays so callers can
//! place the result directly into pre-sized buffers.

use sha2::{Digest, Sha256};

/// Size in bytes of a SHA-256 digest.
pub const SHA256_SIZE: usize = 32;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; SHA256_SIZE] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 (SHA-256d) of the input data.
///
/// Computes SHA-256(SHA-256(data)). This is the final step of every
/// transaction identifier, layered or legacy.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; SHA256_SIZE] {
    sha256(&sha256(data))
}
