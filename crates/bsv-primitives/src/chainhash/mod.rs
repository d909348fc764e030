//! Chain hash type for transaction identification.
//!
//! A `Hash` is 32 bytes kept in internal (computation) byte order. Its
//! string form is byte-reversed hex, the convention block explorers and
//! node RPCs use for transaction ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum hex string length for a Hash (64 hex characters).
pub const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash in internal byte order.
///
/// `Display` and `FromStr` use the reversed (display) order; `as_bytes`
/// and `new` use the internal order that is fed into hash preimages.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a raw 32-byte array in internal byte order.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice in internal byte order.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is exactly 32 bytes, or
    /// `PrimitivesError::InvalidHash` otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Parse a Hash from its display (byte-reversed) hex form.
    ///
    /// Strings shorter than 64 characters are treated as having their
    /// leading zeros stripped, so `"1"` parses to a hash whose first
    /// internal byte is `0x01`. The empty string is the zero hash.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of up to 64 characters.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for over-long or non-hex input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() > MAX_HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "max hash string length is {} characters, got {}",
                MAX_HASH_STRING_SIZE,
                hex_str.len()
            )));
        }

        let padded = format!("{:0>width$}", hex_str, width = MAX_HASH_STRING_SIZE);
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(&padded, &mut bytes)?;
        bytes.reverse();
        Ok(Hash(bytes))
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Consume the hash and return the internal byte array.
    pub fn into_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

/// Display the hash as byte-reversed hex.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute double SHA-256 of the input and wrap the result as a Hash.
pub fn double_hash_h(data: &[u8]) -> Hash {
    Hash(sha256d(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    #[test]
    fn test_display_is_reversed() {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0] = 0xaa;
        bytes[31] = 0x01;
        let hash = Hash::new(bytes);
        let s = hash.to_string();
        assert!(s.starts_with("01"));
        assert!(s.ends_with("aa"));
        assert_eq!(s.len(), MAX_HASH_STRING_SIZE);
    }

    #[test]
    fn test_from_hex_matches_display() {
        let hash = Hash::new(sha256(b"hello"));
        assert_eq!(
            hash.to_string(),
            "24988b93623304735e42a71f5c1e161b9ee2b9c52a3be8260ea3b05fba4df22c"
        );
        let parsed: Hash = "24988b93623304735e42a71f5c1e161b9ee2b9c52a3be8260ea3b05fba4df22c"
            .parse()
            .unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn test_from_hex_short_and_empty() {
        assert_eq!(Hash::from_hex("").unwrap(), Hash::default());
        assert!(Hash::from_hex("").unwrap().is_zero());

        let one = Hash::from_hex("1").unwrap();
        let mut expected = [0u8; HASH_SIZE];
        expected[0] = 0x01;
        assert_eq!(one.as_bytes(), &expected);
    }

    #[test]
    fn test_from_hex_errors() {
        let too_long = "0".repeat(MAX_HASH_STRING_SIZE + 1);
        assert!(matches!(
            Hash::from_hex(&too_long),
            Err(PrimitivesError::InvalidHash(_))
        ));
        assert!(matches!(
            Hash::from_hex("xyz"),
            Err(PrimitivesError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE]).is_ok());
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE - 1]).is_err());
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE + 1]).is_err());
    }

    #[test]
    fn test_double_hash_h() {
        assert_eq!(
            double_hash_h(b"").to_string(),
            "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d"
        );
        let raw: [u8; HASH_SIZE] = double_hash_h(b"abc").into();
        assert_eq!(raw, sha256d(b"abc"));
        assert_eq!(Hash::from(raw).into_bytes(), raw);
    }

    #[test]
    fn test_serde_string_form() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            txid: Hash,
        }

        let w = Wrapper { txid: Hash::new(sha256(b"hello")) };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(
            json,
            r#"{"txid":"24988b93623304735e42a71f5c1e161b9ee2b9c52a3be8260ea3b05fba4df22c"}"#
        );
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.txid, w.txid);

        assert!(serde_json::from_str::<Wrapper>(r#"{"txid":"zz"}"#).is_err());
    }
}
