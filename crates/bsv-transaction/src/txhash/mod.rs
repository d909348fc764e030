//! Transaction id derivation.
//!
//! The format version selects one of exactly two hash schemes:
//!
//! - [`HashScheme::Layered`] for version 10: three partition digests
//!   (input metadata, unlocking scripts, outputs) combined with the header
//!   fields into a fixed 112-byte preimage, then double SHA-256. See
//!   [`layered`].
//! - [`HashScheme::Legacy`] for every other version: double SHA-256 over
//!   the full legacy serialization.
//!
//! Both are pure functions of the transaction's current fields. Nothing is
//! cached, so a mutated transaction always hashes to its new value.

pub mod layered;

use bsv_primitives::chainhash::double_hash_h;

use crate::transaction::Transaction;

pub use layered::{
    layered_digests, layered_preimage, layered_tx_id, LayeredDigests, Partition,
    LAYERED_PREIMAGE_SIZE,
};

/// The only format version hashed with the layered scheme.
pub const LAYERED_TX_VERSION: i32 = 10;

/// The algorithm used to derive a transaction id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashScheme {
    /// Double SHA-256 of the legacy serialization.
    Legacy,
    /// Three-partition layered hash.
    Layered,
}

impl HashScheme {
    /// Select the scheme for a format version.
    ///
    /// Total over `i32`: version 10 is layered, everything else (negative,
    /// zero, 1, 2, 11 and up) is legacy.
    pub fn for_version(version: i32) -> Self {
        if version == LAYERED_TX_VERSION {
            HashScheme::Layered
        } else {
            HashScheme::Legacy
        }
    }

    /// Run this scheme over `tx`, regardless of `tx.version`.
    ///
    /// # Returns
    /// The 32-byte identifier in internal byte order.
    pub fn tx_id(self, tx: &Transaction) -> [u8; 32] {
        match self {
            HashScheme::Legacy => legacy_tx_id(tx),
            HashScheme::Layered => layered_tx_id(tx),
        }
    }
}

/// Double SHA-256 of the transaction's legacy serialization.
pub fn legacy_tx_id(tx: &Transaction) -> [u8; 32] {
    double_hash_h(&tx.to_bytes()).into()
}
