//! Reference to a specific output of a prior transaction.

use std::fmt;
use std::str::FromStr;

use bsv_primitives::chainhash::Hash;

use crate::TransactionError;

/// A (txid, output index) pair identifying a previous transaction output.
///
/// `txid` is held in internal byte order; the string form `txid:index`
/// uses the display (reversed) order for the txid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// Identifier of the transaction that created the output.
    pub txid: Hash,
    /// Index of the output within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// Encoded size of an outpoint: 32-byte txid plus 4-byte index.
    pub const SIZE: usize = 36;

    /// Create an outpoint for output `index` of transaction `txid`.
    pub fn new(txid: Hash, index: u32) -> Self {
        OutPoint { txid, index }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

impl FromStr for OutPoint {
    type Err = TransactionError;

    /// Parse the `txid:index` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, index) = s.rsplit_once(':').ok_or_else(|| {
            TransactionError::InvalidTransaction(format!("outpoint {:?} has no ':' separator", s))
        })?;
        let index = index.parse::<u32>().map_err(|e| {
            TransactionError::InvalidTransaction(format!("outpoint index {:?}: {}", index, e))
        })?;
        Ok(OutPoint::new(Hash::from_hex(txid)?, index))
    }
}
