//! Transaction input referencing a previous output.
//!
//! Holds the spent outpoint, the unlocking script and the sequence number,
//! with binary serialization in the legacy wire format.

use bsv_primitives::chainhash::Hash;
use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};

use crate::outpoint::OutPoint;
use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a BSV transaction.
///
/// The input spends output `source_tx_out_index` of the transaction
/// `source_txid`. The `unlocking_script` is opaque here: it is hashed and
/// serialized, never interpreted.
///
/// # Wire format (legacy)
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | source_txid        | 32 bytes         |
/// | source_tx_out_index| 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence_number    | 4 bytes (LE)     |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionInput {
    /// Identifier of the transaction being spent, in internal byte order.
    pub source_txid: Hash,

    /// Index of the output within the source transaction.
    pub source_tx_out_index: u32,

    /// The unlocking script (scriptSig). May be empty.
    pub unlocking_script: Vec<u8>,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,
}

impl TransactionInput {
    /// Create an input with a zero txid, index 0, empty script and
    /// finalized sequence.
    pub fn new() -> Self {
        TransactionInput {
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            ..Default::default()
        }
    }

    /// Create an input spending `outpoint` with the given unlocking script
    /// and the default sequence number.
    pub fn from_outpoint(outpoint: OutPoint, unlocking_script: Vec<u8>) -> Self {
        TransactionInput {
            source_txid: outpoint.txid,
            source_tx_out_index: outpoint.index,
            unlocking_script,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
        }
    }

    /// The outpoint this input spends.
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.source_txid, self.source_tx_out_index)
    }

    /// Deserialize a `TransactionInput` from a `BsvReader`.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated or the script length overruns the input.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let txid: [u8; 32] = reader.read_array().map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;

        let source_tx_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        Ok(TransactionInput {
            source_txid: Hash::new(txid),
            source_tx_out_index,
            unlocking_script: script.to_vec(),
            sequence_number,
        })
    }

    /// Serialize this input into a `BsvWriter` in the legacy wire format.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        writer.write_bytes(self.source_txid.as_bytes());
        writer.write_u32_le(self.source_tx_out_index);
        writer.write_var_bytes(&self.unlocking_script);
        writer.write_u32_le(self.sequence_number);
    }

    /// Number of bytes `write_to` produces for this input.
    pub fn serialize_size(&self) -> usize {
        OutPoint::SIZE
            + VarInt::from(self.unlocking_script.len()).length()
            + self.unlocking_script.len()
            + 4
    }
}
