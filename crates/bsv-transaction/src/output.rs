//! Transaction output with satoshi value and locking script.

use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};

use crate::TransactionError;

/// A single output in a BSV transaction.
///
/// `satoshis` is the 64-bit amount, always encoded as unsigned
/// little-endian. `locking_script` is opaque bytes and may be empty.
///
/// # Wire format (legacy)
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | satoshis         | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The number of satoshis (1 satoshi = 10^-8 BSV) locked by this output.
    pub satoshis: u64,

    /// The locking script (scriptPubKey) that defines spending conditions.
    pub locking_script: Vec<u8>,
}

impl TransactionOutput {
    /// Create an output paying `satoshis` to `locking_script`.
    pub fn new(satoshis: u64, locking_script: Vec<u8>) -> Self {
        TransactionOutput { satoshis, locking_script }
    }

    /// Deserialize a `TransactionOutput` from a `BsvReader`.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading satoshis: {}", e))
        })?;

        let script = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            satoshis,
            locking_script: script.to_vec(),
        })
    }

    /// Serialize this output into a `BsvWriter` in the legacy wire format.
    pub fn write_to(&self, writer: &mut BsvWriter) {
        writer.write_u64_le(self.satoshis);
        writer.write_var_bytes(&self.locking_script);
    }

    /// Number of bytes `write_to` produces for this output.
    pub fn serialize_size(&self) -> usize {
        8 + VarInt::from(self.locking_script.len()).length() + self.locking_script.len()
    }

    /// Return the locking script as a hex-encoded string.
    pub fn locking_script_hex(&self) -> String {
        hex::encode(&self.locking_script)
    }
}
