//! Core transaction type.
//!
//! Represents a transaction with version, inputs, outputs, and lock time.
//! Supports legacy binary and hex serialization and transaction id
//! computation, which dispatches on the version: see [`crate::txhash`].

use bsv_primitives::chainhash::Hash;
use bsv_primitives::util::{BsvReader, BsvWriter, VarInt};

use crate::input::TransactionInput;
use crate::outpoint::OutPoint;
use crate::output::TransactionOutput;
use crate::txhash::HashScheme;
use crate::TransactionError;

/// A BSV transaction consisting of a version, ordered inputs, ordered
/// outputs, and a lock time.
///
/// The order of `inputs` and `outputs` is part of the transaction id.
///
/// # Wire format (legacy)
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE, signed)      |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE)              |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Version 10 selects the layered txid.
    pub version: i32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Self::with_version(1)
    }

    /// Create a new empty transaction with the given version and lock time 0.
    pub fn with_version(version: i32) -> Self {
        Transaction {
            version,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction with no
    /// trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = BsvReader::new(bytes);
        let tx = Self::read_from(&mut reader).map_err(|e| {
            log::debug!("failed to parse {}-byte transaction: {}", bytes.len(), e);
            e
        })?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `BsvReader` in the legacy format.
    ///
    /// Element counts only bound the number of loop iterations; storage
    /// grows as elements are actually read, so a corrupt count fails with
    /// an EOF error instead of a huge allocation.
    pub fn read_from(reader: &mut BsvReader) -> Result<Self, TransactionError> {
        let version = reader.read_i32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let mut inputs = Vec::with_capacity(bounded_capacity(input_count, reader));
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity(bounded_capacity(output_count, reader));
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction in the legacy wire format.
    ///
    /// This is also the preimage of the legacy transaction id.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BsvWriter::with_capacity(self.size());
        writer.write_i32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Serialize this transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Return the size of the legacy serialization in bytes.
    pub fn size(&self) -> usize {
        4 + VarInt::from(self.inputs.len()).length()
            + self.inputs.iter().map(TransactionInput::serialize_size).sum::<usize>()
            + VarInt::from(self.outputs.len()).length()
            + self.outputs.iter().map(TransactionOutput::serialize_size).sum::<usize>()
            + 4
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// The hash scheme selected by this transaction's version.
    pub fn hash_scheme(&self) -> HashScheme {
        HashScheme::for_version(self.version)
    }

    /// Compute the transaction ID.
    ///
    /// Version 10 uses the layered hash, every other version the double
    /// SHA-256 of the legacy serialization. The result is recomputed on
    /// every call from the current field values.
    ///
    /// # Returns
    /// The 32-byte txid in internal byte order. Use `tx_id_hex()` for the
    /// conventional display string.
    pub fn tx_id(&self) -> [u8; 32] {
        let scheme = self.hash_scheme();
        log::trace!(
            "computing {:?} txid for version {} ({} inputs, {} outputs)",
            scheme,
            self.version,
            self.inputs.len(),
            self.outputs.len()
        );
        scheme.tx_id(self)
    }

    /// The transaction ID wrapped as a chain `Hash`.
    pub fn tx_hash(&self) -> Hash {
        Hash::from(self.tx_id())
    }

    /// The transaction ID as byte-reversed hex.
    pub fn tx_id_hex(&self) -> String {
        self.tx_hash().to_string()
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    /// Append a `TransactionInput` to this transaction.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append an input spending `outpoint` with the given unlocking script.
    pub fn add_input_from_outpoint(&mut self, outpoint: OutPoint, unlocking_script: Vec<u8>) {
        self.inputs.push(TransactionInput::from_outpoint(outpoint, unlocking_script));
    }

    /// Return the number of inputs in the transaction.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Append a `TransactionOutput` to this transaction.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Return the number of outputs in the transaction.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Compute the sum of all output satoshi values.
    ///
    /// # Returns
    /// `None` if the sum overflows `u64`.
    pub fn total_output_satoshis(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.satoshis))
    }
}

/// Pre-allocation hint for `count` elements: never more than the number of
/// bytes left, since every element occupies at least one byte.
fn bounded_capacity(count: VarInt, reader: &BsvReader) -> usize {
    count.value().min(reader.remaining() as u64) as usize
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
