//! Layered transaction id for version-10 transactions.
//!
//! The transaction is split into three partitions, each collapsed into a
//! single SHA-256 digest:
//!
//! | Partition | Per-element bytes                              | Width |
//! |-----------|------------------------------------------------|-------|
//! | inputs    | `source_txid ‖ index (LE) ‖ sequence (LE)`     | 40    |
//! | scripts   | `SHA-256(unlocking_script)`                    | 32    |
//! | outputs   | `satoshis (LE) ‖ SHA-256(locking_script)`      | 40    |
//!
//! The digests are appended to a 16-byte header to form the preimage:
//!
//! | Field             | Size |
//! |-------------------|------|
//! | version           | 4 (LE, signed) |
//! | lock_time         | 4 (LE) |
//! | input count       | 4 (LE) |
//! | output count      | 4 (LE) |
//! | inputs digest     | 32   |
//! | scripts digest    | 32   |
//! | outputs digest    | 32   |
//!
//! The id is SHA-256(SHA-256(preimage)). Every partition of an empty
//! collection is SHA-256 of the empty string.

use std::fmt;

use bsv_primitives::chainhash::HASH_SIZE;
use bsv_primitives::hash::{sha256, sha256d, SHA256_SIZE};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::transaction::Transaction;

/// Bytes contributed by one input to the inputs partition.
pub const INPUT_ENTRY_SIZE: usize = HASH_SIZE + 4 + 4;

/// Bytes contributed by one input to the scripts partition.
pub const SCRIPT_ENTRY_SIZE: usize = SHA256_SIZE;

/// Bytes contributed by one output to the outputs partition.
pub const OUTPUT_ENTRY_SIZE: usize = 8 + SHA256_SIZE;

const HEADER_SIZE: usize = 16;

/// Size of the layered preimage. Fixed regardless of input/output counts.
pub const LAYERED_PREIMAGE_SIZE: usize = HEADER_SIZE + 3 * SHA256_SIZE;

/// One of the three partitions of a layered hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Outpoints and sequence numbers of all inputs.
    Inputs,
    /// Hashes of the inputs' unlocking scripts.
    UnlockingScripts,
    /// Amounts and locking-script hashes of all outputs.
    Outputs,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Partition::Inputs => "inputs",
            Partition::UnlockingScripts => "unlocking scripts",
            Partition::Outputs => "outputs",
        };
        f.write_str(name)
    }
}

/// The three partition digests of a transaction.
///
/// Comparing two `LayeredDigests` with [`LayeredDigests::diff`] shows which
/// part of a transaction accounts for a txid mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayeredDigests {
    /// SHA-256 over every input's outpoint and sequence number.
    pub inputs: [u8; SHA256_SIZE],
    /// SHA-256 over the per-input unlocking-script hashes.
    pub unlocking_scripts: [u8; SHA256_SIZE],
    /// SHA-256 over every output's amount and locking-script hash.
    pub outputs: [u8; SHA256_SIZE],
}

impl LayeredDigests {
    /// Hash each partition of `tx`.
    pub fn compute(tx: &Transaction) -> Self {
        LayeredDigests {
            inputs: inputs_digest(&tx.inputs),
            unlocking_scripts: unlocking_scripts_digest(&tx.inputs),
            outputs: outputs_digest(&tx.outputs),
        }
    }

    /// Look up a single partition digest.
    pub fn get(&self, partition: Partition) -> &[u8; SHA256_SIZE] {
        match partition {
            Partition::Inputs => &self.inputs,
            Partition::UnlockingScripts => &self.unlocking_scripts,
            Partition::Outputs => &self.outputs,
        }
    }

    /// Partitions whose digests differ between `self` and `other`, in
    /// preimage order.
    pub fn diff(&self, other: &LayeredDigests) -> Vec<Partition> {
        [Partition::Inputs, Partition::UnlockingScripts, Partition::Outputs]
            .into_iter()
            .filter(|p| self.get(*p) != other.get(*p))
            .collect()
    }
}

/// Hash the three partitions of `tx`.
pub fn layered_digests(tx: &Transaction) -> LayeredDigests {
    LayeredDigests::compute(tx)
}

/// Build the 112-byte layered preimage for `tx`.
///
/// # Panics
/// If `tx` has more than `u32::MAX` inputs or outputs. Such a count cannot
/// be encoded in the 4-byte header field and is never truncated.
pub fn layered_preimage(tx: &Transaction) -> [u8; LAYERED_PREIMAGE_SIZE] {
    let digests = LayeredDigests::compute(tx);

    let mut preimage = [0u8; LAYERED_PREIMAGE_SIZE];
    preimage[0..4].copy_from_slice(&tx.version.to_le_bytes());
    preimage[4..8].copy_from_slice(&tx.lock_time.to_le_bytes());
    preimage[8..12].copy_from_slice(&encode_count(tx.inputs.len(), "input").to_le_bytes());
    preimage[12..16].copy_from_slice(&encode_count(tx.outputs.len(), "output").to_le_bytes());

    let digest_area = &mut preimage[HEADER_SIZE..];
    digest_area[..SHA256_SIZE].copy_from_slice(&digests.inputs);
    digest_area[SHA256_SIZE..2 * SHA256_SIZE].copy_from_slice(&digests.unlocking_scripts);
    digest_area[2 * SHA256_SIZE..].copy_from_slice(&digests.outputs);

    log::trace!(
        "layered digests: inputs={} scripts={} outputs={}",
        hex::encode(digests.inputs),
        hex::encode(digests.unlocking_scripts),
        hex::encode(digests.outputs)
    );

    preimage
}

/// Compute the layered transaction id of `tx`: SHA-256d of the preimage.
///
/// Applies the layered scheme whatever `tx.version` is; use
/// [`Transaction::tx_id`] for version-based dispatch.
///
/// # Panics
/// See [`layered_preimage`].
pub fn layered_tx_id(tx: &Transaction) -> [u8; 32] {
    sha256d(&layered_preimage(tx))
}

/// Encode an element count for the 4-byte header field.
///
/// # Panics
/// If `len` exceeds `u32::MAX`.
fn encode_count(len: usize, what: &str) -> u32 {
    u32::try_from(len)
        .unwrap_or_else(|_| panic!("{} count {} does not fit in 32 bits", what, len))
}

fn inputs_digest(inputs: &[TransactionInput]) -> [u8; SHA256_SIZE] {
    let mut buf = vec![0u8; inputs.len() * INPUT_ENTRY_SIZE];
    for (entry, input) in buf.chunks_exact_mut(INPUT_ENTRY_SIZE).zip(inputs) {
        entry[..HASH_SIZE].copy_from_slice(input.source_txid.as_bytes());
        entry[HASH_SIZE..HASH_SIZE + 4].copy_from_slice(&input.source_tx_out_index.to_le_bytes());
        entry[HASH_SIZE + 4..].copy_from_slice(&input.sequence_number.to_le_bytes());
    }
    sha256(&buf)
}

fn unlocking_scripts_digest(inputs: &[TransactionInput]) -> [u8; SHA256_SIZE] {
    let mut buf = vec![0u8; inputs.len() * SCRIPT_ENTRY_SIZE];
    for (entry, input) in buf.chunks_exact_mut(SCRIPT_ENTRY_SIZE).zip(inputs) {
        entry.copy_from_slice(&sha256(&input.unlocking_script));
    }
    sha256(&buf)
}

fn outputs_digest(outputs: &[TransactionOutput]) -> [u8; SHA256_SIZE] {
    let mut buf = vec![0u8; outputs.len() * OUTPUT_ENTRY_SIZE];
    for (entry, output) in buf.chunks_exact_mut(OUTPUT_ENTRY_SIZE).zip(outputs) {
        entry[..8].copy_from_slice(&output.satoshis.to_le_bytes());
        entry[8..].copy_from_slice(&sha256(&output.locking_script));
    }
    sha256(&buf)
}
