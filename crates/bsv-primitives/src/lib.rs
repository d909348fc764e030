/// BSV transaction-id primitives: hashing, chain hashes, and binary encoding.
///
/// This crate provides the building blocks used by `bsv-transaction`:
/// - Hash functions (SHA-256, SHA-256d)
/// - Chain hash type for transaction identification and display
/// - Variable-length integers and little-endian byte reader/writer

pub mod hash;
pub mod chainhash;
pub mod util;

mod error;
pub use error::PrimitivesError;
