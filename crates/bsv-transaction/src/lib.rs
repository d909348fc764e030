/// BSV transaction model and transaction id derivation.
///
/// Provides the `Transaction` type with inputs and outputs, legacy binary/hex
/// serialization, and `tx_id()` which dispatches on the format version:
/// version 10 uses the layered three-partition hash, every other version
/// hashes the legacy serialization.

pub mod transaction;
pub mod input;
pub mod output;
pub mod outpoint;
pub mod txhash;

mod error;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use outpoint::OutPoint;
pub use txhash::{HashScheme, LayeredDigests, LAYERED_TX_VERSION};
