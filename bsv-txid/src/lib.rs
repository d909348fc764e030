#![deny(missing_docs)]

//! BSV transaction identifiers.
//!
//! Re-exports the transaction model and hashing primitives for
//! single-crate usage. [`transaction::Transaction::tx_id`] computes the
//! layered id for version-10 transactions and the legacy id otherwise.

pub use bsv_primitives as primitives;
pub use bsv_transaction as transaction;

pub use bsv_transaction::{HashScheme, Transaction, TransactionInput, TransactionOutput};
