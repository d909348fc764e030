use proptest::prelude::*;

use bsv_primitives::chainhash::Hash;
use bsv_transaction::txhash::{layered_preimage, layered_tx_id, LAYERED_PREIMAGE_SIZE};
use bsv_transaction::{HashScheme, Transaction, TransactionInput, TransactionOutput};

/// Strategy to generate a random transaction with the given version range.
fn arb_transaction_with(
    version: impl Strategy<Value = i32>,
) -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),           // prev tx hash
        any::<u32>(),                                  // prev tx index
        prop::collection::vec(any::<u8>(), 0..64),     // script bytes
        any::<u32>(),                                  // sequence
    ).prop_map(|(hash, idx, script, seq)| {
        let mut input = TransactionInput::new();
        input.source_txid = Hash::new(hash);
        input.source_tx_out_index = idx;
        input.unlocking_script = script;
        input.sequence_number = seq;
        input
    });

    let arb_output = (
        any::<u64>(),
        prop::collection::vec(any::<u8>(), 0..64),
    ).prop_map(|(satoshis, script)| TransactionOutput::new(satoshis, script));

    (
        version,
        prop::collection::vec(arb_input, 0..4),
        prop::collection::vec(arb_output, 0..4),
        any::<u32>(),  // locktime
    ).prop_map(|(version, inputs, outputs, lock_time)| {
        let mut tx = Transaction::with_version(version);
        tx.lock_time = lock_time;
        for i in inputs { tx.add_input(i); }
        for o in outputs { tx.add_output(o); }
        tx
    })
}

fn arb_layered_transaction() -> impl Strategy<Value = Transaction> {
    arb_transaction_with(Just(10))
}

/// Flip one bit somewhere in `tx`. `selector` picks the field, `bit` the
/// bit within it. Returns `false` if the selected field had no bytes.
fn flip_bit(tx: &mut Transaction, selector: usize, bit: u32) -> bool {
    let n_in = tx.inputs.len();
    let n_out = tx.outputs.len();
    match selector % 8 {
        0 => tx.version ^= 1 << (bit % 32),
        1 => tx.lock_time ^= 1 << (bit % 32),
        2 if n_in > 0 => {
            let input = &mut tx.inputs[selector % n_in];
            let mut bytes = input.source_txid.into_bytes();
            bytes[(bit as usize / 8) % 32] ^= 1 << (bit % 8);
            input.source_txid = Hash::new(bytes);
        }
        3 if n_in > 0 => tx.inputs[selector % n_in].source_tx_out_index ^= 1 << (bit % 32),
        4 if n_in > 0 => tx.inputs[selector % n_in].sequence_number ^= 1 << (bit % 32),
        5 if n_in > 0 && !tx.inputs[selector % n_in].unlocking_script.is_empty() => {
            let script = &mut tx.inputs[selector % n_in].unlocking_script;
            let len = script.len();
            script[(bit as usize / 8) % len] ^= 1 << (bit % 8);
        }
        6 if n_out > 0 => tx.outputs[selector % n_out].satoshis ^= 1 << (bit % 64),
        7 if n_out > 0 && !tx.outputs[selector % n_out].locking_script.is_empty() => {
            let script = &mut tx.outputs[selector % n_out].locking_script;
            let len = script.len();
            script[(bit as usize / 8) % len] ^= 1 << (bit % 8);
        }
        _ => return false,
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(
        tx in arb_transaction_with(any::<i32>())
    ) {
        let bytes = tx.to_bytes();
        prop_assert_eq!(bytes.len(), tx.size());
        let tx2 = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&tx, &tx2);
        prop_assert_eq!(tx.tx_id(), tx2.tx_id());
    }

    #[test]
    fn tx_id_is_deterministic(tx in arb_transaction_with(any::<i32>())) {
        prop_assert_eq!(tx.tx_id(), tx.tx_id());
        prop_assert_eq!(tx.tx_id(), tx.clone().tx_id());
    }

    #[test]
    fn layered_preimage_has_fixed_size(tx in arb_layered_transaction()) {
        let preimage = layered_preimage(&tx);
        prop_assert_eq!(preimage.len(), LAYERED_PREIMAGE_SIZE);
        prop_assert_eq!(&preimage[8..12], &(tx.inputs.len() as u32).to_le_bytes());
        prop_assert_eq!(&preimage[12..16], &(tx.outputs.len() as u32).to_le_bytes());
    }

    #[test]
    fn dispatch_follows_version(tx in arb_transaction_with(any::<i32>())) {
        let expected = HashScheme::for_version(tx.version).tx_id(&tx);
        prop_assert_eq!(tx.tx_id(), expected);
        if tx.version == 10 {
            prop_assert_eq!(tx.tx_id(), layered_tx_id(&tx));
        }
    }

    #[test]
    fn version_10_differs_from_other_versions(
        tx in arb_layered_transaction(),
        other in any::<i32>().prop_filter("not layered", |v| *v != 10),
    ) {
        let mut legacy = tx.clone();
        legacy.version = other;
        prop_assert_ne!(tx.tx_id(), legacy.tx_id());
    }

    #[test]
    fn single_bit_flip_changes_layered_id(
        tx in arb_layered_transaction(),
        selector in any::<usize>(),
        bit in any::<u32>(),
    ) {
        let mut mutated = tx.clone();
        prop_assume!(flip_bit(&mut mutated, selector, bit));
        // Flipping the version away from 10 changes the scheme as well.
        prop_assert_ne!(tx.tx_id(), mutated.tx_id());
        prop_assert_ne!(layered_tx_id(&tx), layered_tx_id(&mutated));
    }

    #[test]
    fn swapping_distinct_inputs_changes_id(tx in arb_layered_transaction()) {
        prop_assume!(tx.inputs.len() >= 2 && tx.inputs[0] != tx.inputs[1]);
        let mut swapped = tx.clone();
        swapped.inputs.swap(0, 1);
        prop_assert_ne!(tx.tx_id(), swapped.tx_id());
    }

    #[test]
    fn swapping_distinct_outputs_changes_id(tx in arb_layered_transaction()) {
        prop_assume!(tx.outputs.len() >= 2 && tx.outputs[0] != tx.outputs[1]);
        let mut swapped = tx.clone();
        swapped.outputs.swap(0, 1);
        prop_assert_ne!(tx.tx_id(), swapped.tx_id());
    }

    #[test]
    fn layered_id_is_never_zero(tx in arb_layered_transaction()) {
        prop_assert!(!Hash::new(tx.tx_id()).is_zero());
    }
}
