use bsv_txid::primitives::chainhash::Hash;
use bsv_txid::transaction::txhash::{layered_digests, Partition};
use bsv_txid::{HashScheme, Transaction, TransactionInput, TransactionOutput};

fn coinbase_like(version: i32) -> Transaction {
    let mut script = vec![0x76, 0xa9, 0x14];
    script.extend_from_slice(&[0u8; 20]);
    script.extend_from_slice(&[0x88, 0xac]);

    let mut tx = Transaction::with_version(version);
    let mut input = TransactionInput::new();
    input.source_txid = Hash::from_hex("").unwrap();
    input.unlocking_script = vec![0x00];
    tx.add_input(input);
    tx.add_output(TransactionOutput::new(5_000_000_000, script));
    tx
}

#[test]
fn layered_golden_vector() {
    let tx = coinbase_like(10);
    assert_eq!(tx.hash_scheme(), HashScheme::Layered);
    assert_eq!(
        hex::encode(tx.tx_id()),
        "734b3c435b5db26eb04078100729adcf8ba85610c7537bbbface004994850c69"
    );
    assert_eq!(
        tx.tx_id_hex(),
        "690c85944900cefabb7b53c71056a88bcfad2907107840b06eb25d5b433c4b73"
    );
}

#[test]
fn legacy_golden_vector() {
    let tx = coinbase_like(1);
    assert_eq!(tx.hash_scheme(), HashScheme::Legacy);
    assert_eq!(
        hex::encode(tx.tx_id()),
        "7060460c8a057198d7e9917b799914084574949723b73afb1f9b32cacf307e8a"
    );
}

#[test]
fn partition_diff_points_at_outputs() {
    let a = coinbase_like(10);
    let mut b = a.clone();
    b.outputs[0].locking_script[3] = 0x01;
    assert_eq!(layered_digests(&a).diff(&layered_digests(&b)), vec![Partition::Outputs]);
}
