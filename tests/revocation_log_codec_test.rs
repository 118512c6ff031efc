//! Tests of the encoding of revocation logs: what is built from a commitment, what is written, and
//! what is accepted back.

use revlog_rs::{
    codec::{framing::write_framed, tlv::FieldListWriter},
    error::{CodecError, OutputIndexTooBig},
    revocation_log::{
        record::{REV_LOG_COMMIT_TX_HASH, REV_LOG_OUR_OUTPUT_INDEX, REV_LOG_THEIR_OUTPUT_INDEX},
        HtlcEntry, RevocationLog,
    },
    types::data_types::{CryptoHash, MilliSatoshi, OutputIndex, Satoshi},
};

mod common;

use common::fixtures::{commitment, htlc, htlc_entry, revocation_log};

/// Logs with zero, one, and many HTLC entries, with and without balances, and with zero and non-zero
/// payment hashes all decode back to what was encoded.
#[test]
fn revocation_logs_round_trip() {
    let logs = vec![
        revocation_log(Vec::new(), None),
        revocation_log(Vec::new(), Some((0, 0))),
        revocation_log(vec![htlc_entry([0; 32], 0, 2)], None),
        revocation_log(
            vec![
                htlc_entry([0xab; 32], 252, 2),
                htlc_entry([0; 32], 65_535, 3),
                htlc_entry([0x01; 32], 4_294_967_296, 4),
            ],
            Some((u64::MAX, 1)),
        ),
        RevocationLog {
            our_output_index: OutputIndex::EMPTY,
            their_output_index: OutputIndex::EMPTY,
            commit_tx_hash: CryptoHash::ZERO,
            ..revocation_log((0..100).map(|i| htlc_entry([i as u8; 32], i, i as u16)).collect(), None)
        },
    ];

    for log in logs {
        assert_eq!(RevocationLog::deserialize(&log.serialize()), Ok(log));
    }
}

/// An all-zero payment hash takes no bytes, and an empty hash field decodes as the all-zero hash.
#[test]
fn zero_payment_hash_is_sparse() {
    let with_hash = htlc_entry([0x42; 32], 1_000, 2);
    let without_hash = HtlcEntry {
        r_hash: CryptoHash::ZERO,
        ..with_hash.clone()
    };
    assert!(without_hash.encoded_len() < with_hash.encoded_len());
    assert_eq!(with_hash.encoded_len() - without_hash.encoded_len(), 32);

    let mut buf = Vec::new();
    without_hash.encode(&mut buf);
    // Frame length, then tag 0 with length 0.
    assert_eq!(&buf[1..3], &[0, 0]);
    assert_eq!(HtlcEntry::decode(&buf[1..]).unwrap().r_hash, CryptoHash::ZERO);
}

/// Output indices are stored in 16 bits. `u16::MAX` is the "no output" marker and survives a round
/// trip, while anything bigger is refused.
#[test]
fn output_index_bound() {
    let commit = commitment(1, Vec::new());

    assert_eq!(
        RevocationLog::from_commitment(&commit, 65_536, 1, false),
        Err(OutputIndexTooBig(65_536))
    );
    assert_eq!(
        RevocationLog::from_commitment(&commit, 0, u32::MAX, false),
        Err(OutputIndexTooBig(u32::MAX as u64))
    );

    let log = RevocationLog::from_commitment(&commit, 65_535, 0, false).unwrap();
    assert!(log.our_output_index.is_empty());
    let decoded = RevocationLog::deserialize(&log.serialize()).unwrap();
    assert_eq!(decoded.our_output_index, OutputIndex::EMPTY);
    assert_eq!(decoded, log);
}

/// An HTLC output index over 16 bits is refused too.
#[test]
fn htlc_output_index_bound() {
    let commit = commitment(1, vec![htlc([1; 32], 5_000_000, 70_000, true)]);
    assert_eq!(
        RevocationLog::from_commitment(&commit, 0, 1, false),
        Err(OutputIndexTooBig(70_000))
    );
}

/// A missing balance and a zero balance decode differently.
#[test]
fn balances_are_optional() {
    let without_balances = revocation_log(Vec::new(), None);
    let decoded = RevocationLog::deserialize(&without_balances.serialize()).unwrap();
    assert_eq!(decoded.our_balance, None);
    assert_eq!(decoded.their_balance, None);

    let with_zero_balance = revocation_log(Vec::new(), Some((0, 7)));
    let decoded = RevocationLog::deserialize(&with_zero_balance.serialize()).unwrap();
    assert_eq!(decoded.our_balance, Some(MilliSatoshi::new(0)));
    assert_eq!(decoded.their_balance, Some(MilliSatoshi::new(7)));

    assert!(with_zero_balance.serialize().len() > without_balances.serialize().len());
}

/// The HTLC region of a record is exactly its entries' frames back-to-back.
#[test]
fn htlc_region_is_sum_of_entry_frames() {
    let entries = vec![
        htlc_entry([0x11; 32], 1_000, 2),
        htlc_entry([0x22; 32], 70_000, 3),
        htlc_entry([0; 32], 0, 4),
    ];
    let sizes: Vec<usize> = entries.iter().map(HtlcEntry::encoded_len).collect();
    assert_eq!(sizes, vec![53, 55, 19]);

    let encoded = revocation_log(entries, None).serialize();
    // A header without balances is 42 bytes, framed with a 1 byte length.
    let htlc_region = &encoded[43..];
    assert_eq!(htlc_region.len(), sizes.iter().sum::<usize>());
}

/// Dust HTLCs are left out, and amounts are archived in whole satoshis.
#[test]
fn dust_htlcs_are_skipped() {
    let commit = commitment(
        12,
        vec![
            htlc([1; 32], 2_500_999, 2, true),
            htlc([2; 32], 300_000, -1, false),
            htlc([3; 32], 9_000_000, 3, false),
        ],
    );

    let log = RevocationLog::from_commitment(&commit, 0, 1, false).unwrap();
    assert_eq!(log.htlc_entries.len(), 2);
    assert_eq!(log.htlc_entries[0].amt, Satoshi::new(2_500));
    assert_eq!(log.htlc_entries[0].output_index, OutputIndex::new(2));
    assert!(log.htlc_entries[0].incoming);
    assert_eq!(log.htlc_entries[1].r_hash, CryptoHash::new([3; 32]));
    assert_eq!(log.commit_tx_hash, commit.commit_tx_hash());
    assert_eq!(log.our_balance, Some(MilliSatoshi::new(5_000_000)));

    let log = RevocationLog::from_commitment(&commit, 0, 1, true).unwrap();
    assert_eq!(log.our_balance, None);
    assert_eq!(log.their_balance, None);
}

/// Header fields this version does not know are skipped, so that records written by later versions
/// still decode.
#[test]
fn unknown_header_fields_are_skipped() {
    let mut header = FieldListWriter::new();
    header
        .put_u16(REV_LOG_OUR_OUTPUT_INDEX, 3)
        .put_u16(REV_LOG_THEIR_OUTPUT_INDEX, 4)
        .put_hash(REV_LOG_COMMIT_TX_HASH, &CryptoHash::new([9; 32]))
        .put_raw(17, b"from the future");

    let mut value = Vec::new();
    write_framed(&mut value, &header.encode());

    let log = RevocationLog::deserialize(&value).unwrap();
    assert_eq!(log.our_output_index, OutputIndex::new(3));
    assert_eq!(log.their_output_index, OutputIndex::new(4));
    assert!(log.htlc_entries.is_empty());
}

/// Corrupted records are refused as a whole.
#[test]
fn corrupted_records_are_refused() {
    let encoded = revocation_log(vec![htlc_entry([0x11; 32], 1_000, 2)], None).serialize();

    // A trailing entry that is cut short.
    assert!(matches!(
        RevocationLog::deserialize(&encoded[..encoded.len() - 1]),
        Err(CodecError::TruncatedRecord { .. })
    ));

    // The header length written as a 3 byte varint.
    let mut non_canonical = vec![0xfd, 0x00];
    non_canonical.extend_from_slice(&encoded);
    assert_eq!(
        RevocationLog::deserialize(&non_canonical),
        Err(CodecError::NonCanonicalVarInt)
    );

    // The same field twice.
    let mut header = FieldListWriter::new();
    header.put_u16(REV_LOG_OUR_OUTPUT_INDEX, 3);
    let field = header.encode();
    let mut value = Vec::new();
    write_framed(&mut value, &[field.clone(), field].concat());
    assert_eq!(
        RevocationLog::deserialize(&value),
        Err(CodecError::DuplicateField {
            tag: REV_LOG_OUR_OUTPUT_INDEX
        })
    );

    assert!(RevocationLog::deserialize(&[]).is_err());
}
