//! Builders for the commitments and revocation logs used across the integration tests.

use borsh::BorshSerialize;

use revlog_rs::{
    mem_bucket::MemBucket,
    pluggables::WriteBucket,
    revocation_log::{HtlcEntry, RevocationLog},
    types::{
        commitment::{ChannelCommitment, Htlc},
        data_types::{CommitHeight, CryptoHash, MilliSatoshi, OutputIndex, Satoshi},
    },
    variables::{log_key, REVOCATION_LOG_DEPRECATED},
};

/// A commitment at `height` with balances of 5,000,000 and 3,000,000 msat and the given HTLCs.
pub(crate) fn commitment(height: u64, htlcs: Vec<Htlc>) -> ChannelCommitment {
    ChannelCommitment {
        commit_height: CommitHeight::new(height),
        local_log_index: height * 2,
        local_htlc_index: height,
        remote_log_index: height * 2 + 1,
        remote_htlc_index: height,
        local_balance: MilliSatoshi::new(5_000_000),
        remote_balance: MilliSatoshi::new(3_000_000),
        commit_fee: Satoshi::new(183),
        fee_per_kw: 253,
        commit_tx: [b"commit-tx-".as_slice(), &height.to_be_bytes()].concat(),
        commit_sig: vec![0x30; 71],
        htlcs,
    }
}

/// An HTLC with output index `output_index` (negative for dust).
pub(crate) fn htlc(r_hash: [u8; 32], amt_msat: u64, output_index: i32, incoming: bool) -> Htlc {
    Htlc {
        signature: vec![0x30; 72],
        r_hash: CryptoHash::new(r_hash),
        amt: MilliSatoshi::new(amt_msat),
        refund_timeout: 800_144,
        output_index,
        incoming,
        htlc_index: 0,
        log_index: 0,
    }
}

pub(crate) fn htlc_entry(r_hash: [u8; 32], amt_sat: u64, output_index: u16) -> HtlcEntry {
    HtlcEntry {
        r_hash: CryptoHash::new(r_hash),
        refund_timeout: 800_144,
        output_index: OutputIndex::new(output_index),
        incoming: output_index % 2 == 0,
        amt: Satoshi::new(amt_sat),
    }
}

pub(crate) fn revocation_log(
    htlc_entries: Vec<HtlcEntry>,
    balances: Option<(u64, u64)>,
) -> RevocationLog {
    RevocationLog {
        our_output_index: OutputIndex::new(0),
        their_output_index: OutputIndex::new(1),
        commit_tx_hash: CryptoHash::new([0x5a; 32]),
        htlc_entries,
        our_balance: balances.map(|(ours, _)| MilliSatoshi::new(ours)),
        their_balance: balances.map(|(_, theirs)| MilliSatoshi::new(theirs)),
    }
}

/// Store `commit` in the legacy bucket of `chan_bucket`, the way older versions archived it.
pub(crate) fn put_legacy(chan_bucket: &mut MemBucket, commit: &ChannelCommitment) {
    let value = commit.try_to_vec().unwrap();
    chan_bucket
        .create_bucket_if_not_exists(REVOCATION_LOG_DEPRECATED)
        .unwrap()
        .put(&log_key(commit.commit_height), &value)
        .unwrap();
}
