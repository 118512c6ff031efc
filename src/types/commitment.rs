/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Channel commitment snapshots handed to the revocation log by the channel state machine.
//!
//! A [`ChannelCommitment`] is the full picture of one side's commitment transaction at a given
//! [height](CommitHeight). When a commitment is revoked, only a small subset of it is archived as a
//! [`RevocationLog`](crate::revocation_log::RevocationLog).
//!
//! # Legacy snapshot format
//!
//! Before the compact revocation log existed, the whole `ChannelCommitment` was archived for every
//! height. Those snapshots are the Borsh serialization of this type, and they are still read (never
//! written) from the [legacy bucket](crate::variables::REVOCATION_LOG_DEPRECATED) for channels whose
//! history was never migrated.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};

use super::data_types::{CommitHeight, CryptoHash, MilliSatoshi, Satoshi};

/// A snapshot of a channel's commitment transaction and the state it commits to.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ChannelCommitment {
    /// The update number of this commitment.
    pub commit_height: CommitHeight,

    /// Index of the local update log at the time this commitment was created.
    pub local_log_index: u64,

    /// Next HTLC index the local party will use.
    pub local_htlc_index: u64,

    /// Index of the remote update log at the time this commitment was created.
    pub remote_log_index: u64,

    /// Next HTLC index the remote party will use.
    pub remote_htlc_index: u64,

    /// Balance directly spendable by the local party at this height.
    pub local_balance: MilliSatoshi,

    /// Balance directly spendable by the remote party at this height.
    pub remote_balance: MilliSatoshi,

    /// Fee paid by the commitment transaction.
    pub commit_fee: Satoshi,

    /// Fee rate the commitment transaction was built with, in sat per kiloweight.
    pub fee_per_kw: u64,

    /// The serialized commitment transaction.
    pub commit_tx: Vec<u8>,

    /// The counterparty's signature for the commitment transaction.
    pub commit_sig: Vec<u8>,

    /// HTLCs active at this height, including dust HTLCs that have no output of their own.
    pub htlcs: Vec<Htlc>,
}

impl ChannelCommitment {
    /// Hash of the commitment transaction: the double SHA-256 of [`commit_tx`](Self::commit_tx).
    pub fn commit_tx_hash(&self) -> CryptoHash {
        let first = Sha256::digest(&self.commit_tx);
        let second: [u8; 32] = Sha256::digest(first).into();
        CryptoHash::new(second)
    }
}

/// An HTLC as tracked by the channel state machine.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Htlc {
    /// Signature for the second-level HTLC transaction.
    pub signature: Vec<u8>,

    /// The payment hash this HTLC is locked to.
    pub r_hash: CryptoHash,

    /// Amount escrowed by this HTLC.
    pub amt: MilliSatoshi,

    /// Absolute block height after which the sender may reclaim the funds.
    pub refund_timeout: u32,

    /// Index of the HTLC output in the commitment transaction, or a negative number if the HTLC is
    /// dust and has no output.
    pub output_index: i32,

    /// Whether the local party is the receiver of this HTLC.
    pub incoming: bool,

    /// HTLC index as assigned by the party that offered it.
    pub htlc_index: u64,

    /// Position of the HTLC's add in the update log.
    pub log_index: u64,
}

impl Htlc {
    /// Whether this HTLC is too small to have its own output in the commitment transaction.
    pub fn is_dust(&self) -> bool {
        self.output_index < 0
    }
}
