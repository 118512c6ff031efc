/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The revocation log record: what is archived for a channel at one revoked commitment height.
//!
//! # Encoding
//!
//! A record is a framed header [field list](crate::codec::tlv) followed by the
//! [HTLC entries](super::htlc_entry), each framed on its own:
//!
//! ```text
//! value  := varint(len(header)) ++ header ++ htlc_1 ++ htlc_2 ++ ...
//! header := field(0, u16 our_output_index)
//!        ++ field(1, u16 their_output_index)
//!        ++ field(2, [u8; 32] commit_tx_hash)
//!        ++ [field(3, varint our_balance)]      (present only if known)
//!        ++ [field(4, varint their_balance)]    (present only if known)
//! ```
//!
//! Records written before the balances were introduced have no fields 3 and 4. Whether a balance is
//! known is decided by the presence of its tag, never by its value, so `Some(0)` and `None` both
//! survive a round trip.

use crate::{
    codec::{
        framing::{read_framed, write_framed},
        tlv::{FieldList, FieldListWriter, Tag},
    },
    error::{CodecError, OutputIndexTooBig},
    types::{
        commitment::ChannelCommitment,
        data_types::{CryptoHash, MilliSatoshi, OutputIndex},
    },
};

use super::htlc_entry::{deserialize_htlc_entries, serialize_htlc_entries, HtlcEntry};

// Header fields. Adding to this list requires the new field to be optional, so that records
// written before it still decode.
pub const REV_LOG_OUR_OUTPUT_INDEX: Tag = 0;
pub const REV_LOG_THEIR_OUTPUT_INDEX: Tag = 1;
pub const REV_LOG_COMMIT_TX_HASH: Tag = 2;
pub const REV_LOG_OUR_BALANCE: Tag = 3;
pub const REV_LOG_THEIR_BALANCE: Tag = 4;

/// The information needed to build a breach retribution for one revoked commitment.
///
/// Its fields are a subset of a [`ChannelCommitment`]'s. All historical versions are stored, keyed by
/// commitment height, and never modified once written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevocationLog {
    /// Our output index in this commitment. In a remote commitment transaction, this is the to_remote
    /// output. [`OutputIndex::EMPTY`] if the output does not exist.
    pub our_output_index: OutputIndex,

    /// Their output index in this commitment. In a remote commitment transaction, this is the
    /// to_local output. [`OutputIndex::EMPTY`] if the output does not exist.
    pub their_output_index: OutputIndex,

    /// Hash of the commitment transaction.
    pub commit_tx_hash: CryptoHash,

    /// HTLCs with an output in this commitment, in the order the commitment lists them.
    pub htlc_entries: Vec<HtlcEntry>,

    /// Our balance at this height, if it was recorded.
    pub our_balance: Option<MilliSatoshi>,

    /// Their balance at this height, if it was recorded.
    pub their_balance: Option<MilliSatoshi>,
}

impl RevocationLog {
    /// Build the revocation log for a commitment that is about to be revoked.
    ///
    /// `our_output_index` and `their_output_index` are the indices of the two parties' outputs in
    /// `commit.commit_tx`, or `u16::MAX` for a missing output. Dust HTLCs are left out. Balances are
    /// recorded unless `no_amt_data` is set.
    pub fn from_commitment(
        commit: &ChannelCommitment,
        our_output_index: u32,
        their_output_index: u32,
        no_amt_data: bool,
    ) -> Result<Self, OutputIndexTooBig> {
        let our_output_index = OutputIndex::try_from(our_output_index)?;
        let their_output_index = OutputIndex::try_from(their_output_index)?;

        let mut htlc_entries = Vec::with_capacity(commit.htlcs.len());
        for htlc in &commit.htlcs {
            if let Some(entry) = HtlcEntry::from_htlc(htlc)? {
                htlc_entries.push(entry);
            }
        }

        let (our_balance, their_balance) = if no_amt_data {
            (None, None)
        } else {
            (Some(commit.local_balance), Some(commit.remote_balance))
        };

        Ok(RevocationLog {
            our_output_index,
            their_output_index,
            commit_tx_hash: commit.commit_tx_hash(),
            htlc_entries,
            our_balance,
            their_balance,
        })
    }

    fn header(&self) -> FieldListWriter {
        let mut fields = FieldListWriter::new();
        fields
            .put_u16(REV_LOG_OUR_OUTPUT_INDEX, self.our_output_index.int())
            .put_u16(REV_LOG_THEIR_OUTPUT_INDEX, self.their_output_index.int())
            .put_hash(REV_LOG_COMMIT_TX_HASH, &self.commit_tx_hash);

        if let Some(our_balance) = self.our_balance {
            fields.put_var_int(REV_LOG_OUR_BALANCE, our_balance.int());
        }
        if let Some(their_balance) = self.their_balance {
            fields.put_var_int(REV_LOG_THEIR_BALANCE, their_balance.int());
        }

        fields
    }

    /// Encode this record into the value stored under its height key.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_framed(&mut buf, &self.header().encode());
        serialize_htlc_entries(&mut buf, &self.htlc_entries);
        buf
    }

    /// Decode a record from the complete value stored under its height key.
    ///
    /// `value` must be exactly the stored value: everything after the header is read as HTLC entries.
    pub fn deserialize(value: &[u8]) -> Result<Self, CodecError> {
        let mut reader = value;
        let header = read_framed(&mut reader)?.ok_or(CodecError::TruncatedRecord {
            needed: 1,
            available: 0,
        })?;
        let fields = FieldList::parse(header)?;

        Ok(RevocationLog {
            our_output_index: OutputIndex::new(
                fields.required(REV_LOG_OUR_OUTPUT_INDEX, FieldList::u16)?,
            ),
            their_output_index: OutputIndex::new(
                fields.required(REV_LOG_THEIR_OUTPUT_INDEX, FieldList::u16)?,
            ),
            commit_tx_hash: fields.required(REV_LOG_COMMIT_TX_HASH, FieldList::hash)?,
            our_balance: fields.var_int(REV_LOG_OUR_BALANCE)?.map(MilliSatoshi::new),
            their_balance: fields.var_int(REV_LOG_THEIR_BALANCE)?.map(MilliSatoshi::new),
            htlc_entries: deserialize_htlc_entries(reader)?,
        })
    }
}
