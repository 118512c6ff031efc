/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The minimal per-HTLC data archived with every revoked commitment.
//!
//! # Encoding
//!
//! Each [`HtlcEntry`] is a [field list](crate::codec::tlv) framed as one unit:
//!
//! |Tag|Field|Value|
//! |---|---|---|
//! |0|`r_hash`|[sparse hash](crate::codec::sparse_hash): 0 or 32 bytes, absent read as zero|
//! |1|`refund_timeout`|`u32`, big-endian|
//! |2|`output_index`|`u16`, big-endian|
//! |3|`incoming`|1 byte, 0 or 1|
//! |4|`amt`|varint|
//!
//! A list of entries is the entries' frames written back-to-back with no count prefix. The list ends
//! where the enclosing buffer ends.
//!
//! # Size
//!
//! The framed size of an entry depends only on whether its payment hash is set and on the magnitude
//! of its amount:
//!
//! |Hash empty|Amt <= 252|Amt <= 65,535|Amt <= 4,294,967,295|otherwise|
//! |:-:|:-:|:-:|:-:|:-:|
//! |true|19|21|23|27|
//! |false|51|53|55|59|

use crate::{
    codec::{
        framing::{framed_len, read_framed, write_framed},
        tlv::{FieldList, FieldListWriter, Tag},
    },
    error::{CodecError, OutputIndexTooBig},
    types::{
        commitment::Htlc,
        data_types::{CryptoHash, OutputIndex, Satoshi},
    },
};

pub const HTLC_ENTRY_R_HASH: Tag = 0;
pub const HTLC_ENTRY_REFUND_TIMEOUT: Tag = 1;
pub const HTLC_ENTRY_OUTPUT_INDEX: Tag = 2;
pub const HTLC_ENTRY_INCOMING: Tag = 3;
pub const HTLC_ENTRY_AMT: Tag = 4;

/// An HTLC that was pending at a revoked commitment height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtlcEntry {
    /// Payment hash of the HTLC. [`CryptoHash::ZERO`] if unknown, in which case it takes no space.
    pub r_hash: CryptoHash,

    /// Absolute block height after which the sender can reclaim the funds.
    pub refund_timeout: u32,

    /// Index of the HTLC's output in the commitment transaction.
    pub output_index: OutputIndex,

    /// Whether the local party is the receiver of this HTLC.
    pub incoming: bool,

    /// Amount escrowed by the HTLC.
    pub amt: Satoshi,
}

impl HtlcEntry {
    /// Build the entry to archive for `htlc`.
    ///
    /// Returns `Ok(None)` for dust HTLCs, which have no output in the commitment transaction and
    /// therefore nothing to sweep.
    pub fn from_htlc(htlc: &Htlc) -> Result<Option<Self>, OutputIndexTooBig> {
        if htlc.is_dust() {
            return Ok(None);
        }

        Ok(Some(HtlcEntry {
            r_hash: htlc.r_hash,
            refund_timeout: htlc.refund_timeout,
            output_index: OutputIndex::try_from(htlc.output_index as u32)?,
            incoming: htlc.incoming,
            amt: htlc.amt.to_satoshis(),
        }))
    }

    fn to_field_list(&self) -> FieldListWriter {
        let mut fields = FieldListWriter::new();
        fields
            .put_sparse_hash(HTLC_ENTRY_R_HASH, &self.r_hash)
            .put_u32(HTLC_ENTRY_REFUND_TIMEOUT, self.refund_timeout)
            .put_u16(HTLC_ENTRY_OUTPUT_INDEX, self.output_index.int())
            .put_bool(HTLC_ENTRY_INCOMING, self.incoming)
            .put_var_int(HTLC_ENTRY_AMT, self.amt.int());
        fields
    }

    fn from_field_list(fields: &FieldList) -> Result<Self, CodecError> {
        Ok(HtlcEntry {
            r_hash: fields
                .sparse_hash(HTLC_ENTRY_R_HASH)?
                .unwrap_or(CryptoHash::ZERO),
            refund_timeout: fields.required(HTLC_ENTRY_REFUND_TIMEOUT, FieldList::u32)?,
            output_index: OutputIndex::new(
                fields.required(HTLC_ENTRY_OUTPUT_INDEX, FieldList::u16)?,
            ),
            incoming: fields.required(HTLC_ENTRY_INCOMING, FieldList::bool)?,
            amt: Satoshi::new(fields.required(HTLC_ENTRY_AMT, FieldList::var_int)?),
        })
    }

    /// Append the framed encoding of this entry to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        write_framed(buf, &self.to_field_list().encode());
    }

    /// Number of bytes [`encode`](Self::encode) appends.
    pub fn encoded_len(&self) -> usize {
        framed_len(self.to_field_list().encoded_len())
    }

    /// Decode one entry from the unframed field-list bytes of a record.
    pub fn decode(record: &[u8]) -> Result<Self, CodecError> {
        Self::from_field_list(&FieldList::parse(record)?)
    }
}

/// Append every entry in `htlcs`, each framed on its own, to `buf`.
pub fn serialize_htlc_entries(buf: &mut Vec<u8>, htlcs: &[HtlcEntry]) {
    for htlc in htlcs {
        htlc.encode(buf);
    }
}

/// Decode entries until `reader` is exhausted.
///
/// `reader` must end exactly where the list ends: a partial entry at the end is a
/// [`TruncatedRecord`](CodecError::TruncatedRecord), not the end of the list.
pub fn deserialize_htlc_entries(mut reader: &[u8]) -> Result<Vec<HtlcEntry>, CodecError> {
    let mut htlcs = Vec::new();
    while let Some(record) = read_framed(&mut reader)? {
        htlcs.push(HtlcEntry::decode(record)?);
    }
    Ok(htlcs)
}
