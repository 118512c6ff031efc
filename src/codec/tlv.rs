/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Typed field lists (TLV streams).
//!
//! A field list is a sequence of fields, each encoded as `varint(tag) ++ varint(len) ++ value`.
//! [`FieldListWriter`] always emits fields in ascending tag order, so the same record always encodes
//! to the same bytes. [`FieldList`] accepts fields in any order and skips tags it does not know
//! about, so records written by a newer version that adds fields can still be read.
//!
//! Decoding happens in two steps: [`FieldList::parse`] splits the bytes into a map from tag to raw
//! value, then the typed getters project the known tags into values.

use std::collections::BTreeMap;

use super::{
    sparse_hash::{decode_sparse_hash, encode_sparse_hash},
    var_int::{read_var_int, take, try_read_var_int, var_int_size, write_var_int},
};
use crate::{error::CodecError, types::data_types::CryptoHash};

/// Numeric tag identifying a field within a record.
pub type Tag = u64;

/// Builder for the encoding of a field list.
#[derive(Clone, Debug, Default)]
pub struct FieldListWriter(BTreeMap<Tag, Vec<u8>>);

impl FieldListWriter {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the raw value of field `tag`, replacing any value set before.
    pub fn put_raw(&mut self, tag: Tag, value: &[u8]) -> &mut Self {
        self.0.insert(tag, value.to_vec());
        self
    }

    pub fn put_u16(&mut self, tag: Tag, value: u16) -> &mut Self {
        self.put_raw(tag, &value.to_be_bytes())
    }

    pub fn put_u32(&mut self, tag: Tag, value: u32) -> &mut Self {
        self.put_raw(tag, &value.to_be_bytes())
    }

    pub fn put_bool(&mut self, tag: Tag, value: bool) -> &mut Self {
        self.put_raw(tag, &[value as u8])
    }

    pub fn put_hash(&mut self, tag: Tag, value: &CryptoHash) -> &mut Self {
        self.put_raw(tag, value.as_bytes())
    }

    /// Set field `tag` to the [sparse encoding](super::sparse_hash) of `value`.
    pub fn put_sparse_hash(&mut self, tag: Tag, value: &CryptoHash) -> &mut Self {
        self.put_raw(tag, encode_sparse_hash(value))
    }

    /// Set field `tag` to the varint encoding of `value`.
    pub fn put_var_int(&mut self, tag: Tag, value: u64) -> &mut Self {
        let mut bytes = Vec::with_capacity(var_int_size(value));
        write_var_int(&mut bytes, value);
        self.put_raw(tag, &bytes)
    }

    /// Encode all fields, in ascending tag order.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        for (tag, value) in &self.0 {
            write_var_int(&mut buf, *tag);
            write_var_int(&mut buf, value.len() as u64);
            buf.extend_from_slice(value);
        }
        buf
    }

    /// Number of bytes [`encode`](Self::encode) will produce.
    pub fn encoded_len(&self) -> usize {
        self.0
            .iter()
            .map(|(tag, value)| {
                var_int_size(*tag) + var_int_size(value.len() as u64) + value.len()
            })
            .sum()
    }
}

/// A decoded field list: a mapping from tag to the raw bytes of its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldList<'a>(BTreeMap<Tag, &'a [u8]>);

impl<'a> FieldList<'a> {
    /// Split `bytes` into fields. Every byte of `bytes` must belong to a field.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CodecError> {
        let mut reader = bytes;
        let mut fields = BTreeMap::new();
        while let Some(tag) = try_read_var_int(&mut reader)? {
            let len = read_var_int(&mut reader)?;
            let value = take(&mut reader, len)?;
            if fields.insert(tag, value).is_some() {
                return Err(CodecError::DuplicateField { tag });
            }
        }
        Ok(Self(fields))
    }

    /// The raw value of field `tag`, if present.
    pub fn raw(&self, tag: Tag) -> Option<&'a [u8]> {
        self.0.get(&tag).copied()
    }

    /// Iterate over the tags present, in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.keys().copied()
    }

    pub fn u16(&self, tag: Tag) -> Result<Option<u16>, CodecError> {
        self.fixed::<2>(tag).map(|v| v.map(u16::from_be_bytes))
    }

    pub fn u32(&self, tag: Tag) -> Result<Option<u32>, CodecError> {
        self.fixed::<4>(tag).map(|v| v.map(u32::from_be_bytes))
    }

    pub fn bool(&self, tag: Tag) -> Result<Option<bool>, CodecError> {
        match self.fixed::<1>(tag)? {
            None => Ok(None),
            Some([0]) => Ok(Some(false)),
            Some([1]) => Ok(Some(true)),
            Some(_) => Err(CodecError::InvalidFieldValue { tag }),
        }
    }

    pub fn hash(&self, tag: Tag) -> Result<Option<CryptoHash>, CodecError> {
        self.fixed::<32>(tag).map(|v| v.map(CryptoHash::new))
    }

    pub fn sparse_hash(&self, tag: Tag) -> Result<Option<CryptoHash>, CodecError> {
        self.raw(tag)
            .map(|value| decode_sparse_hash(tag, value))
            .transpose()
    }

    /// Decode field `tag` as a varint. The value must consist of exactly one canonical varint.
    pub fn var_int(&self, tag: Tag) -> Result<Option<u64>, CodecError> {
        let Some(value) = self.raw(tag) else {
            return Ok(None);
        };
        let invalid_length = CodecError::InvalidFieldLength {
            tag,
            len: value.len() as u64,
        };

        let mut reader = value;
        let decoded = match try_read_var_int(&mut reader) {
            Ok(Some(decoded)) => decoded,
            Ok(None) | Err(CodecError::TruncatedRecord { .. }) => return Err(invalid_length),
            Err(err) => return Err(err),
        };
        if !reader.is_empty() {
            return Err(invalid_length);
        }
        Ok(Some(decoded))
    }

    /// Like the other getters, but fails with [`MissingField`](CodecError::MissingField) if the
    /// field is absent.
    pub fn required<T>(
        &self,
        tag: Tag,
        getter: impl FnOnce(&Self, Tag) -> Result<Option<T>, CodecError>,
    ) -> Result<T, CodecError> {
        getter(self, tag)?.ok_or(CodecError::MissingField { tag })
    }

    fn fixed<const N: usize>(&self, tag: Tag) -> Result<Option<[u8; N]>, CodecError> {
        let Some(value) = self.raw(tag) else {
            return Ok(None);
        };
        <[u8; N]>::try_from(value)
            .map(Some)
            .map_err(|_| CodecError::InvalidFieldLength {
                tag,
                len: value.len() as u64,
            })
    }
}
