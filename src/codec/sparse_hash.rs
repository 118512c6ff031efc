/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Payment hashes that take no space on disk when unset.
//!
//! The all-zero hash is written as a zero-length value, and a zero-length value is read back as the
//! all-zero hash. Any other hash is written as its 32 bytes.

use crate::{error::CodecError, types::data_types::CryptoHash};

/// The bytes to store for `hash`: nothing for [`CryptoHash::ZERO`], otherwise all 32 bytes.
pub fn encode_sparse_hash(hash: &CryptoHash) -> &[u8] {
    if hash.is_zero() {
        &[]
    } else {
        hash.as_bytes()
    }
}

/// Decode the value of field `tag` written by [`encode_sparse_hash`].
pub fn decode_sparse_hash(tag: u64, value: &[u8]) -> Result<CryptoHash, CodecError> {
    match value.len() {
        0 => Ok(CryptoHash::ZERO),
        32 => {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(value);
            Ok(CryptoHash::new(bytes))
        }
        len => Err(CodecError::InvalidFieldLength {
            tag,
            len: len as u64,
        }),
    }
}
