/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! BigSize variable-length integers.
//!
//! |Value|Encoding|Size|
//! |---|---|---|
//! |`0..=0xfc`|the value as a single byte|1|
//! |`0xfd..=0xffff`|`0xfd` then the value as big-endian `u16`|3|
//! |`0x10000..=0xffffffff`|`0xfe` then the value as big-endian `u32`|5|
//! |otherwise|`0xff` then the value as big-endian `u64`|9|
//!
//! Only the shortest encoding of a value is accepted on decode.

use crate::error::CodecError;

/// Append the BigSize encoding of `n` to `buf`.
pub fn write_var_int(buf: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Number of bytes [`write_var_int`] writes for `n`.
pub const fn var_int_size(n: u64) -> usize {
    if n < 0xfd {
        1
    } else if n <= 0xffff {
        3
    } else if n <= 0xffff_ffff {
        5
    } else {
        9
    }
}

/// Read a BigSize integer from the front of `reader`, advancing it.
///
/// Returns `Ok(None)` if `reader` is empty, which callers may treat as a clean end of input. Running
/// out of bytes after the discriminant byte is a [`TruncatedRecord`](CodecError::TruncatedRecord).
pub fn try_read_var_int(reader: &mut &[u8]) -> Result<Option<u64>, CodecError> {
    let (&discriminant, rest) = match reader.split_first() {
        Some(split) => split,
        None => return Ok(None),
    };
    *reader = rest;

    let (value, min) = match discriminant {
        0xfd => (u16::from_be_bytes(take_array(reader)?) as u64, 0xfd),
        0xfe => (u32::from_be_bytes(take_array(reader)?) as u64, 0x1_0000),
        0xff => (u64::from_be_bytes(take_array(reader)?), 0x1_0000_0000),
        small => return Ok(Some(small as u64)),
    };

    if value < min {
        return Err(CodecError::NonCanonicalVarInt);
    }
    Ok(Some(value))
}

/// Read a BigSize integer from the front of `reader`, treating an empty reader as truncation.
pub fn read_var_int(reader: &mut &[u8]) -> Result<u64, CodecError> {
    try_read_var_int(reader)?.ok_or(CodecError::TruncatedRecord {
        needed: 1,
        available: 0,
    })
}

/// Split exactly `N` bytes off the front of `reader`.
pub(crate) fn take_array<const N: usize>(reader: &mut &[u8]) -> Result<[u8; N], CodecError> {
    let bytes = take(reader, N as u64)?;
    let mut array = [0u8; N];
    array.copy_from_slice(bytes);
    Ok(array)
}

/// Split exactly `n` bytes off the front of `reader`.
pub(crate) fn take<'a>(reader: &mut &'a [u8], n: u64) -> Result<&'a [u8], CodecError> {
    if n > reader.len() as u64 {
        return Err(CodecError::TruncatedRecord {
            needed: n,
            available: reader.len(),
        });
    }
    let (taken, rest) = reader.split_at(n as usize);
    *reader = rest;
    Ok(taken)
}
