/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Length-prefixed framing of byte payloads.
//!
//! A framed payload is `varint(len(payload)) ++ payload`. Framing lets several records sit
//! back-to-back in one buffer without a count or separator: a reader consumes frames until the
//! buffer is exhausted.

use super::var_int::{take, try_read_var_int, var_int_size, write_var_int};
use crate::error::CodecError;

/// Append `payload` to `buf`, prefixed by its length.
pub fn write_framed(buf: &mut Vec<u8>, payload: &[u8]) {
    write_var_int(buf, payload.len() as u64);
    buf.extend_from_slice(payload);
}

/// Number of bytes [`write_framed`] writes for a payload of `payload_len` bytes.
pub const fn framed_len(payload_len: usize) -> usize {
    var_int_size(payload_len as u64) + payload_len
}

/// Read one framed payload from the front of `reader`, advancing it past the frame.
///
/// Returns `Ok(None)` if `reader` was already empty: no more frames. A length prefix that is cut
/// short, or a payload shorter than its declared length, is a
/// [`TruncatedRecord`](CodecError::TruncatedRecord).
pub fn read_framed<'a>(reader: &mut &'a [u8]) -> Result<Option<&'a [u8]>, CodecError> {
    let len = match try_read_var_int(reader)? {
        Some(len) => len,
        None => return Ok(None),
    };
    take(reader, len).map(Some)
}
