/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Names and keys that specify where revocation logs are stored in the user-provided key-value store.
//!
//! # Layout
//!
//! Every channel has its own bucket, owned by the caller. Inside it, the revocation history lives in
//! up to two nested buckets:
//!
//! |Bucket|Name|Key|Value|
//! |---|---|---|---|
//! |Current|[`REVOCATION_LOG`]|[`log_key`] of the commitment height|[`RevocationLog`](crate::revocation_log::RevocationLog), in its TLV encoding|
//! |Legacy|[`REVOCATION_LOG_DEPRECATED`]|[`log_key`] of the commitment height|[`ChannelCommitment`](crate::types::commitment::ChannelCommitment), Borsh-serialized|
//!
//! The current bucket is created on the first write. The legacy bucket is never written to; it only
//! exists for channels whose history predates the current format and was never migrated.
//!
//! # Keys
//!
//! Keys are the big-endian encoding of the commitment height. Since buckets iterate in byte order,
//! this makes a bucket's keys sort in the same order as the heights they encode.

use crate::types::data_types::CommitHeight;

/// Name of the bucket that stores revocation logs in the current format.
pub const REVOCATION_LOG: &[u8] = b"revocation-log";

/// Name of the bucket that stores full commitment snapshots in the legacy format. Read-only.
pub const REVOCATION_LOG_DEPRECATED: &[u8] = b"revocation-log-key";

/// Key of the revocation log for `height`.
pub const fn log_key(height: CommitHeight) -> [u8; 8] {
    height.to_be_bytes()
}

/// Height encoded in `key`, or `None` if `key` is not a [`log_key`].
pub fn height_from_key(key: &[u8]) -> Option<CommitHeight> {
    let bytes: [u8; 8] = key.try_into().ok()?;
    Some(CommitHeight::new(u64::from_be_bytes(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_sort_like_heights() {
        let heights = [0u64, 1, 255, 256, 65_536, u32::MAX as u64 + 1, u64::MAX];
        let keys: Vec<[u8; 8]> = heights
            .iter()
            .map(|h| log_key(CommitHeight::new(*h)))
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        for (height, key) in heights.iter().zip(keys.iter()) {
            assert_eq!(height_from_key(key), Some(CommitHeight::new(*height)));
        }
    }

    #[test]
    fn key_is_big_endian() {
        assert_eq!(
            log_key(CommitHeight::new(0x0102)),
            [0, 0, 0, 0, 0, 0, 0x01, 0x02]
        );
        assert_eq!(height_from_key(&[1, 2, 3]), None);
    }
}
