/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Reading and writing a channel's revocation history across the current and legacy buckets.
//!
//! # Reads
//!
//! [`fetch_revocation_log_compatible`] looks up a height in the two buckets described in
//! [`variables`](crate::variables):
//! 1. If the current bucket exists and has the height, the record is returned as
//!    [`FetchedRevocationLog::Current`].
//! 2. If the current bucket does not have the height, the lookup moves on to the legacy bucket. Any
//!    other failure in the current bucket (a corrupt record, a storage error) is returned as is.
//! 3. If the legacy bucket exists, the height is looked up there and returned as
//!    [`FetchedRevocationLog::Legacy`], or [`LogEntryNotFound`](RevocationLogError::LogEntryNotFound)
//!    if it is missing there too.
//! 4. If neither bucket exists, the channel has no history:
//!    [`NoRevocationHistory`](RevocationLogError::NoRevocationHistory).
//! 5. Otherwise (only the current bucket exists, without the height):
//!    [`LogEntryNotFound`](RevocationLogError::LogEntryNotFound).
//!
//! A legacy result is read-only. Nothing here copies a legacy record into the current bucket.
//!
//! # Writes
//!
//! Writes only ever go to the current bucket, which is created on the first write. A write replaces
//! the whole record at its height.
//!
//! # Transactions
//!
//! None of these functions open or commit transactions. Callers pass in a channel bucket that belongs
//! to a transaction they manage, and are responsible for serializing updates to the same channel.

use std::{collections::BTreeSet, time::SystemTime};

use borsh::BorshDeserialize;

use crate::{
    config::RevocationLogConfig,
    error::{store_error, LogArea, RevocationLogError},
    events::{
        DeleteRevocationLogEvent, Event, FetchRevocationLogEvent, LogFormat,
        PutRevocationLogEvent,
    },
    logging::log_event,
    pluggables::{KVGet, ReadBucket, WriteBucket},
    types::{
        commitment::ChannelCommitment,
        data_types::{CommitHeight, CryptoHash},
    },
    variables::{height_from_key, log_key, REVOCATION_LOG, REVOCATION_LOG_DEPRECATED},
};

use super::record::RevocationLog;

/// A revocation log read by [`fetch_revocation_log_compatible`], tagged with the format it was
/// stored in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchedRevocationLog {
    /// Found in the current bucket.
    Current(RevocationLog),

    /// Found in the legacy bucket, as a full commitment snapshot. Read-only.
    Legacy(ChannelCommitment),
}

impl FetchedRevocationLog {
    pub fn format(&self) -> LogFormat {
        match self {
            FetchedRevocationLog::Current(_) => LogFormat::Current,
            FetchedRevocationLog::Legacy(_) => LogFormat::Legacy,
        }
    }

    /// Hash of the revoked commitment transaction, whichever format it was read in.
    pub fn commit_tx_hash(&self) -> CryptoHash {
        match self {
            FetchedRevocationLog::Current(log) => log.commit_tx_hash,
            FetchedRevocationLog::Legacy(commit) => commit.commit_tx_hash(),
        }
    }

    pub fn current(&self) -> Option<&RevocationLog> {
        match self {
            FetchedRevocationLog::Current(log) => Some(log),
            FetchedRevocationLog::Legacy(_) => None,
        }
    }

    pub fn legacy(&self) -> Option<&ChannelCommitment> {
        match self {
            FetchedRevocationLog::Current(_) => None,
            FetchedRevocationLog::Legacy(commit) => Some(commit),
        }
    }
}

/* ↓↓↓ Writes ↓↓↓ */

/// Build the revocation log for `commit` and store it in the current bucket of `chan_bucket`, under
/// `commit.commit_height`.
///
/// Fails with [`OutputIndexTooBig`](RevocationLogError::OutputIndexTooBig) without writing anything
/// if any output index does not fit in 16 bits.
pub fn put_revocation_log<B: WriteBucket>(
    chan_bucket: &mut B,
    commit: &ChannelCommitment,
    our_output_index: u32,
    their_output_index: u32,
    no_amt_data: bool,
) -> Result<RevocationLog, RevocationLogError> {
    let log =
        RevocationLog::from_commitment(commit, our_output_index, their_output_index, no_amt_data)?;
    put_log(chan_bucket, commit.commit_height, &log)?;
    Ok(log)
}

/// Store `log` in the current bucket of `chan_bucket` under `height`, replacing any record already
/// there.
pub fn put_log<B: WriteBucket>(
    chan_bucket: &mut B,
    height: CommitHeight,
    log: &RevocationLog,
) -> Result<(), RevocationLogError> {
    let mut log_bucket = chan_bucket
        .create_bucket_if_not_exists(REVOCATION_LOG)
        .map_err(store_error(LogArea::Current, Some(height)))?;

    log_bucket
        .put(&log_key(height), &log.serialize())
        .map_err(store_error(LogArea::Current, Some(height)))
}

/// Delete both the current and the legacy bucket of `chan_bucket`. Buckets that do not exist are
/// skipped, so deleting twice is not an error.
pub fn delete_log_bucket<B: WriteBucket>(chan_bucket: &mut B) -> Result<(), RevocationLogError> {
    for (name, area) in [
        (REVOCATION_LOG, LogArea::Current),
        (REVOCATION_LOG_DEPRECATED, LogArea::Legacy),
    ] {
        let exists = chan_bucket
            .nested_bucket(name)
            .map_err(store_error(LogArea::Channel, None))?
            .is_some();

        if exists {
            chan_bucket
                .delete_nested_bucket(name)
                .map_err(store_error(area, None))?;
            log::debug!("Deleted the {}", area);
        }
    }

    Ok(())
}

/* ↓↓↓ Reads ↓↓↓ */

/// Read the current-format revocation log at `height` from `log_bucket`.
pub fn fetch_revocation_log<B: KVGet>(
    log_bucket: &B,
    height: CommitHeight,
) -> Result<RevocationLog, RevocationLogError> {
    let value = log_bucket
        .get(&log_key(height))
        .map_err(store_error(LogArea::Current, Some(height)))?
        .ok_or(RevocationLogError::LogEntryNotFound { height })?;

    RevocationLog::deserialize(&value)
        .map_err(|source| RevocationLogError::Decode { height, source })
}

/// Read the legacy commitment snapshot at `height` from `legacy_bucket`.
pub fn fetch_legacy_revocation_log<B: KVGet>(
    legacy_bucket: &B,
    height: CommitHeight,
) -> Result<ChannelCommitment, RevocationLogError> {
    let value = legacy_bucket
        .get(&log_key(height))
        .map_err(store_error(LogArea::Legacy, Some(height)))?
        .ok_or(RevocationLogError::LogEntryNotFound { height })?;

    ChannelCommitment::try_from_slice(&value)
        .map_err(|source| RevocationLogError::LegacyDecode { height, source })
}

/// Read the revocation log at `height` from whichever of `chan_bucket`'s two buckets has it,
/// preferring the current one. Read the [module documentation](self) for the exact rules.
pub fn fetch_revocation_log_compatible<B: ReadBucket>(
    chan_bucket: &B,
    height: CommitHeight,
) -> Result<FetchedRevocationLog, RevocationLogError> {
    let log_bucket = chan_bucket
        .nested_bucket(REVOCATION_LOG)
        .map_err(store_error(LogArea::Channel, Some(height)))?;

    if let Some(log_bucket) = &log_bucket {
        match fetch_revocation_log(log_bucket, height) {
            Ok(log) => return Ok(FetchedRevocationLog::Current(log)),
            Err(RevocationLogError::LogEntryNotFound { .. }) => {}
            Err(err) => return Err(err),
        }
    }

    let legacy_bucket = chan_bucket
        .nested_bucket(REVOCATION_LOG_DEPRECATED)
        .map_err(store_error(LogArea::Channel, Some(height)))?;

    if let Some(legacy_bucket) = &legacy_bucket {
        log::debug!(
            "Revocation log at height {} not in the current bucket, trying the legacy bucket",
            height
        );
        return fetch_legacy_revocation_log(legacy_bucket, height).map(FetchedRevocationLog::Legacy);
    }

    if log_bucket.is_none() {
        return Err(RevocationLogError::NoRevocationHistory);
    }

    Err(RevocationLogError::LogEntryNotFound { height })
}

/// Every height that has a revocation log in either of `chan_bucket`'s buckets, in ascending order.
///
/// Keys that are not [log keys](crate::variables::log_key) are ignored.
pub fn log_heights<B: ReadBucket>(chan_bucket: &B) -> Result<Vec<CommitHeight>, RevocationLogError> {
    let mut heights = BTreeSet::new();
    let mut found_bucket = false;

    for (name, area) in [
        (REVOCATION_LOG, LogArea::Current),
        (REVOCATION_LOG_DEPRECATED, LogArea::Legacy),
    ] {
        let bucket = chan_bucket
            .nested_bucket(name)
            .map_err(store_error(LogArea::Channel, None))?;

        if let Some(bucket) = bucket {
            found_bucket = true;
            let keys = bucket.keys().map_err(store_error(area, None))?;
            heights.extend(keys.iter().filter_map(|key| height_from_key(key)));
        }
    }

    if !found_bucket {
        return Err(RevocationLogError::NoRevocationHistory);
    }

    Ok(heights.into_iter().collect())
}

/// The highest height with a revocation log, or `None` if the history exists but is empty.
pub fn log_tail_height<B: ReadBucket>(
    chan_bucket: &B,
) -> Result<Option<CommitHeight>, RevocationLogError> {
    Ok(log_heights(chan_bucket)?.last().copied())
}

/* ↓↓↓ Store ↓↓↓ */

/// Read and write handle on one channel's revocation history.
///
/// Wraps the channel's bucket (or a reference to it) and a [`RevocationLogConfig`], and emits
/// [events](crate::events) for every completed put, fetch and delete.
pub struct RevocationLogStore<B> {
    chan_bucket: B,
    config: RevocationLogConfig,
}

impl<B> RevocationLogStore<B> {
    /// Create a new `RevocationLogStore` on top of `chan_bucket`.
    pub fn new(chan_bucket: B, config: RevocationLogConfig) -> Self {
        RevocationLogStore {
            chan_bucket,
            config,
        }
    }

    /// Give back the channel bucket.
    pub fn into_inner(self) -> B {
        self.chan_bucket
    }

    fn publish(&self, event: Event) {
        if self.config.log_events {
            log_event(&event)
        }
    }
}

impl<B: ReadBucket> RevocationLogStore<B> {
    /// Read the revocation log at `height`. See [`fetch_revocation_log_compatible`].
    pub fn fetch(&self, height: CommitHeight) -> Result<FetchedRevocationLog, RevocationLogError> {
        let fetched = fetch_revocation_log_compatible(&self.chan_bucket, height)?;

        self.publish(Event::FetchRevocationLog(FetchRevocationLogEvent {
            timestamp: SystemTime::now(),
            height,
            format: fetched.format(),
        }));

        Ok(fetched)
    }

    /// See [`log_heights`].
    pub fn heights(&self) -> Result<Vec<CommitHeight>, RevocationLogError> {
        log_heights(&self.chan_bucket)
    }

    /// See [`log_tail_height`].
    pub fn tail_height(&self) -> Result<Option<CommitHeight>, RevocationLogError> {
        log_tail_height(&self.chan_bucket)
    }
}

impl<B: WriteBucket> RevocationLogStore<B> {
    /// Archive `commit`, which is being revoked. Balances are stored unless the config's
    /// `no_amt_data` is set. See [`put_revocation_log`].
    pub fn put(
        &mut self,
        commit: &ChannelCommitment,
        our_output_index: u32,
        their_output_index: u32,
    ) -> Result<RevocationLog, RevocationLogError> {
        let log = put_revocation_log(
            &mut self.chan_bucket,
            commit,
            our_output_index,
            their_output_index,
            self.config.no_amt_data,
        )?;

        self.publish_put(commit.commit_height, &log);
        Ok(log)
    }

    /// Store a pre-built `log` under `height`. See [`put_log`].
    pub fn put_log(
        &mut self,
        height: CommitHeight,
        log: &RevocationLog,
    ) -> Result<(), RevocationLogError> {
        put_log(&mut self.chan_bucket, height, log)?;
        self.publish_put(height, log);
        Ok(())
    }

    /// Delete the channel's whole revocation history. See [`delete_log_bucket`].
    pub fn delete(&mut self) -> Result<(), RevocationLogError> {
        delete_log_bucket(&mut self.chan_bucket)?;

        self.publish(Event::DeleteRevocationLog(DeleteRevocationLogEvent {
            timestamp: SystemTime::now(),
        }));

        Ok(())
    }

    fn publish_put(&self, height: CommitHeight, log: &RevocationLog) {
        self.publish(Event::PutRevocationLog(PutRevocationLogEvent {
            timestamp: SystemTime::now(),
            height,
            commit_tx_hash: log.commit_tx_hash,
            htlc_count: log.htlc_entries.len(),
            with_balances: log.our_balance.is_some() || log.their_balance.is_some(),
        }));
    }
}
