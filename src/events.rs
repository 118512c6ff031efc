/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions of the events emitted by the [revocation log store](crate::revocation_log::store).
//!
//! Note: an event for a given action indicates that the action has been completed.

use std::time::SystemTime;

use crate::types::data_types::{CommitHeight, CryptoHash};

pub enum Event {
    PutRevocationLog(PutRevocationLogEvent),
    FetchRevocationLog(FetchRevocationLogEvent),
    DeleteRevocationLog(DeleteRevocationLogEvent),
}

/// A revocation log was written to the current bucket.
pub struct PutRevocationLogEvent {
    pub timestamp: SystemTime,
    pub height: CommitHeight,
    pub commit_tx_hash: CryptoHash,
    pub htlc_count: usize,
    /// Whether the balances were stored along with the log.
    pub with_balances: bool,
}

/// Which of the two formats a fetched revocation log was read in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Current,
    Legacy,
}

/// A revocation log was read.
pub struct FetchRevocationLogEvent {
    pub timestamp: SystemTime,
    pub height: CommitHeight,
    pub format: LogFormat,
}

/// A channel's revocation history was deleted.
pub struct DeleteRevocationLogEvent {
    pub timestamp: SystemTime,
}
