/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Errors returned by the revocation log codec and store.
//!
//! Codec errors ([`CodecError`]) always fail the decode of the whole record: there is no
//! best-effort decoding of a corrupted record. Store errors ([`RevocationLogError`]) add the
//! context of which [storage area](LogArea) and height was being accessed.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::{pluggables::StoreError, types::data_types::CommitHeight};

/// Error when an output index does not fit in the 16 bits a revocation log stores it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("output index {0} is over uint16")]
pub struct OutputIndexTooBig(pub u64);

/// Error when encoding or decoding a current-format revocation log record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes are available than a declared length demands.
    #[error("record truncated: needed {needed} bytes but only {available} remain")]
    TruncatedRecord { needed: u64, available: usize },

    /// A fixed-size field was declared with a length it cannot have.
    #[error("field {tag} has invalid length {len}")]
    InvalidFieldLength { tag: u64, len: u64 },

    /// A varint was not encoded in its shortest form.
    #[error("decoded varint is not canonical")]
    NonCanonicalVarInt,

    /// The same field tag appeared twice in one field list.
    #[error("field {tag} appears more than once")]
    DuplicateField { tag: u64 },

    /// A field that every record carries is missing.
    #[error("mandatory field {tag} is missing")]
    MissingField { tag: u64 },

    /// A field has the right length but a value outside its domain (e.g., a bool that is not 0 or 1).
    #[error("field {tag} has invalid value")]
    InvalidFieldValue { tag: u64 },
}

/// The two storage areas a channel's revocation history can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogArea {
    /// The current-format bucket. Canonical, and the only one ever written to.
    Current,

    /// The deprecated bucket of full commitment snapshots. Read-only.
    Legacy,

    /// The per-channel bucket that contains both areas.
    Channel,
}

impl Display for LogArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogArea::Current => write!(f, "current revocation log bucket"),
            LogArea::Legacy => write!(f, "legacy revocation log bucket"),
            LogArea::Channel => write!(f, "channel bucket"),
        }
    }
}

/// Error when reading from or writing to a channel's revocation history.
#[derive(Debug, Error)]
pub enum RevocationLogError {
    #[error(transparent)]
    OutputIndexTooBig(#[from] OutputIndexTooBig),

    /// The channel has revocation history, but not at the requested height.
    #[error("log entry not found at height {height}")]
    LogEntryNotFound { height: CommitHeight },

    /// Neither storage area exists for the channel: it has not been revoked even once yet.
    #[error("channel has no revocation history")]
    NoRevocationHistory,

    /// A current-format record could not be decoded.
    #[error("failed to decode revocation log at height {height}: {source}")]
    Decode {
        height: CommitHeight,
        #[source]
        source: CodecError,
    },

    /// A legacy commitment snapshot could not be decoded.
    #[error("failed to decode legacy revocation log at height {height}: {source}")]
    LegacyDecode {
        height: CommitHeight,
        #[source]
        source: std::io::Error,
    },

    /// The storage engine failed.
    #[error("storage error in {area} (height: {height:?}): {source}")]
    Store {
        area: LogArea,
        height: Option<CommitHeight>,
        #[source]
        source: StoreError,
    },
}

impl RevocationLogError {
    /// Whether this error says a specific height is missing while the channel's history exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RevocationLogError::LogEntryNotFound { .. })
    }
}

/// Wrap a storage error with the area and height being accessed.
pub(crate) fn store_error(
    area: LogArea,
    height: Option<CommitHeight>,
) -> impl FnOnce(StoreError) -> RevocationLogError {
    move |source| RevocationLogError::Store {
        area,
        height,
        source,
    }
}
