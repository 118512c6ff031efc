/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! CSV log lines for [events](crate::events), printed at `info` level when
//! [`log_events`](crate::config::RevocationLogConfig::log_events) is set.
//!
//! Every line starts with the event name and its Unix timestamp in seconds:
//! - `PutRevocationLog, <secs>, <height>, <tx hash>, <htlc count>, <with balances>`
//! - `FetchRevocationLog, <secs>, <height>, <Current|Legacy>`
//! - `DeleteRevocationLog, <secs>`
//!
//! `<tx hash>` is the first seven Base64 characters of the commitment transaction hash.

use std::time::SystemTime;

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

use crate::events::*;

// Names of each event in PascalCase for printing:
pub const PUT_REVOCATION_LOG: &str = "PutRevocationLog";
pub const FETCH_REVOCATION_LOG: &str = "FetchRevocationLog";
pub const DELETE_REVOCATION_LOG: &str = "DeleteRevocationLog";

/// Implemented by event types. Used to get a closure that logs the event.
pub(crate) trait Logger {
    /// Returns a pointer to the default logging handler for a given event type.
    fn get_logger() -> Box<dyn Fn(&Self) + Send>;
}

impl Logger for PutRevocationLogEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |put_event: &PutRevocationLogEvent| {
            log::info!(
                "{}, {}, {}, {}, {}, {}",
                PUT_REVOCATION_LOG,
                secs_since_unix_epoch(put_event.timestamp),
                put_event.height,
                first_seven_base64_chars(put_event.commit_tx_hash.as_bytes()),
                put_event.htlc_count,
                put_event.with_balances
            )
        };
        Box::new(logger)
    }
}

impl Logger for FetchRevocationLogEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |fetch_event: &FetchRevocationLogEvent| {
            log::info!(
                "{}, {}, {}, {:?}",
                FETCH_REVOCATION_LOG,
                secs_since_unix_epoch(fetch_event.timestamp),
                fetch_event.height,
                fetch_event.format
            )
        };
        Box::new(logger)
    }
}

impl Logger for DeleteRevocationLogEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |delete_event: &DeleteRevocationLogEvent| {
            log::info!(
                "{}, {}",
                DELETE_REVOCATION_LOG,
                secs_since_unix_epoch(delete_event.timestamp)
            )
        };
        Box::new(logger)
    }
}

/// Log `event` with the default logger of its type.
pub(crate) fn log_event(event: &Event) {
    match event {
        Event::PutRevocationLog(e) => PutRevocationLogEvent::get_logger()(e),
        Event::FetchRevocationLog(e) => FetchRevocationLogEvent::get_logger()(e),
        Event::DeleteRevocationLog(e) => DeleteRevocationLogEvent::get_logger()(e),
    }
}

// Get a more readable representation of a bytesequence by base64-encoding it and taking the first 7 characters.
pub(crate) fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}

// Seconds since the Unix Epoch, or 0 for a timestamp before it.
pub(crate) fn secs_since_unix_epoch(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_prefix_is_seven_chars() {
        assert_eq!(first_seven_base64_chars(&[0u8; 32]), "AAAAAAA");
        assert_eq!(first_seven_base64_chars(&[0xff]), "/w");
    }
}
