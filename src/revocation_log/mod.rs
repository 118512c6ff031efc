/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The per-channel archive of revoked commitments.
//!
//! Every time a channel state is revoked, a compact [`RevocationLog`] is stored for it, keyed by its
//! commitment height. If the counterparty later broadcasts that revoked state, the log is what the
//! breach retribution is built from.
//!
//! This module is split into:
//! - [`htlc_entry`]: the per-HTLC part of a log.
//! - [`record`]: the log itself and its encoding.
//! - [`store`]: reading and writing logs in a channel bucket, including the fallback to logs stored in
//!   the legacy format.

pub mod htlc_entry;

pub mod record;

pub mod store;

pub use htlc_entry::HtlcEntry;
pub use record::RevocationLog;
pub use store::{FetchedRevocationLog, RevocationLogStore};
