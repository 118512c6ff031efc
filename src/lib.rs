/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! A Rust implementation of the persisted revocation log of a Lightning payment channel.
//!
//! A [`RevocationLogStore`](revocation_log::RevocationLogStore) archives what is needed to punish a
//! counterparty that broadcasts a revoked commitment, using a compact, extensible record format. It
//! also reads the full commitment snapshots that older versions stored, so that channels opened
//! before the compact format existed keep their history.
//!
//! Storage is pluggable: the store works on any bucket implementing the traits in [`pluggables`].

pub mod codec;

pub mod config;

pub mod error;

pub mod events;

pub(crate) mod logging;

pub mod mem_bucket;

pub mod pluggables;

pub mod revocation_log;

pub mod types;

pub mod variables;
