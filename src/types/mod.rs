/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types used across the revocation log.
//!
//! - [`data_types`]: newtypes around bytes and integers (hashes, heights, amounts, output indices).
//! - [`commitment`]: the channel commitment snapshots that revocation logs are derived from, which
//!   are also the legacy on-disk format.

pub mod commitment;

pub mod data_types;
