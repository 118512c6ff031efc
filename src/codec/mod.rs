/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Building blocks of the current revocation log format.
//!
//! From the bottom up:
//! 1. [`var_int`]: BigSize variable-length integers.
//! 2. [`framing`]: length-prefixed payloads, read until the enclosing buffer runs out.
//! 3. [`sparse_hash`]: 32-byte hashes that are omitted when all-zero.
//! 4. [`tlv`]: typed field lists, which records are made of.
//!
//! All functions here work on in-memory buffers: writers append to a `Vec<u8>`, and readers take a
//! `&mut &[u8]` that they advance past whatever they consume.

pub mod framing;

pub mod sparse_hash;

pub mod tlv;

pub mod var_int;
