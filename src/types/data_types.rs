/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that exist only to store bytes or numbers, and do not have any major "active" behavior.

use std::fmt::{self, Debug, Display, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::OutputIndexTooBig;

/// 32-byte cryptographic hash.
///
/// Used both for payment hashes (the hash-lock of an HTLC) and for commitment transaction hashes.
/// The all-zero value, [`CryptoHash::ZERO`], is a valid "unused" sentinel for payment hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, BorshDeserialize, BorshSerialize)]
pub struct CryptoHash([u8; 32]);

impl CryptoHash {
    /// The all-zero hash.
    pub const ZERO: CryptoHash = CryptoHash([0u8; 32]);

    /// Create a new `CryptoHash` wrapping `bytes`.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get a reference to the inner bytes of this `CryptoHash`.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the all-zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl Display for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Debug for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Height of a commitment in a channel's history, i.e., the number of state updates the channel has
/// gone through when the commitment was signed.
///
/// Revocation logs are keyed by `CommitHeight` (see [`log_key`](crate::variables::log_key)).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct CommitHeight(u64);

impl CommitHeight {
    /// Create a new `CommitHeight` with an `int` inner value.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the inner `u64` value of this `CommitHeight`.
    pub const fn int(&self) -> u64 {
        self.0
    }

    /// Get the big-endian representation of the inner `u64` value of this `CommitHeight`.
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl Display for CommitHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Index of an output in a commitment transaction.
///
/// Stored on disk as a `u16`, which caps the number of outputs a revocation log can point into at
/// 65,535. Wider integers are converted through `TryFrom`, which fails with [`OutputIndexTooBig`]
/// instead of truncating.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct OutputIndex(u16);

impl OutputIndex {
    /// Sentinel meaning "this commitment has no such output", e.g., because it was trimmed as dust.
    pub const EMPTY: OutputIndex = OutputIndex(u16::MAX);

    /// Create a new `OutputIndex` wrapping `int`.
    pub const fn new(int: u16) -> Self {
        Self(int)
    }

    /// Get the inner `u16` value of this `OutputIndex`.
    pub const fn int(&self) -> u16 {
        self.0
    }

    /// Whether this is the [`EMPTY`](Self::EMPTY) sentinel.
    pub const fn is_empty(&self) -> bool {
        self.0 == u16::MAX
    }
}

impl TryFrom<u32> for OutputIndex {
    type Error = OutputIndexTooBig;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map(OutputIndex)
            .map_err(|_| OutputIndexTooBig(value as u64))
    }
}

impl TryFrom<u64> for OutputIndex {
    type Error = OutputIndexTooBig;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map(OutputIndex)
            .map_err(|_| OutputIndexTooBig(value))
    }
}

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An amount of the channel's base unit (satoshis).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshDeserialize, BorshSerialize,
)]
pub struct Satoshi(u64);

impl Satoshi {
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    pub const fn int(&self) -> u64 {
        self.0
    }
}

impl Display for Satoshi {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} sat", self.0)
    }
}

/// An amount in thousandths of a satoshi. Channel balances are tracked at this precision.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshDeserialize, BorshSerialize,
)]
pub struct MilliSatoshi(u64);

impl MilliSatoshi {
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    pub const fn int(&self) -> u64 {
        self.0
    }

    /// Convert to whole satoshis, rounding down.
    pub const fn to_satoshis(&self) -> Satoshi {
        Satoshi(self.0 / 1000)
    }
}

impl Display for MilliSatoshi {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} msat", self.0)
    }
}
