/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Traits for pluggable revocation log persistence.
//!
//! The revocation log does not own a database. Callers hand it the bucket of the channel whose
//! history is being accessed, already scoped to a transaction they opened and will commit. The traits
//! in this module describe what such a bucket must offer:
//! - [`KVGet`]: point reads and key listing.
//! - [`ReadBucket`]: opening nested buckets for reading.
//! - [`WriteBucket`]: writes, and creating and deleting nested buckets.
//!
//! Both traits are implemented for `&B` and `&mut B`, so a caller can lend its bucket to a
//! [`RevocationLogStore`](crate::revocation_log::store::RevocationLogStore) without giving it up.
//!
//! [`MemBucket`](crate::mem_bucket::MemBucket) is a volatile, in-memory implementation.

/// Error produced by the storage engine. Passed through to callers with added context, never retried.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Point reads from a bucket.
pub trait KVGet {
    /// Get the value stored under `key`. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Get every key in the bucket (not including nested bucket names), in ascending byte order.
    fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError>;
}

/// A bucket that may contain nested buckets.
pub trait ReadBucket: KVGet {
    type Nested<'a>: ReadBucket
    where
        Self: 'a;

    /// Open the nested bucket called `name`, if it exists.
    fn nested_bucket(&self, name: &[u8]) -> Result<Option<Self::Nested<'_>>, StoreError>;
}

/// A bucket that can be written to.
pub trait WriteBucket: ReadBucket {
    type NestedMut<'a>: WriteBucket
    where
        Self: 'a;

    /// Store `value` under `key`, replacing any existing value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Open the nested bucket called `name` for writing, creating it if it does not exist.
    fn create_bucket_if_not_exists(&mut self, name: &[u8])
        -> Result<Self::NestedMut<'_>, StoreError>;

    /// Delete the nested bucket called `name` and everything in it. Deleting a bucket that does not
    /// exist is a no-op.
    fn delete_nested_bucket(&mut self, name: &[u8]) -> Result<(), StoreError>;
}

impl<B: KVGet + ?Sized> KVGet for &B {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        (**self).keys()
    }
}

impl<B: KVGet + ?Sized> KVGet for &mut B {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        (**self).keys()
    }
}

impl<B: ReadBucket> ReadBucket for &B {
    type Nested<'a> = B::Nested<'a> where Self: 'a;

    fn nested_bucket(&self, name: &[u8]) -> Result<Option<Self::Nested<'_>>, StoreError> {
        (**self).nested_bucket(name)
    }
}

impl<B: ReadBucket> ReadBucket for &mut B {
    type Nested<'a> = B::Nested<'a> where Self: 'a;

    fn nested_bucket(&self, name: &[u8]) -> Result<Option<Self::Nested<'_>>, StoreError> {
        (**self).nested_bucket(name)
    }
}

impl<B: WriteBucket> WriteBucket for &mut B {
    type NestedMut<'a> = B::NestedMut<'a> where Self: 'a;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn create_bucket_if_not_exists(
        &mut self,
        name: &[u8],
    ) -> Result<Self::NestedMut<'_>, StoreError> {
        (**self).create_bucket_if_not_exists(name)
    }

    fn delete_nested_bucket(&mut self, name: &[u8]) -> Result<(), StoreError> {
        (**self).delete_nested_bucket(name)
    }
}
