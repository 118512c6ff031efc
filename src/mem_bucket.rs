/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! A simple, volatile, in-memory implementation of [`ReadBucket`] and [`WriteBucket`].

use std::collections::BTreeMap;

use crate::pluggables::{KVGet, ReadBucket, StoreError, WriteBucket};

/// An in-memory bucket: a sorted map of key-value pairs plus a sorted map of nested buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemBucket {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    buckets: BTreeMap<Vec<u8>, MemBucket>,
}

impl MemBucket {
    /// Create a new, empty `MemBucket`.
    pub fn new() -> MemBucket {
        MemBucket::default()
    }

    /// Whether this bucket has no entries and no nested buckets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.buckets.is_empty()
    }
}

impl KVGet for MemBucket {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

impl ReadBucket for MemBucket {
    type Nested<'a> = &'a MemBucket;

    fn nested_bucket(&self, name: &[u8]) -> Result<Option<&MemBucket>, StoreError> {
        Ok(self.buckets.get(name))
    }
}

impl WriteBucket for MemBucket {
    type NestedMut<'a> = &'a mut MemBucket;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn create_bucket_if_not_exists(&mut self, name: &[u8]) -> Result<&mut MemBucket, StoreError> {
        Ok(self.buckets.entry(name.to_vec()).or_default())
    }

    fn delete_nested_bucket(&mut self, name: &[u8]) -> Result<(), StoreError> {
        self.buckets.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_buckets_are_created_once() {
        let mut root = MemBucket::new();
        root.create_bucket_if_not_exists(b"a")
            .unwrap()
            .put(b"k", b"v")
            .unwrap();
        root.create_bucket_if_not_exists(b"a")
            .unwrap()
            .put(b"k2", b"v2")
            .unwrap();

        let nested = root.nested_bucket(b"a").unwrap().unwrap();
        assert_eq!(nested.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(nested.keys().unwrap(), vec![b"k".to_vec(), b"k2".to_vec()]);
        assert!(root.get(b"k").unwrap().is_none());
    }

    #[test]
    fn deleting_a_missing_bucket_is_a_no_op() {
        let mut root = MemBucket::new();
        root.delete_nested_bucket(b"missing").unwrap();
        assert!(root.is_empty());
    }
}
