//! A channel bucket whose storage engine fails on demand.

use revlog_rs::{
    mem_bucket::MemBucket,
    pluggables::{KVGet, ReadBucket, StoreError, WriteBucket},
};

/// Wraps a [`MemBucket`]. Nested bucket lookups fail if `fail_reads` is set, and creating or
/// deleting nested buckets fails if `fail_writes` is set.
#[derive(Default)]
pub(crate) struct FailingBucket {
    pub(crate) inner: MemBucket,
    pub(crate) fail_reads: bool,
    pub(crate) fail_writes: bool,
}

fn injected_failure() -> StoreError {
    "injected storage failure".into()
}

impl KVGet for FailingBucket {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        self.inner.keys()
    }
}

impl ReadBucket for FailingBucket {
    type Nested<'a> = &'a MemBucket;

    fn nested_bucket(&self, name: &[u8]) -> Result<Option<&MemBucket>, StoreError> {
        if self.fail_reads {
            return Err(injected_failure());
        }
        self.inner.nested_bucket(name)
    }
}

impl WriteBucket for FailingBucket {
    type NestedMut<'a> = &'a mut MemBucket;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.inner.put(key, value)
    }

    fn create_bucket_if_not_exists(&mut self, name: &[u8]) -> Result<&mut MemBucket, StoreError> {
        if self.fail_writes {
            return Err(injected_failure());
        }
        self.inner.create_bucket_if_not_exists(name)
    }

    fn delete_nested_bucket(&mut self, name: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(injected_failure());
        }
        self.inner.delete_nested_bucket(name)
    }
}
