// Copyright 2025 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thread-safe handle around an [`AvailabilityIndex`]
//!
//! Writes are serialized through a single writer lock, so no reader can
//! observe a torn range booking. Reads run concurrently with each other.
//! All operations are synchronous and bounded; nothing here suspends or
//! performs I/O.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::entity::EntityId;
use crate::error::Result;
use crate::index::AvailabilityIndex;
use crate::predicate::Predicate;

/// Cloneable handle; clones share the same underlying index.
#[derive(Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<AvailabilityIndex>>,
}

impl SharedIndex {
    pub fn new(index: AvailabilityIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Shared read access. Hold guards briefly; a pending writer blocks
    /// later readers.
    pub fn read(&self) -> RwLockReadGuard<'_, AvailabilityIndex> {
        self.inner.read()
    }

    /// Exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, AvailabilityIndex> {
        self.inner.write()
    }

    pub fn register(&self, name: impl Into<String>, horizon_bits: usize) -> Result<EntityId> {
        self.inner.write().register(name, horizon_bits)
    }

    pub fn deregister(&self, name: &str) -> Result<()> {
        self.inner.write().deregister(name)
    }

    pub fn book(&self, name: &str, start: usize, end: usize) -> Result<usize> {
        self.inner.write().book(name, start, end)
    }

    pub fn unbook(&self, name: &str, start: usize, end: usize) -> Result<usize> {
        self.inner.write().unbook(name, start, end)
    }

    /// Matching entity names, collected under a read lock.
    pub fn query(&self, predicate: &Predicate) -> Vec<String> {
        self.inner
            .read()
            .query(predicate)
            .map(str::to_string)
            .collect()
    }
}
