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

//! AvailabilityIndex: central entity and bitset storage
//!
//! Maps caller-supplied entity names to fixed-horizon bitsets and answers
//! bitwise predicate queries over them. Records live in a slotmap arena with
//! stable generational keys; the name table only holds keys, never a second
//! copy of a bitset. Explicit state object, no module-level registry.

use ahash::AHashMap;
use slotmap::SlotMap;

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::bitset::BitSet;
use crate::entity::{EntityId, EntityRecord};
use crate::error::{GridError, Result};
use crate::predicate::Predicate;
use crate::query::{BitIndex, QueryIter};

/// One non-leap year of hours, the horizon from the scheduling use case.
pub const HOURS_PER_YEAR: usize = 8760;

/// Central availability index
#[derive(Debug)]
pub struct AvailabilityIndex {
    /// Entity records keyed by SlotMap IDs
    records: SlotMap<EntityId, EntityRecord>,

    /// Caller-supplied names to arena keys
    by_name: AHashMap<String, EntityId>,

    /// Optional per-bit inverted lists for candidate pruning
    bit_index: Option<BitIndex>,
}

impl AvailabilityIndex {
    /// Create an empty index that answers every query with a linear scan.
    pub fn new() -> Self {
        Self {
            records: SlotMap::with_key(),
            by_name: AHashMap::new(),
            bit_index: None,
        }
    }

    /// Create an empty index that also maintains per-bit inverted lists so
    /// `AnySet`/`AllSet` queries scan candidates instead of every entity.
    /// Result sets are identical either way.
    pub fn with_bit_index() -> Self {
        Self {
            records: SlotMap::with_key(),
            by_name: AHashMap::new(),
            bit_index: Some(BitIndex::new()),
        }
    }

    /// Whether this index maintains the inverted bit index.
    pub fn is_indexed(&self) -> bool {
        self.bit_index.is_some()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered entity names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Register `name` with a zero-initialized bitset of `horizon_bits` bits.
    pub fn register(&mut self, name: impl Into<String>, horizon_bits: usize) -> Result<EntityId> {
        let name = name.into();

        #[cfg(feature = "profiling")]
        let span = info_span!("index.register", entity = %name, horizon_bits);
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        if self.by_name.contains_key(&name) {
            return Err(GridError::DuplicateEntity(name));
        }
        let bits = BitSet::new(horizon_bits)?;
        let id = self.records.insert(EntityRecord {
            name: name.clone(),
            bits,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Remove `name` and its bitset. Any inverted-list postings for the
    /// entity are dropped with it.
    pub fn deregister(&mut self, name: &str) -> Result<()> {
        let id = self
            .by_name
            .remove(name)
            .ok_or_else(|| GridError::NotFound(name.to_string()))?;
        let record = self.records.remove(id);
        if let (Some(bit_index), Some(record)) = (&mut self.bit_index, record) {
            bit_index.remove_entity(id, &record.bits);
        }
        Ok(())
    }

    /// Mark hours `[start, end)` as booked. Returns the number of hours that
    /// were previously free. An invalid range leaves the bitset unchanged.
    pub fn book(&mut self, name: &str, start: usize, end: usize) -> Result<usize> {
        #[cfg(feature = "profiling")]
        let span = info_span!("index.book", entity = name, start, end);
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        let id = self.lookup(name)?;
        let flipped = self.records[id].bits.set_range(start, end)?;
        if let Some(bit_index) = &mut self.bit_index {
            bit_index.book(id, start, end);
        }
        Ok(flipped)
    }

    /// Mark hours `[start, end)` as free. Returns the number of hours that
    /// were previously booked.
    pub fn unbook(&mut self, name: &str, start: usize, end: usize) -> Result<usize> {
        #[cfg(feature = "profiling")]
        let span = info_span!("index.unbook", entity = name, start, end);
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        let id = self.lookup(name)?;
        let flipped = self.records[id].bits.clear_range(start, end)?;
        if let Some(bit_index) = &mut self.bit_index {
            bit_index.unbook(id, start, end);
        }
        Ok(flipped)
    }

    /// Free the entity's whole horizon. Returns the number of hours released.
    pub fn clear(&mut self, name: &str) -> Result<usize> {
        let len = self.horizon(name)?;
        self.unbook(name, 0, len)
    }

    /// The entity's bitset.
    pub fn get(&self, name: &str) -> Result<&BitSet> {
        let id = self.lookup(name)?;
        Ok(&self.records[id].bits)
    }

    /// The entity's horizon length in bits.
    pub fn horizon(&self, name: &str) -> Result<usize> {
        self.get(name).map(BitSet::len)
    }

    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Booked hours as maximal `(start, end)` runs.
    pub fn booked_ranges(&self, name: &str) -> Result<Vec<(usize, usize)>> {
        self.get(name).map(|bits| bits.runs(true))
    }

    /// Free hours as maximal `(start, end)` runs.
    pub fn free_ranges(&self, name: &str) -> Result<Vec<(usize, usize)>> {
        self.get(name).map(|bits| bits.runs(false))
    }

    /// Entities whose bitset satisfies `predicate`, as a lazy iterator over
    /// names. Order is unspecified and each call re-scans current state.
    ///
    /// Positions beyond an entity's horizon read as clear bits, so a short
    /// horizon can still match clear-kind predicates.
    pub fn query(&self, predicate: &Predicate) -> QueryIter<'_> {
        #[cfg(feature = "profiling")]
        let span = info_span!(
            "index.query",
            kind = ?predicate.kind(),
            positions = predicate.positions().len(),
            entities = self.records.len()
        );
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        if let Some(candidates) = self
            .bit_index
            .as_ref()
            .and_then(|bit_index| bit_index.candidates(predicate))
        {
            QueryIter::candidates(&self.records, predicate.clone(), candidates)
        } else {
            QueryIter::scan(&self.records, predicate.clone())
        }
    }

    /// Linear-scan query, ignoring the inverted index. Exists so the two
    /// strategies can be compared; `query` must always return the same set.
    pub fn scan_query(&self, predicate: &Predicate) -> QueryIter<'_> {
        QueryIter::scan(&self.records, predicate.clone())
    }

    /// Parallel query collecting matching names across all entities.
    #[cfg(feature = "parallel")]
    pub fn par_query(&self, predicate: &Predicate) -> Vec<&str> {
        use rayon::prelude::*;

        self.by_name
            .par_iter()
            .filter_map(|(name, &id)| {
                self.records[id]
                    .bits
                    .matches(predicate)
                    .then_some(name.as_str())
            })
            .collect()
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<EntityId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GridError::NotFound(name.to_string()))
    }

    pub(crate) fn records(&self) -> &SlotMap<EntityId, EntityRecord> {
        &self.records
    }
}

impl Default for AvailabilityIndex {
    fn default() -> Self {
        Self::new()
    }
}
