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

//! Query evaluation with candidate pruning
//!
//! The baseline query is a linear scan over every registered entity, the
//! collection-scan equivalent. When the availability index maintains a
//! [`BitIndex`], `AnySet`/`AllSet` queries over small position sets shrink to
//! a scan of the entities touched by the listed bits, the index-scan
//! equivalent. Both strategies verify candidates against the full predicate,
//! so their result sets are always identical.

use ahash::{AHashMap, AHashSet};
use slotmap::SlotMap;

use crate::bitset::BitSet;
use crate::entity::{EntityId, EntityRecord};
use crate::predicate::{Predicate, PredicateKind};

/// Per-bit inverted lists: which entities currently have this bit set.
///
/// Kept in sync incrementally by book/unbook/deregister. Never serialized;
/// rebuilt from the bitsets when a snapshot is loaded.
#[derive(Debug, Default, Clone)]
pub(crate) struct BitIndex {
    postings: AHashMap<usize, AHashSet<EntityId>>,
}

impl BitIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record that `id` now has every bit in `[start, end)` set.
    pub(crate) fn book(&mut self, id: EntityId, start: usize, end: usize) {
        for pos in start..end {
            self.postings.entry(pos).or_default().insert(id);
        }
    }

    /// Record that `id` no longer has any bit in `[start, end)` set.
    pub(crate) fn unbook(&mut self, id: EntityId, start: usize, end: usize) {
        for pos in start..end {
            if let Some(list) = self.postings.get_mut(&pos) {
                list.remove(&id);
                if list.is_empty() {
                    self.postings.remove(&pos);
                }
            }
        }
    }

    /// Drop every posting for `id`, walking only its set bits.
    pub(crate) fn remove_entity(&mut self, id: EntityId, bits: &BitSet) {
        for pos in bits.ones() {
            if let Some(list) = self.postings.get_mut(&pos) {
                list.remove(&id);
                if list.is_empty() {
                    self.postings.remove(&pos);
                }
            }
        }
    }

    /// Candidate entities for a predicate, or `None` when the index cannot
    /// prune and the caller must fall back to a full scan.
    ///
    /// `AnySet`: union of the listed bits' posting lists. `AllSet`: the
    /// shortest posting list (a match must appear in every list, so any one
    /// of them bounds the candidates). Clear-kind predicates match entities
    /// the postings never mention, so no pruning is possible.
    pub(crate) fn candidates(&self, predicate: &Predicate) -> Option<Vec<EntityId>> {
        match predicate.kind() {
            PredicateKind::AnySet => {
                let mut seen = AHashSet::new();
                for pos in predicate.positions() {
                    if let Some(list) = self.postings.get(pos) {
                        seen.extend(list.iter().copied());
                    }
                }
                Some(seen.into_iter().collect())
            }
            PredicateKind::AllSet => {
                let shortest = predicate
                    .positions()
                    .iter()
                    .map(|pos| self.postings.get(pos).map_or(0, |list| list.len()))
                    .zip(predicate.positions())
                    .min_by_key(|(len, _)| *len);
                match shortest {
                    Some((0, _)) | None => Some(Vec::new()),
                    Some((_, pos)) => Some(
                        self.postings
                            .get(pos)
                            .map(|list| list.iter().copied().collect())
                            .unwrap_or_default(),
                    ),
                }
            }
            PredicateKind::AllClear | PredicateKind::AnyClear => None,
        }
    }
}

/// Lazy iterator of entity names matching a predicate.
///
/// Each call to `query` re-scans current state; nothing is cached across
/// calls. Order is unspecified.
pub struct QueryIter<'a> {
    records: &'a SlotMap<EntityId, EntityRecord>,
    predicate: Predicate,
    inner: QueryIterInner<'a>,
}

enum QueryIterInner<'a> {
    Scan(slotmap::basic::Iter<'a, EntityId, EntityRecord>),
    Candidates(std::vec::IntoIter<EntityId>),
}

impl<'a> QueryIter<'a> {
    pub(crate) fn scan(
        records: &'a SlotMap<EntityId, EntityRecord>,
        predicate: Predicate,
    ) -> Self {
        Self {
            records,
            predicate,
            inner: QueryIterInner::Scan(records.iter()),
        }
    }

    pub(crate) fn candidates(
        records: &'a SlotMap<EntityId, EntityRecord>,
        predicate: Predicate,
        candidates: Vec<EntityId>,
    ) -> Self {
        Self {
            records,
            predicate,
            inner: QueryIterInner::Candidates(candidates.into_iter()),
        }
    }
}

impl<'a> Iterator for QueryIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            QueryIterInner::Scan(iter) => {
                for (_, record) in iter.by_ref() {
                    if record.bits.matches(&self.predicate) {
                        return Some(record.name.as_str());
                    }
                }
                None
            }
            QueryIterInner::Candidates(iter) => {
                for id in iter.by_ref() {
                    if let Some(record) = self.records.get(id) {
                        if record.bits.matches(&self.predicate) {
                            return Some(record.name.as_str());
                        }
                    }
                }
                None
            }
        }
    }
}
