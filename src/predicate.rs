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

//! Bitwise predicates
//!
//! A predicate pairs one of the four test kinds with a set of bit positions.
//! It is immutable once constructed and cheap to clone.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GridError, Result};

/// Position lists this short stay inline, no heap allocation.
pub const MAX_INLINE_POSITIONS: usize = 8;

/// The four bitwise test semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    /// Every listed position has bit = 1
    AllSet,
    /// Every listed position has bit = 0
    AllClear,
    /// At least one listed position has bit = 1
    AnySet,
    /// At least one listed position has bit = 0
    AnyClear,
}

/// A predicate kind plus a non-empty, deduplicated set of bit positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    kind: PredicateKind,
    positions: SmallVec<[usize; MAX_INLINE_POSITIONS]>,
}

impl Predicate {
    /// Build a predicate from any position collection. Duplicates are dropped
    /// and insertion order is irrelevant. An empty position list is rejected.
    pub fn new(kind: PredicateKind, positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut positions: SmallVec<[usize; MAX_INLINE_POSITIONS]> =
            positions.into_iter().collect();
        positions.sort_unstable();
        positions.dedup();
        if positions.is_empty() {
            return Err(GridError::InvalidPredicate);
        }
        Ok(Self { kind, positions })
    }

    pub fn all_set(positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        Self::new(PredicateKind::AllSet, positions)
    }

    pub fn all_clear(positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        Self::new(PredicateKind::AllClear, positions)
    }

    pub fn any_set(positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        Self::new(PredicateKind::AnySet, positions)
    }

    pub fn any_clear(positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        Self::new(PredicateKind::AnyClear, positions)
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    /// Listed positions, sorted ascending and unique.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}
