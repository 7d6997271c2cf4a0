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

//! Entity identifiers and records.

use slotmap::new_key_type;

use crate::bitset::BitSet;

new_key_type! {
    /// Unique entity identifier backed by slotmap's generational keys.
    pub struct EntityId;
}

/// One registered entity: its caller-supplied name and the bitset holding its
/// booked hours. The record owns the bitset outright.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub(crate) name: String,
    pub(crate) bits: BitSet,
}

impl EntityRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bits(&self) -> &BitSet {
        &self.bits
    }
}
