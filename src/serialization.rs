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

//! Serialization support for the availability index
//!
//! Snapshots carry only names and bitsets. The inverted bit index is never
//! serialized; it is rebuilt when a snapshot is loaded.

use serde::{Deserialize, Serialize};

use crate::bitset::BitSet;
use crate::error::{GridError, Result};
use crate::index::AvailabilityIndex;

/// Serializable representation of one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntity {
    pub name: String,
    pub bits: BitSet,
}

/// Serializable representation of a whole index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub entities: Vec<SnapshotEntity>,
    pub indexed: bool,
}

impl AvailabilityIndex {
    /// Capture current state as a snapshot.
    pub fn to_snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            entities: self
                .records()
                .values()
                .map(|record| SnapshotEntity {
                    name: record.name().to_string(),
                    bits: record.bits().clone(),
                })
                .collect(),
            indexed: self.is_indexed(),
        }
    }

    /// Rebuild an index from a snapshot, restoring bitsets verbatim and
    /// re-deriving the inverted bit index if the snapshot carried one.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self> {
        let mut index = if snapshot.indexed {
            Self::with_bit_index()
        } else {
            Self::new()
        };
        for entity in snapshot.entities {
            // register rejects duplicate names and zero-length horizons
            index.register(entity.name.clone(), entity.bits.len())?;
            for (start, end) in entity.bits.runs(true) {
                index.book(&entity.name, start, end)?;
            }
        }
        Ok(index)
    }

    /// Serialize index to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_snapshot())
            .map_err(|e| GridError::SerializationError(e.to_string()))
    }

    /// Serialize index to JSON with pretty printing
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| GridError::SerializationError(e.to_string()))
    }

    /// Deserialize index from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: IndexSnapshot =
            serde_json::from_str(json).map_err(|e| GridError::DeserializationError(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}
