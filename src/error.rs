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

//! Error types

use std::fmt;

/// Availability index error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Bitset length must be at least one bit
    InvalidLength,

    /// Bit position or range falls outside the horizon
    OutOfRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Entity name already registered
    DuplicateEntity(String),

    /// Entity not registered
    NotFound(String),

    /// Predicate has no bit positions
    InvalidPredicate,

    /// Snapshot serialization error
    SerializationError(String),

    /// Snapshot deserialization error
    DeserializationError(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidLength => write!(f, "Bitset length must be greater than zero"),
            GridError::OutOfRange { start, end, len } => {
                write!(f, "Bit range [{start}, {end}) out of range for horizon of {len} bits")
            }
            GridError::DuplicateEntity(name) => write!(f, "Entity already registered: {name}"),
            GridError::NotFound(name) => write!(f, "Entity not found: {name}"),
            GridError::InvalidPredicate => write!(f, "Predicate requires at least one bit position"),
            GridError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            GridError::DeserializationError(msg) => write!(f, "Deserialization error: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Result type alias
pub type Result<T> = std::result::Result<T, GridError>;
