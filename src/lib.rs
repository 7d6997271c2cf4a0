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

//! Hourgrid - Fixed-horizon bitmap availability index
//!
//! Entities own one fixed-length bitset each (one bit per hour across the
//! horizon); range booking flips bits and bitwise predicates
//! (AllSet/AllClear/AnySet/AnyClear) select matching entities, with an
//! optional per-bit inverted index to prune candidates.

pub mod bitset;
pub mod entity;
pub mod error;
pub mod index;
pub mod predicate;
pub mod prelude;
#[cfg(feature = "profiling")]
pub mod profiling;
pub mod query;
pub mod serialization;
pub mod shared;

#[cfg(test)]
mod tests;

pub use bitset::*;
pub use entity::*;
pub use error::*;
pub use index::*;
pub use predicate::*;
pub use query::*;
pub use serialization::*;
pub use shared::*;
