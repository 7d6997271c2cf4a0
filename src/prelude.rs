//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use hourgrid::prelude::*;
//! ```

pub use crate::bitset::BitSet;
pub use crate::entity::EntityId;
pub use crate::error::{GridError, Result};
pub use crate::index::{AvailabilityIndex, HOURS_PER_YEAR};
pub use crate::predicate::{Predicate, PredicateKind};
pub use crate::shared::SharedIndex;
