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

//! Profiling support
//!
//! With the `profiling` feature enabled, `register`, `book`, `unbook` and
//! `query` emit tracing spans carrying the entity name, the range bounds and
//! the candidate counts. Install a collector before exercising the index,
//! either your own subscriber or one of the helpers here:
//!
//! ```ignore
//! hourgrid::profiling::init();
//!
//! let mut index = AvailabilityIndex::with_bit_index();
//! index.register("Val", HOURS_PER_YEAR)?;
//! index.book("Val", 0, 168)?; // emits the index.book span
//! ```
//!
//! Use `RUST_LOG=trace` style filtering by installing a filtered subscriber
//! yourself; the helpers keep the default level.

use std::io;

/// Install a global subscriber printing spans as human-readable lines.
/// Returns false if a global subscriber was already set.
pub fn init() -> bool {
    tracing_subscriber::fmt().try_init().is_ok()
}

/// Install a global subscriber emitting newline-delimited JSON, suitable for
/// loading into trace viewers. Returns false if a global subscriber was
/// already set.
pub fn init_json<W>(writer: W) -> bool
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .try_init()
        .is_ok()
}

/// JSON subscriber writing to stdout.
pub fn init_json_stdout() -> bool {
    init_json(io::stdout)
}
