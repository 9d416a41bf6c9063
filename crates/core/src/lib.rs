// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The carrier-grouping and route-aggregation engine.
//!
//! This crate is pure computation: it takes snapshots of sailings and
//! their carrier supplements and derives shared-cabin groups, per-group
//! recommendation fields, and ingestion-side row selections. It performs
//! no I/O and holds no state across invocations, so concurrent queries
//! need no coordination.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod grouping;
mod selector;

#[cfg(test)]
mod tests;

pub use aggregate::{GroupMember, GroupSummary, sort_summaries, summarize_group};
pub use grouping::{SailingGroup, group_sailings};
pub use selector::select_preferred_rows;
