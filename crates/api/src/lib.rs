// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the sailplan schedule backend.
//!
//! Handlers in this crate translate transport-level requests into domain
//! operations, enforce capability checks, and translate every lower-layer
//! error into an [`ApiError`] so nothing leaks through the boundary. The
//! HTTP server is a thin shell over these functions, which keeps them
//! testable without a running server.

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
#![allow(clippy::multiple_crate_versions)]

mod capabilities;
mod csv_import;
mod error;
mod grouping;
mod reconcile;
mod request_response;
mod supplements;

#[cfg(test)]
mod tests;

pub use capabilities::{Capability, Role, authorize};
pub use csv_import::{SupplementCsvRow, import_supplements_csv, parse_supplement_rows};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use grouping::query_cabin_groups;
pub use reconcile::{
    cleanup_sailing_deleted, delete_sailing, reconcile_supplements, save_sailing,
    sync_sailing_saved,
};
pub use request_response::{
    CabinGroupingRequest, CabinGroupingResponse, CsvRowResult, CsvRowStatus, GroupInfo,
    ImportReport, RouteFilter, ScheduleInfo, SupplementInfo, SupplementQuery,
    SupplementUpdateRequest, SyncCounts, SyncReport, SyncRequest, SyncStatusResponse,
    UNAVAILABLE_SENTINEL,
};
pub use supplements::{get_supplement_info, sync_status, update_supplement};
