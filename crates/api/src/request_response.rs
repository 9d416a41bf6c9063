// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Wire field names keep the camelCase spelling the frontend has always
//! consumed (`polCd`, `carrierCd`, ...); aggregate fields keep their
//! historical snake_case names (`plan_open`, `cabin_price`, ...).

use serde::{Deserialize, Serialize};

/// Placeholder rendered where a price or availability value is absent.
pub const UNAVAILABLE_SENTINEL: &str = "--";

/// Query request for the cabin-grouping endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinGroupingRequest {
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pub pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pub pod_cd: String,
}

/// The route filter echoed back in query responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFilter {
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pub pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pub pod_cd: String,
}

/// Joined supplement data for one schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementInfo {
    /// Surrogate supplement ID.
    pub id: i64,
    /// The carrier this supplement belongs to.
    #[serde(rename = "carrierCd")]
    pub carrier_cd: String,
    /// 20ft availability, or the unavailable sentinel.
    pub gp_20: String,
    /// 40ft availability, or the unavailable sentinel.
    pub hq_40: String,
    /// Cutoff time, or the unavailable sentinel.
    pub cut_off_time: String,
    /// Price as a decimal string, or the unavailable sentinel.
    pub price: String,
}

/// One member sailing of a group, with its joined supplement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    /// Surrogate sailing ID.
    pub id: i64,
    /// Vessel name.
    pub vessel: String,
    /// Voyage code.
    pub voyage: String,
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pub pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pub pod_cd: String,
    /// Estimated arrival.
    pub eta: Option<String>,
    /// Estimated departure.
    pub etd: Option<String>,
    /// Scheduled weekly departure day, string-encoded.
    #[serde(rename = "routeEtd")]
    pub route_etd: Option<String>,
    /// Primary operating carrier.
    #[serde(rename = "carrierCd")]
    pub carrier_cd: Option<String>,
    /// Transit duration in days, string-encoded.
    #[serde(rename = "totalDuration")]
    pub total_duration: Option<String>,
    /// Parsed cooperation entries; empty when the blob is absent or bad.
    #[serde(rename = "shareCabins")]
    pub share_cabins: serde_json::Value,
    /// Joined supplement data, when a supplement exists for the sailing's
    /// own carrier.
    pub vessel_info: Option<SupplementInfo>,
}

/// One shared-cabin group with its derived recommendation fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Presentation label in first-seen order.
    pub group_id: String,
    /// Number of cooperating carriers.
    pub cabins_count: usize,
    /// The shared carrier set, sorted ascending.
    pub carrier_codes: Vec<String>,
    /// Representative departure weekday.
    pub plan_open: Option<u8>,
    /// Shortest transit duration in days.
    pub plan_duration: Option<u32>,
    /// Representative price, or the unavailable sentinel.
    pub cabin_price: String,
    /// Whether any member reports 20ft availability.
    pub is_has_gp_20: bool,
    /// Whether any member reports 40ft availability.
    pub is_has_hq_40: bool,
    /// Member sailings sorted by departure weekday, nulls last.
    pub schedules: Vec<ScheduleInfo>,
}

/// Response for the cabin-grouping endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinGroupingResponse {
    /// The data version the response was computed from; `None` when the
    /// route has no data at all.
    pub version: Option<i32>,
    /// Total number of groups.
    pub total_groups: usize,
    /// The requested route, echoed back.
    pub filter: RouteFilter,
    /// The groups, sorted by representative weekday.
    pub groups: Vec<GroupInfo>,
}

/// Exact-key supplement lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementQuery {
    /// Carrier code.
    #[serde(rename = "carrierCd")]
    pub carrier_cd: String,
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pub pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pub pod_cd: String,
    /// Vessel name.
    pub vessel: String,
    /// Voyage code.
    pub voyage: String,
}

/// Operator edit of a supplement's commercial fields.
///
/// Absent fields are cleared, not preserved: the edit form always posts
/// the full set of operator values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementUpdateRequest {
    /// Carrier code.
    #[serde(rename = "carrierCd")]
    pub carrier_cd: String,
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pub pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pub pod_cd: String,
    /// Vessel name.
    pub vessel: String,
    /// Voyage code.
    pub voyage: String,
    /// 20ft availability.
    pub gp_20: Option<String>,
    /// 40ft availability.
    pub hq_40: Option<String>,
    /// Cutoff time.
    pub cut_off_time: Option<String>,
    /// Price as a decimal string.
    pub price: Option<String>,
}

/// Batch reconciliation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Explicit sailing IDs to reconcile; `None` means all active.
    #[serde(default)]
    pub sailing_ids: Option<Vec<i64>>,
    /// Report what would change without mutating state.
    #[serde(default)]
    pub dry_run: bool,
    /// Rewrite identity-adjacent fields on existing supplements even when
    /// unchanged.
    #[serde(default)]
    pub force_update: bool,
}

/// Per-sailing supplement fanout counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    /// Supplements created.
    pub created: usize,
    /// Supplements whose identity-adjacent fields were rewritten.
    pub updated: usize,
}

/// Batch reconciliation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Sailings processed.
    pub processed: usize,
    /// Supplements created.
    pub created: usize,
    /// Supplements updated.
    pub updated: usize,
    /// Sailings skipped (no resolvable carrier).
    pub skipped: usize,
    /// Sailings that failed; the batch continues past them.
    pub errors: usize,
}

/// Sync coverage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatusResponse {
    /// Active sailing count.
    pub sailing_count: i64,
    /// Total supplement count.
    pub supplement_count: i64,
    /// Supplements carrying operator data.
    pub filled_count: i64,
    /// Supplements still empty.
    pub empty_count: i64,
    /// Percentage of supplements carrying operator data.
    pub fill_rate: f64,
}

/// Outcome of one CSV import row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvRowStatus {
    /// A new supplement was (or would be) created with the row's values.
    Created,
    /// An existing supplement was (or would be) overwritten.
    Updated,
    /// The row was rejected.
    Invalid,
}

/// Per-row result of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowResult {
    /// 1-based data row number (excluding the header).
    pub row: usize,
    /// What happened to the row.
    pub status: CsvRowStatus,
    /// Rejection reason for invalid rows.
    pub message: Option<String>,
}

/// Report for a CSV supplement import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Whether the import ran in dry-run mode.
    pub dry_run: bool,
    /// Rows created.
    pub created: usize,
    /// Rows updated.
    pub updated: usize,
    /// Rows rejected.
    pub invalid: usize,
    /// Per-row outcomes in input order.
    pub rows: Vec<CsvRowResult>,
}
