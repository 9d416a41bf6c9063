// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::parse::{parse_duration_days, parse_etd_date, parse_weekday};
use crate::share_cabins::extract_carrier_codes;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a UN/LOCODE-style port code (e.g. "CNSHA", "USNYC").
///
/// Codes are normalized to uppercase to ensure case-insensitive uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortCode {
    /// The port code value.
    value: String,
}

impl PortCode {
    /// Creates a new `PortCode`.
    ///
    /// The value is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the port code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for PortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a carrier code (e.g. "MSK", "ONE").
///
/// The value is trimmed but otherwise kept verbatim: grouping compares
/// carrier sets by exact string equality, matching the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarrierCode {
    /// The carrier code value.
    value: String,
}

impl CarrierCode {
    /// Creates a new `CarrierCode`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the carrier code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the code is empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Lifecycle status of a sailing row.
///
/// Only `Active` rows participate in grouping and reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SailingStatus {
    /// The row is current and visible to queries.
    #[default]
    Active,
    /// The row has been superseded or withdrawn.
    Inactive,
}

impl SailingStatus {
    /// Converts the persisted integer representation into a status.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither 0 nor 1.
    pub const fn from_i32(value: i32) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Active),
            0 => Ok(Self::Inactive),
            other => Err(DomainError::InvalidStatus(other)),
        }
    }

    /// Returns the persisted integer representation.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Active => 1,
            Self::Inactive => 0,
        }
    }

    /// Returns whether the status is `Active`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One planned voyage leg for an origin/destination port pair.
///
/// Identity is `(pol_cd, pod_cd, vessel, voyage, data_version)`; the
/// surrogate `sailing_id` is assigned by the persistence layer.
///
/// Schedule timestamps (`eta`, `etd`, cutoffs) are stored as the loosely
/// formatted strings delivered by the upstream feed. Accessors parse them
/// on demand and treat malformed values as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sailing {
    /// Surrogate identifier; `None` before first persistence.
    pub sailing_id: Option<i64>,
    /// Port of loading.
    pub pol_cd: PortCode,
    /// Port of discharge.
    pub pod_cd: PortCode,
    /// Vessel name.
    pub vessel: String,
    /// Voyage code.
    pub voyage: String,
    /// Monotonic import batch counter.
    pub data_version: i32,
    /// Row status.
    pub status: SailingStatus,
    /// Primary operating carrier, when the feed names one.
    pub carrier_cd: Option<CarrierCode>,
    /// "1" when the feed flags this row's carrier as authoritative.
    pub is_reference_carrier: Option<String>,
    /// Route service name.
    pub route_cd: Option<String>,
    /// Scheduled weekly departure day as a string-encoded integer.
    pub route_etd: Option<String>,
    /// Estimated arrival, date or date-time string.
    pub eta: Option<String>,
    /// Estimated departure, date or date-time string.
    pub etd: Option<String>,
    /// Transit duration in days, string-encoded.
    pub total_duration: Option<String>,
    /// Serialized shared-cabin cooperation blob.
    pub share_cabins: Option<String>,
    /// "1" when the leg involves transshipment.
    pub is_transit: Option<String>,
    /// First transshipment port name.
    pub transit_port_en: Option<String>,
    /// First transshipment port code.
    pub transit_port_cd: Option<String>,
    /// Booking cutoff time.
    pub booking_cutoff: Option<String>,
    /// Container yard open time.
    pub cy_open: Option<String>,
    /// Container yard close time.
    pub cy_close: Option<String>,
    /// Shipping instruction cutoff time.
    pub si_cutoff: Option<String>,
    /// Unix timestamp of the import that produced this row.
    pub fetch_timestamp: i64,
    /// Formatted date-time of the import that produced this row.
    pub fetch_date: String,
    /// Free-text remark.
    pub remark: Option<String>,
}

impl Sailing {
    /// Resolves the set of cooperating carriers for this sailing.
    ///
    /// Parses the shared-cabin blob; when the blob is absent, empty, or
    /// yields no codes, falls back to the sailing's own carrier code. The
    /// result is de-duplicated and sorted ascending.
    #[must_use]
    pub fn carrier_set(&self) -> Vec<CarrierCode> {
        extract_carrier_codes(self.share_cabins.as_deref(), self.carrier_cd.as_ref())
    }

    /// Returns the departure weekday, when `route_etd` parses as an integer.
    #[must_use]
    pub fn departure_weekday(&self) -> Option<u8> {
        parse_weekday(self.route_etd.as_deref())
    }

    /// Returns the transit duration in days, when `total_duration` parses.
    #[must_use]
    pub fn transit_days(&self) -> Option<u32> {
        parse_duration_days(self.total_duration.as_deref())
    }

    /// Returns the estimated departure date, when `etd` parses.
    #[must_use]
    pub fn etd_date(&self) -> Option<NaiveDate> {
        self.etd.as_deref().and_then(parse_etd_date)
    }
}

/// Operator-entered commercial detail for one carrier on one voyage.
///
/// Keyed by `(carrier_cd, pol_cd, pod_cd, vessel, voyage)` and independent
/// of `data_version`: the row survives schedule re-imports. It is the only
/// place prices and container availability live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSupplement {
    /// Surrogate identifier; `None` before first persistence.
    pub supplement_id: Option<i64>,
    /// The carrier this row belongs to.
    pub carrier_cd: CarrierCode,
    /// Port of loading.
    pub pol_cd: PortCode,
    /// Port of discharge.
    pub pod_cd: PortCode,
    /// Vessel name.
    pub vessel: String,
    /// Voyage code.
    pub voyage: String,
    /// 20ft general-purpose container availability, free text.
    pub gp_20: Option<String>,
    /// 40ft high-cube container availability, free text.
    pub hq_40: Option<String>,
    /// Carrier cutoff time, free text.
    pub cut_off_time: Option<String>,
    /// Operator-entered price.
    pub price: Option<Decimal>,
}

impl CarrierSupplement {
    /// Creates an empty supplement for the given key.
    ///
    /// All operator fields start unset; they are filled in manually later.
    #[must_use]
    pub const fn empty(
        carrier_cd: CarrierCode,
        pol_cd: PortCode,
        pod_cd: PortCode,
        vessel: String,
        voyage: String,
    ) -> Self {
        Self {
            supplement_id: None,
            carrier_cd,
            pol_cd,
            pod_cd,
            vessel,
            voyage,
            gp_20: None,
            hq_40: None,
            cut_off_time: None,
            price: None,
        }
    }

    /// Returns whether all four operator-entered fields are unset or blank.
    ///
    /// The reconciler may only delete supplements for which this holds.
    #[must_use]
    pub fn has_no_operator_data(&self) -> bool {
        fn blank(value: Option<&String>) -> bool {
            value.is_none_or(|v| v.trim().is_empty())
        }
        blank(self.gp_20.as_ref())
            && blank(self.hq_40.as_ref())
            && blank(self.cut_off_time.as_ref())
            && self.price.is_none()
    }

    /// Returns whether the 20ft availability field marks availability.
    #[must_use]
    pub fn has_gp_20(&self) -> bool {
        marks_availability(self.gp_20.as_deref())
    }

    /// Returns whether the 40ft availability field marks availability.
    #[must_use]
    pub fn has_hq_40(&self) -> bool {
        marks_availability(self.hq_40.as_deref())
    }
}

/// Returns whether a free-text availability value counts as "available".
///
/// Empty strings, "0", and the "--" placeholder all mean unavailable.
#[must_use]
pub fn marks_availability(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let trimmed = v.trim();
        !trimmed.is_empty() && trimmed != "0" && trimmed != "--"
    })
}
