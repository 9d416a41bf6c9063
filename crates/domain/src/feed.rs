// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types for the upstream vessel-schedule feed.
//!
//! The feed wraps results in an envelope whose embedded `code` carries the
//! business status; transport-level success does not imply a usable
//! payload. Field names follow the feed's camelCase (with the historical
//! all-lowercase `carriercd` oddity preserved verbatim).

use crate::types::{CarrierCode, PortCode, Sailing, SailingStatus};
use serde::{Deserialize, Serialize};

/// The business status code the feed uses for success.
pub const FEED_OK: i64 = 200;

/// Response envelope returned by the vessel-schedule feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEnvelope {
    /// Embedded business status code; 200 means success.
    pub code: i64,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Candidate sailing rows.
    #[serde(default)]
    pub result: Vec<FeedSailing>,
}

impl FeedEnvelope {
    /// Returns whether the embedded business status signals success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == FEED_OK
    }
}

/// One candidate sailing row as delivered by the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedSailing {
    /// Route service name.
    pub route_cd: Option<String>,
    /// Scheduled weekly departure day, string-encoded.
    pub route_etd: Option<String>,
    /// Primary operating carrier (feed key is all-lowercase).
    #[serde(rename = "carriercd")]
    pub carrier_cd: Option<String>,
    /// "1" when this row's carrier is the authoritative one.
    pub is_reference_carrier: Option<String>,
    /// Vessel name.
    pub vessel: Option<String>,
    /// Voyage code.
    pub voyage: Option<String>,
    /// Port of loading code.
    pub pol_cd: Option<String>,
    /// Port of loading name.
    pub pol: Option<String>,
    /// Port of discharge code.
    pub pod_cd: Option<String>,
    /// Port of discharge name.
    pub pod: Option<String>,
    /// Estimated arrival.
    pub eta: Option<String>,
    /// Estimated departure.
    pub etd: Option<String>,
    /// Transit duration in days, string-encoded.
    pub total_duration: Option<String>,
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
    /// Shared-cabin cooperation entries, kept as raw JSON.
    pub share_cabins: Option<serde_json::Value>,
}

impl FeedSailing {
    /// Returns the number of cooperation entries on this row.
    ///
    /// A missing or non-array `shareCabins` value counts as zero.
    #[must_use]
    pub fn share_cabin_count(&self) -> usize {
        self.share_cabins
            .as_ref()
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Returns whether the feed flags this row's carrier as authoritative.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.is_reference_carrier.as_deref() == Some("1")
    }

    /// Converts this feed row into a domain sailing for persistence.
    ///
    /// The cooperation blob is re-serialized to text; a missing array is
    /// stored as an absent blob rather than `"null"`.
    #[must_use]
    pub fn into_sailing(self, data_version: i32, fetch_timestamp: i64, fetch_date: &str) -> Sailing {
        let share_cabins = self
            .share_cabins
            .as_ref()
            .filter(|value| !value.is_null())
            .map(std::string::ToString::to_string);
        let carrier_cd = self
            .carrier_cd
            .as_deref()
            .map(CarrierCode::new)
            .filter(|code| !code.is_empty());

        Sailing {
            sailing_id: None,
            pol_cd: PortCode::new(self.pol_cd.as_deref().unwrap_or_default()),
            pod_cd: PortCode::new(self.pod_cd.as_deref().unwrap_or_default()),
            vessel: self.vessel.unwrap_or_default(),
            voyage: self.voyage.unwrap_or_default(),
            data_version,
            status: SailingStatus::Active,
            carrier_cd,
            is_reference_carrier: self.is_reference_carrier,
            route_cd: self.route_cd,
            route_etd: self.route_etd,
            eta: self.eta,
            etd: self.etd,
            total_duration: self.total_duration,
            share_cabins,
            is_transit: self.is_transit,
            transit_port_en: self.transit_port_en,
            transit_port_cd: self.transit_port_cd,
            booking_cutoff: self.booking_cutoff,
            cy_open: self.cy_open,
            cy_close: self.cy_close,
            si_cutoff: self.si_cutoff,
            fetch_timestamp,
            fetch_date: fetch_date.to_string(),
            remark: None,
        }
    }
}
