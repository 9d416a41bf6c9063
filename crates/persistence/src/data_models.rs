// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the Diesel schema and the domain types.
//!
//! Prices are persisted as text so both backends share one representation;
//! conversion back into `rust_decimal::Decimal` happens here, and a row
//! that fails conversion surfaces as `CorruptRecord` rather than panicking.

use crate::diesel_schema::{carrier_supplements, vessel_sailings};
use crate::error::PersistenceError;
use diesel::prelude::*;
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, PortCode, Sailing, SailingStatus};
use std::str::FromStr;

/// A full sailing row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vessel_sailings)]
pub struct SailingRow {
    pub sailing_id: i64,
    pub pol_cd: String,
    pub pod_cd: String,
    pub vessel: String,
    pub voyage: String,
    pub data_version: i32,
    pub status: i32,
    pub carrier_cd: Option<String>,
    pub is_reference_carrier: Option<String>,
    pub route_cd: Option<String>,
    pub route_etd: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub total_duration: Option<String>,
    pub share_cabins: Option<String>,
    pub is_transit: Option<String>,
    pub transit_port_en: Option<String>,
    pub transit_port_cd: Option<String>,
    pub booking_cutoff: Option<String>,
    pub cy_open: Option<String>,
    pub cy_close: Option<String>,
    pub si_cutoff: Option<String>,
    pub fetch_timestamp: i64,
    pub fetch_date: String,
    pub remark: Option<String>,
}

impl SailingRow {
    /// Converts the stored row into a domain sailing.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status value is out of range.
    pub fn into_domain(self) -> Result<Sailing, PersistenceError> {
        let status: SailingStatus = SailingStatus::from_i32(self.status)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(Sailing {
            sailing_id: Some(self.sailing_id),
            pol_cd: PortCode::new(&self.pol_cd),
            pod_cd: PortCode::new(&self.pod_cd),
            vessel: self.vessel,
            voyage: self.voyage,
            data_version: self.data_version,
            status,
            carrier_cd: self.carrier_cd.as_deref().map(CarrierCode::new),
            is_reference_carrier: self.is_reference_carrier,
            route_cd: self.route_cd,
            route_etd: self.route_etd,
            eta: self.eta,
            etd: self.etd,
            total_duration: self.total_duration,
            share_cabins: self.share_cabins,
            is_transit: self.is_transit,
            transit_port_en: self.transit_port_en,
            transit_port_cd: self.transit_port_cd,
            booking_cutoff: self.booking_cutoff,
            cy_open: self.cy_open,
            cy_close: self.cy_close,
            si_cutoff: self.si_cutoff,
            fetch_timestamp: self.fetch_timestamp,
            fetch_date: self.fetch_date,
            remark: self.remark,
        })
    }
}

/// Insertable sailing row; the surrogate id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vessel_sailings)]
pub struct NewSailingRow {
    pub pol_cd: String,
    pub pod_cd: String,
    pub vessel: String,
    pub voyage: String,
    pub data_version: i32,
    pub status: i32,
    pub carrier_cd: Option<String>,
    pub is_reference_carrier: Option<String>,
    pub route_cd: Option<String>,
    pub route_etd: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub total_duration: Option<String>,
    pub share_cabins: Option<String>,
    pub is_transit: Option<String>,
    pub transit_port_en: Option<String>,
    pub transit_port_cd: Option<String>,
    pub booking_cutoff: Option<String>,
    pub cy_open: Option<String>,
    pub cy_close: Option<String>,
    pub si_cutoff: Option<String>,
    pub fetch_timestamp: i64,
    pub fetch_date: String,
    pub remark: Option<String>,
}

impl NewSailingRow {
    /// Builds an insertable row from a domain sailing.
    #[must_use]
    pub fn from_domain(sailing: &Sailing) -> Self {
        Self {
            pol_cd: sailing.pol_cd.value().to_string(),
            pod_cd: sailing.pod_cd.value().to_string(),
            vessel: sailing.vessel.clone(),
            voyage: sailing.voyage.clone(),
            data_version: sailing.data_version,
            status: sailing.status.as_i32(),
            carrier_cd: sailing.carrier_cd.as_ref().map(|c| c.value().to_string()),
            is_reference_carrier: sailing.is_reference_carrier.clone(),
            route_cd: sailing.route_cd.clone(),
            route_etd: sailing.route_etd.clone(),
            eta: sailing.eta.clone(),
            etd: sailing.etd.clone(),
            total_duration: sailing.total_duration.clone(),
            share_cabins: sailing.share_cabins.clone(),
            is_transit: sailing.is_transit.clone(),
            transit_port_en: sailing.transit_port_en.clone(),
            transit_port_cd: sailing.transit_port_cd.clone(),
            booking_cutoff: sailing.booking_cutoff.clone(),
            cy_open: sailing.cy_open.clone(),
            cy_close: sailing.cy_close.clone(),
            si_cutoff: sailing.si_cutoff.clone(),
            fetch_timestamp: sailing.fetch_timestamp,
            fetch_date: sailing.fetch_date.clone(),
            remark: sailing.remark.clone(),
        }
    }
}

/// Changeset for re-imported sailings: everything except the identity
/// tuple. `None` values clear the stored column, matching the upstream
/// feed semantics where an absent field supersedes an old value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = vessel_sailings, treat_none_as_null = true)]
pub struct SailingChangeset {
    pub status: i32,
    pub carrier_cd: Option<String>,
    pub is_reference_carrier: Option<String>,
    pub route_cd: Option<String>,
    pub route_etd: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub total_duration: Option<String>,
    pub share_cabins: Option<String>,
    pub is_transit: Option<String>,
    pub transit_port_en: Option<String>,
    pub transit_port_cd: Option<String>,
    pub booking_cutoff: Option<String>,
    pub cy_open: Option<String>,
    pub cy_close: Option<String>,
    pub si_cutoff: Option<String>,
    pub fetch_timestamp: i64,
    pub fetch_date: String,
    pub remark: Option<String>,
}

impl SailingChangeset {
    /// Builds the re-import changeset from a domain sailing.
    #[must_use]
    pub fn from_domain(sailing: &Sailing) -> Self {
        Self {
            status: sailing.status.as_i32(),
            carrier_cd: sailing.carrier_cd.as_ref().map(|c| c.value().to_string()),
            is_reference_carrier: sailing.is_reference_carrier.clone(),
            route_cd: sailing.route_cd.clone(),
            route_etd: sailing.route_etd.clone(),
            eta: sailing.eta.clone(),
            etd: sailing.etd.clone(),
            total_duration: sailing.total_duration.clone(),
            share_cabins: sailing.share_cabins.clone(),
            is_transit: sailing.is_transit.clone(),
            transit_port_en: sailing.transit_port_en.clone(),
            transit_port_cd: sailing.transit_port_cd.clone(),
            booking_cutoff: sailing.booking_cutoff.clone(),
            cy_open: sailing.cy_open.clone(),
            cy_close: sailing.cy_close.clone(),
            si_cutoff: sailing.si_cutoff.clone(),
            fetch_timestamp: sailing.fetch_timestamp,
            fetch_date: sailing.fetch_date.clone(),
            remark: sailing.remark.clone(),
        }
    }
}

/// A full carrier-supplement row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = carrier_supplements)]
pub struct SupplementRow {
    pub supplement_id: i64,
    pub carrier_cd: String,
    pub pol_cd: String,
    pub pod_cd: String,
    pub vessel: String,
    pub voyage: String,
    pub gp_20: Option<String>,
    pub hq_40: Option<String>,
    pub cut_off_time: Option<String>,
    pub price: Option<String>,
}

impl SupplementRow {
    /// Converts the stored row into a domain supplement.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored price text is not a decimal.
    pub fn into_domain(self) -> Result<CarrierSupplement, PersistenceError> {
        let price: Option<Decimal> = match self.price.as_deref() {
            None => None,
            Some(raw) => Some(Decimal::from_str(raw).map_err(|e| {
                PersistenceError::CorruptRecord(format!("price '{raw}' is not a decimal: {e}"))
            })?),
        };
        Ok(CarrierSupplement {
            supplement_id: Some(self.supplement_id),
            carrier_cd: CarrierCode::new(&self.carrier_cd),
            pol_cd: PortCode::new(&self.pol_cd),
            pod_cd: PortCode::new(&self.pod_cd),
            vessel: self.vessel,
            voyage: self.voyage,
            gp_20: self.gp_20,
            hq_40: self.hq_40,
            cut_off_time: self.cut_off_time,
            price,
        })
    }
}

/// Renders an optional price for storage.
#[must_use]
pub fn price_to_text(price: Option<Decimal>) -> Option<String> {
    price.map(|value| value.to_string())
}
