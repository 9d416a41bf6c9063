// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use sailplan_domain::{
    CarrierCode, CarrierSupplement, PortCode, Sailing, SailingStatus,
};
use std::str::FromStr;

/// Creates an active CNSHA→USNYC sailing with the given vessel/voyage.
pub fn create_test_sailing(vessel: &str, voyage: &str) -> Sailing {
    Sailing {
        sailing_id: None,
        pol_cd: PortCode::new("CNSHA"),
        pod_cd: PortCode::new("USNYC"),
        vessel: vessel.to_string(),
        voyage: voyage.to_string(),
        data_version: 1,
        status: SailingStatus::Active,
        carrier_cd: Some(CarrierCode::new("MSK")),
        is_reference_carrier: Some(String::from("1")),
        route_cd: None,
        route_etd: None,
        eta: None,
        etd: None,
        total_duration: None,
        share_cabins: None,
        is_transit: None,
        transit_port_en: None,
        transit_port_cd: None,
        booking_cutoff: None,
        cy_open: None,
        cy_close: None,
        si_cutoff: None,
        fetch_timestamp: 1_747_000_000,
        fetch_date: String::from("2025-05-12 08:00:00"),
        remark: None,
    }
}

/// Creates an empty supplement keyed to the given sailing's own carrier.
pub fn create_test_supplement(sailing: &Sailing) -> CarrierSupplement {
    CarrierSupplement::empty(
        sailing
            .carrier_cd
            .clone()
            .unwrap_or_else(|| CarrierCode::new("MSK")),
        sailing.pol_cd.clone(),
        sailing.pod_cd.clone(),
        sailing.vessel.clone(),
        sailing.voyage.clone(),
    )
}

/// Parses a decimal literal for test expectations.
pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}
