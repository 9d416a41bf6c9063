// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sailplan_domain::{CarrierCode, PortCode, Sailing, SailingStatus};
use sailplan_persistence::Persistence;

/// Creates an in-memory persistence adapter.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates an active CNSHA→USNYC sailing cooperating as MSK+ONE.
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
        route_cd: Some(String::from("TP1")),
        route_etd: Some(String::from("3")),
        eta: None,
        etd: Some(String::from("2025-05-20")),
        total_duration: Some(String::from("26")),
        share_cabins: Some(String::from(r#"[{"carrierCd":"MSK"},{"carrierCd":"ONE"}]"#)),
        is_transit: Some(String::from("0")),
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
