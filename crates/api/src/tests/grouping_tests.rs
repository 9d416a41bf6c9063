// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capabilities::Role;
use crate::grouping::query_cabin_groups;
use crate::reconcile::save_sailing;
use crate::request_response::{CabinGroupingRequest, CabinGroupingResponse};
use crate::ApiError;
use crate::tests::helpers::{create_test_persistence, create_test_sailing};
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, PortCode, Sailing};
use sailplan_persistence::Persistence;
use std::str::FromStr;

fn request() -> CabinGroupingRequest {
    CabinGroupingRequest {
        pol_cd: String::from("CNSHA"),
        pod_cd: String::from("USNYC"),
    }
}

#[test]
fn test_missing_route_data_yields_empty_response() {
    let mut persistence: Persistence = create_test_persistence();

    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request()).unwrap();

    assert_eq!(response.version, None);
    assert_eq!(response.total_groups, 0);
    assert!(response.groups.is_empty());
    assert_eq!(response.filter.pol_cd, "CNSHA");
}

#[test]
fn test_blank_port_code_is_a_client_error() {
    let mut persistence: Persistence = create_test_persistence();
    let bad: CabinGroupingRequest = CabinGroupingRequest {
        pol_cd: String::from("  "),
        pod_cd: String::from("USNYC"),
    };

    let err: ApiError = query_cabin_groups(&mut persistence, Role::Viewer, &bad).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_query_uses_latest_data_version_only() {
    let mut persistence: Persistence = create_test_persistence();
    save_sailing(&mut persistence, &create_test_sailing("OLD VESSEL", "001E")).unwrap();
    let mut newer: Sailing = create_test_sailing("NEW VESSEL", "002E");
    newer.data_version = 2;
    save_sailing(&mut persistence, &newer).unwrap();

    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request()).unwrap();

    assert_eq!(response.version, Some(2));
    assert_eq!(response.total_groups, 1);
    assert_eq!(response.groups[0].schedules.len(), 1);
    assert_eq!(response.groups[0].schedules[0].vessel, "NEW VESSEL");
}

#[test]
fn test_end_to_end_grouping_response() {
    let mut persistence: Persistence = create_test_persistence();

    let mut first: Sailing = create_test_sailing("VESSEL A", "001E");
    first.route_etd = Some(String::from("3"));
    first.total_duration = Some(String::from("26"));
    first.etd = Some(String::from("2025-05-20"));
    save_sailing(&mut persistence, &first).unwrap();

    let mut second: Sailing = create_test_sailing("VESSEL B", "002E");
    second.share_cabins = Some(String::from(r#"["MSK","ONE"]"#));
    second.route_etd = Some(String::from("3"));
    second.total_duration = Some(String::from("30"));
    second.etd = Some(String::from("2025-06-01"));
    save_sailing(&mut persistence, &second).unwrap();

    // Operator fills in the MSK supplement for the earliest sailing.
    let msk: CarrierCode = CarrierCode::new("MSK");
    let pol: PortCode = PortCode::new("CNSHA");
    let pod: PortCode = PortCode::new("USNYC");
    let id: i64 = persistence
        .get_supplement(&msk, &pol, &pod, "VESSEL A", "001E")
        .unwrap()
        .unwrap()
        .supplement_id
        .unwrap();
    persistence
        .update_supplement_operator_fields(
            id,
            Some("available"),
            None,
            None,
            Some(Decimal::from_str("4500.00").unwrap()),
        )
        .unwrap();

    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request()).unwrap();

    assert_eq!(response.version, Some(1));
    assert_eq!(response.total_groups, 1);
    let group = &response.groups[0];
    assert_eq!(group.group_id, "group_1");
    assert_eq!(group.carrier_codes, vec!["MSK", "ONE"]);
    assert_eq!(group.cabins_count, 2);
    assert_eq!(group.plan_open, Some(3));
    assert_eq!(group.plan_duration, Some(26));
    assert_eq!(group.cabin_price, "4500.00");
    assert!(group.is_has_gp_20);
    assert!(!group.is_has_hq_40);
    assert_eq!(group.schedules.len(), 2);
    assert!(group.schedules[0].vessel_info.is_some());
}

#[test]
fn test_price_unavailable_when_earliest_sailing_has_none() {
    let mut persistence: Persistence = create_test_persistence();

    let mut earliest: Sailing = create_test_sailing("VESSEL A", "001E");
    earliest.etd = Some(String::from("2025-05-14"));
    save_sailing(&mut persistence, &earliest).unwrap();

    let mut later: Sailing = create_test_sailing("VESSEL B", "002E");
    later.etd = Some(String::from("2025-06-01"));
    save_sailing(&mut persistence, &later).unwrap();

    // Only the later sailing's supplement carries a price.
    let id: i64 = persistence
        .get_supplement(
            &CarrierCode::new("MSK"),
            &PortCode::new("CNSHA"),
            &PortCode::new("USNYC"),
            "VESSEL B",
            "002E",
        )
        .unwrap()
        .unwrap()
        .supplement_id
        .unwrap();
    persistence
        .update_supplement_operator_fields(
            id,
            None,
            None,
            None,
            Some(Decimal::from_str("90").unwrap()),
        )
        .unwrap();

    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request()).unwrap();

    assert_eq!(response.groups[0].cabin_price, "--");
}

#[test]
fn test_groups_sort_by_plan_open_nulls_last() {
    let mut persistence: Persistence = create_test_persistence();

    let mut friday: Sailing = create_test_sailing("VESSEL A", "001E");
    friday.share_cabins = Some(String::from(r#"["CMA"]"#));
    friday.route_etd = Some(String::from("5"));
    save_sailing(&mut persistence, &friday).unwrap();

    let mut unknown: Sailing = create_test_sailing("VESSEL B", "002E");
    unknown.share_cabins = Some(String::from(r#"["HPL"]"#));
    unknown.route_etd = None;
    save_sailing(&mut persistence, &unknown).unwrap();

    let mut tuesday: Sailing = create_test_sailing("VESSEL C", "003E");
    tuesday.share_cabins = Some(String::from(r#"["MSK","ONE"]"#));
    tuesday.route_etd = Some(String::from("2"));
    save_sailing(&mut persistence, &tuesday).unwrap();

    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request()).unwrap();

    let plan_opens: Vec<Option<u8>> =
        response.groups.iter().map(|g| g.plan_open).collect();
    assert_eq!(plan_opens, vec![Some(2), Some(5), None]);
}
