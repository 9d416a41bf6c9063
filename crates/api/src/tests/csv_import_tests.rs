// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capabilities::Role;
use crate::csv_import::import_supplements_csv;
use crate::reconcile::save_sailing;
use crate::request_response::{CsvRowStatus, ImportReport};
use crate::ApiError;
use crate::tests::helpers::{create_test_persistence, create_test_sailing};
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, PortCode};
use sailplan_persistence::Persistence;
use std::str::FromStr;

const HEADER: &str = "carrier_cd,pol_cd,pod_cd,vessel,voyage,gp_20,hq_40,cut_off_time,price";

#[test]
fn test_import_creates_and_updates_rows() {
    let mut persistence: Persistence = create_test_persistence();
    save_sailing(&mut persistence, &create_test_sailing("EVER GIVEN", "2501E")).unwrap();

    let csv_text: String = format!(
        "{HEADER}\nMSK,CNSHA,USNYC,EVER GIVEN,2501E,3,,2025-05-18,4500.00\nMSC,CNSHA,USNYC,OTHER VESSEL,7701W,,,,1200\n"
    );

    let report: ImportReport =
        import_supplements_csv(&mut persistence, Role::Operator, &csv_text, false).unwrap();

    assert_eq!(report.updated, 1, "existing MSK supplement is overwritten");
    assert_eq!(report.created, 1, "unknown MSC key is created");
    assert_eq!(report.invalid, 0);

    let msk = persistence
        .get_supplement(
            &CarrierCode::new("MSK"),
            &PortCode::new("CNSHA"),
            &PortCode::new("USNYC"),
            "EVER GIVEN",
            "2501E",
        )
        .unwrap()
        .unwrap();
    assert_eq!(msk.price, Some(Decimal::from_str("4500.00").unwrap()));
    assert_eq!(msk.gp_20.as_deref(), Some("3"));
}

#[test]
fn test_bad_rows_are_reported_not_fatal() {
    let mut persistence: Persistence = create_test_persistence();

    let csv_text: String = format!(
        "{HEADER}\n,CNSHA,USNYC,EVER GIVEN,2501E,,,,\nMSK,CNSHA,USNYC,EVER GIVEN,2501E,,,,not-a-price\nMSK,CNSHA,USNYC,EVER GIVEN,2501E,,,,\n"
    );

    let report: ImportReport =
        import_supplements_csv(&mut persistence, Role::Operator, &csv_text, false).unwrap();

    assert_eq!(report.invalid, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.rows[0].status, CsvRowStatus::Invalid);
    assert!(report.rows[0].message.as_deref().unwrap().contains("carrier_cd"));
    assert_eq!(report.rows[1].status, CsvRowStatus::Invalid);
    assert_eq!(report.rows[2].status, CsvRowStatus::Created);
}

#[test]
fn test_missing_header_fails_the_document() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = import_supplements_csv(
        &mut persistence,
        Role::Operator,
        "carrier_cd,pol_cd\nMSK,CNSHA\n",
        false,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_dry_run_reports_without_writing() {
    let mut persistence: Persistence = create_test_persistence();

    let csv_text: String =
        format!("{HEADER}\nMSK,CNSHA,USNYC,EVER GIVEN,2501E,,,,4500.00\n");

    let report: ImportReport =
        import_supplements_csv(&mut persistence, Role::Operator, &csv_text, true).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.created, 1);
    assert_eq!(persistence.count_supplements().unwrap(), 0);
}

#[test]
fn test_import_requires_operator_role() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError =
        import_supplements_csv(&mut persistence, Role::Viewer, HEADER, false).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
