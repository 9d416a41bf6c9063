// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capabilities::Role;
use crate::reconcile::{
    cleanup_sailing_deleted, delete_sailing, reconcile_supplements, save_sailing,
    sync_sailing_saved,
};
use crate::request_response::{SyncCounts, SyncReport, SyncRequest};
use crate::tests::helpers::{create_test_persistence, create_test_sailing};
use crate::ApiError;
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, PortCode, Sailing, SailingStatus};
use sailplan_persistence::Persistence;
use std::str::FromStr;

fn supplement_exists(persistence: &mut Persistence, carrier: &str) -> bool {
    persistence
        .get_supplement(
            &CarrierCode::new(carrier),
            &PortCode::new("CNSHA"),
            &PortCode::new("USNYC"),
            "EVER GIVEN",
            "2501E",
        )
        .unwrap()
        .is_some()
}

#[test]
fn test_save_fans_out_one_supplement_per_carrier() {
    let mut persistence: Persistence = create_test_persistence();
    let sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");

    let (outcome, counts) = save_sailing(&mut persistence, &sailing).unwrap();

    assert!(outcome.is_created());
    assert_eq!(counts, SyncCounts { created: 2, updated: 0 });
    assert!(supplement_exists(&mut persistence, "MSK"));
    assert!(supplement_exists(&mut persistence, "ONE"));
}

#[test]
fn test_resaving_is_idempotent_and_preserves_operator_price() {
    let mut persistence: Persistence = create_test_persistence();
    let sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");
    save_sailing(&mut persistence, &sailing).unwrap();

    // Operator fills in a price between the two saves.
    let msk: CarrierCode = CarrierCode::new("MSK");
    let pol: PortCode = PortCode::new("CNSHA");
    let pod: PortCode = PortCode::new("USNYC");
    let id: i64 = persistence
        .get_supplement(&msk, &pol, &pod, "EVER GIVEN", "2501E")
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
            Some(Decimal::from_str("4500.00").unwrap()),
        )
        .unwrap();

    let (_, counts) = save_sailing(&mut persistence, &sailing).unwrap();

    assert_eq!(counts, SyncCounts::default(), "nothing new to create or update");
    assert_eq!(persistence.count_supplements().unwrap(), 2);
    let stored = persistence
        .get_supplement(&msk, &pol, &pod, "EVER GIVEN", "2501E")
        .unwrap()
        .unwrap();
    assert_eq!(stored.price, Some(Decimal::from_str("4500.00").unwrap()));
}

#[test]
fn test_inactive_sailing_is_skipped_entirely() {
    let mut persistence: Persistence = create_test_persistence();
    let mut sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");
    sailing.status = SailingStatus::Inactive;

    let counts: SyncCounts = sync_sailing_saved(&mut persistence, &sailing).unwrap();

    assert_eq!(counts, SyncCounts::default());
    assert_eq!(persistence.count_supplements().unwrap(), 0);
}

#[test]
fn test_delete_removes_empty_supplements() {
    let mut persistence: Persistence = create_test_persistence();
    let sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");
    let (outcome, _) = save_sailing(&mut persistence, &sailing).unwrap();

    let deleted: usize = delete_sailing(&mut persistence, Role::Admin, outcome.id()).unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(persistence.count_supplements().unwrap(), 0);
}

#[test]
fn test_delete_preserves_supplements_with_operator_data() {
    let mut persistence: Persistence = create_test_persistence();
    let sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");
    let (outcome, _) = save_sailing(&mut persistence, &sailing).unwrap();

    let id: i64 = persistence
        .get_supplement(
            &CarrierCode::new("MSK"),
            &PortCode::new("CNSHA"),
            &PortCode::new("USNYC"),
            "EVER GIVEN",
            "2501E",
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
            Some(Decimal::from_str("4500.00").unwrap()),
        )
        .unwrap();

    let deleted: usize = delete_sailing(&mut persistence, Role::Admin, outcome.id()).unwrap();

    // Only the empty ONE supplement goes; the priced MSK row stays.
    assert_eq!(deleted, 1);
    assert!(supplement_exists(&mut persistence, "MSK"));
    assert!(!supplement_exists(&mut persistence, "ONE"));
}

#[test]
fn test_cleanup_recomputes_carrier_set_from_blob() {
    let mut persistence: Persistence = create_test_persistence();
    let mut sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E");
    sailing.share_cabins = None;
    save_sailing(&mut persistence, &sailing).unwrap();

    // Fallback carrier only.
    assert_eq!(persistence.count_supplements().unwrap(), 1);

    let removed: usize = cleanup_sailing_deleted(&mut persistence, &sailing).unwrap();
    assert_eq!(removed, 1);
}

#[test]
fn test_batch_reconcile_reports_counters() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E"))
        .unwrap();
    persistence
        .upsert_sailing(&create_test_sailing("VESSEL B", "002E"))
        .unwrap();

    let report: SyncReport = reconcile_supplements(
        &mut persistence,
        Role::Admin,
        &SyncRequest::default(),
    )
    .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 4);
    assert_eq!(report.updated, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.errors, 0);
}

#[test]
fn test_batch_reconcile_dry_run_mutates_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E"))
        .unwrap();

    let request: SyncRequest = SyncRequest {
        dry_run: true,
        ..SyncRequest::default()
    };
    let report: SyncReport =
        reconcile_supplements(&mut persistence, Role::Admin, &request).unwrap();

    assert_eq!(report.created, 2, "dry run still reports would-create counts");
    assert_eq!(persistence.count_supplements().unwrap(), 0);
}

#[test]
fn test_batch_reconcile_rejects_unknown_ids() {
    let mut persistence: Persistence = create_test_persistence();

    let request: SyncRequest = SyncRequest {
        sailing_ids: Some(vec![424_242]),
        ..SyncRequest::default()
    };
    let err: ApiError =
        reconcile_supplements(&mut persistence, Role::Admin, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_batch_reconcile_requires_admin() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = reconcile_supplements(
        &mut persistence,
        Role::Operator,
        &SyncRequest::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
