// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_sailing;
use crate::{Persistence, PersistenceError, UpsertOutcome};
use sailplan_domain::{PortCode, Sailing, SailingStatus};

fn route() -> (PortCode, PortCode) {
    (PortCode::new("CNSHA"), PortCode::new("USNYC"))
}

#[test]
fn test_upsert_inserts_then_updates_on_same_identity() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let sailing: Sailing = create_test_sailing("EVER GIVEN", "2501E", 1);

    let first: UpsertOutcome = persistence.upsert_sailing(&sailing).unwrap();
    assert!(first.is_created());

    let mut changed: Sailing = sailing.clone();
    changed.etd = Some(String::from("2025-05-21"));
    let second: UpsertOutcome = persistence.upsert_sailing(&changed).unwrap();

    assert!(!second.is_created());
    assert_eq!(second.id(), first.id());

    let stored: Sailing = persistence.get_sailing(first.id()).unwrap();
    assert_eq!(stored.etd.as_deref(), Some("2025-05-21"));
}

#[test]
fn test_same_voyage_in_new_version_is_a_separate_row() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let v1: UpsertOutcome = persistence
        .upsert_sailing(&create_test_sailing("EVER GIVEN", "2501E", 1))
        .unwrap();
    let v2: UpsertOutcome = persistence
        .upsert_sailing(&create_test_sailing("EVER GIVEN", "2501E", 2))
        .unwrap();

    assert!(v2.is_created());
    assert_ne!(v1.id(), v2.id());
}

#[test]
fn test_max_data_version_tracks_active_rows_per_route() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (pol, pod) = route();

    assert_eq!(persistence.max_data_version(&pol, &pod).unwrap(), None);

    persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E", 1))
        .unwrap();
    persistence
        .upsert_sailing(&create_test_sailing("VESSEL B", "002E", 3))
        .unwrap();

    assert_eq!(persistence.max_data_version(&pol, &pod).unwrap(), Some(3));

    let mut inactive: Sailing = create_test_sailing("VESSEL C", "003E", 7);
    inactive.status = SailingStatus::Inactive;
    persistence.upsert_sailing(&inactive).unwrap();

    // Inactive rows never move the version forward.
    assert_eq!(persistence.max_data_version(&pol, &pod).unwrap(), Some(3));
}

#[test]
fn test_next_data_version_is_global_max_plus_one() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(persistence.next_data_version().unwrap(), 1);

    persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E", 5))
        .unwrap();

    assert_eq!(persistence.next_data_version().unwrap(), 6);
}

#[test]
fn test_find_active_sailings_filters_status_and_version() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (pol, pod) = route();

    persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E", 2))
        .unwrap();
    persistence
        .upsert_sailing(&create_test_sailing("VESSEL B", "002E", 1))
        .unwrap();
    let mut inactive: Sailing = create_test_sailing("VESSEL C", "003E", 2);
    inactive.status = SailingStatus::Inactive;
    persistence.upsert_sailing(&inactive).unwrap();

    let sailings: Vec<Sailing> = persistence.find_active_sailings(&pol, &pod, 2).unwrap();

    assert_eq!(sailings.len(), 1);
    assert_eq!(sailings[0].vessel, "VESSEL A");
}

#[test]
fn test_delete_missing_sailing_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: PersistenceError = persistence.delete_sailing(424_242).unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_find_by_ids_returns_only_active_rows() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let kept: UpsertOutcome = persistence
        .upsert_sailing(&create_test_sailing("VESSEL A", "001E", 1))
        .unwrap();
    let mut inactive: Sailing = create_test_sailing("VESSEL B", "002E", 1);
    inactive.status = SailingStatus::Inactive;
    let dropped: UpsertOutcome = persistence.upsert_sailing(&inactive).unwrap();

    let found: Vec<Sailing> = persistence
        .find_active_sailings_by_ids(&[kept.id(), dropped.id()])
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sailing_id, Some(kept.id()));
}
