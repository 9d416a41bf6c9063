// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, PortCode};
use std::str::FromStr;

struct Key {
    carrier: CarrierCode,
    pol: PortCode,
    pod: PortCode,
}

fn key() -> Key {
    Key {
        carrier: CarrierCode::new("MSK"),
        pol: PortCode::new("CNSHA"),
        pod: PortCode::new("USNYC"),
    }
}

fn insert(persistence: &mut Persistence, k: &Key) -> i64 {
    persistence
        .insert_empty_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap()
}

#[test]
fn test_supplement_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();

    let id: i64 = insert(&mut persistence, &k);
    let stored: CarrierSupplement = persistence
        .get_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap()
        .unwrap();

    assert_eq!(stored.supplement_id, Some(id));
    assert!(stored.has_no_operator_data());
}

#[test]
fn test_missing_supplement_is_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();

    let stored: Option<CarrierSupplement> = persistence
        .get_supplement(&k.carrier, &k.pol, &k.pod, "NO SUCH", "000W")
        .unwrap();

    assert!(stored.is_none());
}

#[test]
fn test_operator_fields_survive_as_written() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();
    let id: i64 = insert(&mut persistence, &k);

    persistence
        .update_supplement_operator_fields(
            id,
            Some("3"),
            None,
            Some("2025-05-18 12:00"),
            Some(Decimal::from_str("4500.00").unwrap()),
        )
        .unwrap();

    let stored: CarrierSupplement = persistence
        .get_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap()
        .unwrap();

    assert_eq!(stored.gp_20.as_deref(), Some("3"));
    assert_eq!(stored.hq_40, None);
    assert_eq!(stored.cut_off_time.as_deref(), Some("2025-05-18 12:00"));
    assert_eq!(stored.price, Some(Decimal::from_str("4500.00").unwrap()));
}

#[test]
fn test_updating_missing_supplement_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: PersistenceError = persistence
        .update_supplement_operator_fields(424_242, None, None, None, None)
        .unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_identity_update_keeps_operator_fields() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();
    let id: i64 = insert(&mut persistence, &k);

    persistence
        .update_supplement_operator_fields(
            id,
            None,
            None,
            None,
            Some(Decimal::from_str("1200").unwrap()),
        )
        .unwrap();
    persistence
        .update_supplement_identity(id, &k.pol, &k.pod, "EVER GIVEN", "2502W")
        .unwrap();

    let stored: CarrierSupplement = persistence
        .get_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2502W")
        .unwrap()
        .unwrap();

    assert_eq!(stored.price, Some(Decimal::from_str("1200").unwrap()));
}

#[test]
fn test_delete_if_empty_removes_blank_rows_only() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();
    insert(&mut persistence, &k);

    let deleted: bool = persistence
        .delete_supplement_if_empty(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap();

    assert!(deleted);
    assert!(
        persistence
            .get_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_if_empty_preserves_operator_data() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();
    let id: i64 = insert(&mut persistence, &k);
    persistence
        .update_supplement_operator_fields(
            id,
            None,
            None,
            None,
            Some(Decimal::from_str("4500.00").unwrap()),
        )
        .unwrap();

    let deleted: bool = persistence
        .delete_supplement_if_empty(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap();

    assert!(!deleted);
    assert!(
        persistence
            .get_supplement(&k.carrier, &k.pol, &k.pod, "EVER GIVEN", "2501E")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_fill_statistics() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let k: Key = key();
    let first: i64 = insert(&mut persistence, &k);
    persistence
        .insert_empty_supplement(&CarrierCode::new("ONE"), &k.pol, &k.pod, "EVER GIVEN", "2501E")
        .unwrap();

    persistence
        .update_supplement_operator_fields(first, Some("available"), None, None, None)
        .unwrap();

    assert_eq!(persistence.count_supplements().unwrap(), 2);
    assert_eq!(persistence.count_filled_supplements().unwrap(), 1);
}
