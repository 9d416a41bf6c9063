// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB backend validation tests.
//!
//! These tests are `#[ignore]` and run only via `cargo xtask test-mariadb`,
//! which provisions the container and sets `DATABASE_URL`. They fail fast
//! when the infrastructure is missing rather than silently skipping.

use crate::tests::helpers::create_test_sailing;
use crate::{Persistence, UpsertOutcome};
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, PortCode, Sailing};
use std::str::FromStr;

fn mysql_persistence() -> Persistence {
    let url: String = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set; run via `cargo xtask test-mariadb`");
    Persistence::new_with_mysql(&url).expect("MariaDB must be reachable")
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mysql_sailing_upsert_round_trip() {
    let mut persistence: Persistence = mysql_persistence();
    let sailing: Sailing = create_test_sailing("MYSQL VESSEL", "9901E", 900);

    let first: UpsertOutcome = persistence.upsert_sailing(&sailing).unwrap();
    let second: UpsertOutcome = persistence.upsert_sailing(&sailing).unwrap();

    assert!(first.is_created());
    assert!(!second.is_created());
    assert_eq!(first.id(), second.id());

    let stored: Sailing = persistence.get_sailing(first.id()).unwrap();
    assert_eq!(stored.vessel, "MYSQL VESSEL");

    persistence.delete_sailing(first.id()).unwrap();
}

#[test]
#[ignore = "requires MariaDB; run via `cargo xtask test-mariadb`"]
fn test_mysql_supplement_round_trip() {
    let mut persistence: Persistence = mysql_persistence();
    let carrier: CarrierCode = CarrierCode::new("MSK");
    let pol: PortCode = PortCode::new("CNSHA");
    let pod: PortCode = PortCode::new("USNYC");

    let id: i64 = persistence
        .insert_empty_supplement(&carrier, &pol, &pod, "MYSQL VESSEL", "9902E")
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

    let stored: CarrierSupplement = persistence
        .get_supplement(&carrier, &pol, &pod, "MYSQL VESSEL", "9902E")
        .unwrap()
        .unwrap();
    assert_eq!(stored.price, Some(Decimal::from_str("4500.00").unwrap()));

    // Populated rows survive the conditional delete.
    assert!(
        !persistence
            .delete_supplement_if_empty(&carrier, &pol, &pod, "MYSQL VESSEL", "9902E")
            .unwrap()
    );
}
