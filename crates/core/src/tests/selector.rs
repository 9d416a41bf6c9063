// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::selector::select_preferred_rows;
use sailplan_domain::FeedSailing;
use serde_json::json;

fn feed_row(vessel: &str, voyage: &str, carrier: &str, reference: &str, cabins: usize) -> FeedSailing {
    let share_cabins: Vec<serde_json::Value> = (0..cabins)
        .map(|i| json!({"carrierCd": format!("C{i}")}))
        .collect();
    FeedSailing {
        vessel: Some(vessel.to_string()),
        voyage: Some(voyage.to_string()),
        carrier_cd: Some(carrier.to_string()),
        is_reference_carrier: Some(reference.to_string()),
        pol_cd: Some(String::from("CNSHA")),
        pod_cd: Some(String::from("USNYC")),
        share_cabins: Some(serde_json::Value::Array(share_cabins)),
        ..FeedSailing::default()
    }
}

#[test]
fn test_single_cabin_reference_row_wins_over_plain_reference() {
    let multi: FeedSailing = feed_row("VESSEL A", "001E", "MSK", "1", 3);
    let single: FeedSailing = feed_row("VESSEL A", "001E", "ONE", "1", 1);

    let selected: Vec<FeedSailing> = select_preferred_rows(vec![multi, single], Some("USNYC"));

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].carrier_cd.as_deref(), Some("ONE"));
}

#[test]
fn test_first_reference_row_wins_when_no_single_cabin_row_exists() {
    let first: FeedSailing = feed_row("VESSEL A", "001E", "MSK", "1", 3);
    let second: FeedSailing = feed_row("VESSEL A", "001E", "ONE", "1", 2);

    let selected: Vec<FeedSailing> = select_preferred_rows(vec![first, second], Some("USNYC"));

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].carrier_cd.as_deref(), Some("MSK"));
}

#[test]
fn test_partition_without_reference_carrier_is_dropped() {
    let a: FeedSailing = feed_row("VESSEL A", "001E", "MSK", "0", 1);
    let b: FeedSailing = feed_row("VESSEL A", "001E", "ONE", "0", 1);
    let kept: FeedSailing = feed_row("VESSEL B", "002E", "CMA", "1", 1);

    let selected: Vec<FeedSailing> = select_preferred_rows(vec![a, b, kept], Some("USNYC"));

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].vessel.as_deref(), Some("VESSEL B"));
}

#[test]
fn test_rows_for_other_destinations_are_filtered_out() {
    let wanted: FeedSailing = feed_row("VESSEL A", "001E", "MSK", "1", 1);
    let mut other: FeedSailing = feed_row("VESSEL B", "002E", "ONE", "1", 1);
    other.pod_cd = Some(String::from("USLAX"));

    let selected: Vec<FeedSailing> = select_preferred_rows(vec![wanted, other], Some("USNYC"));

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].vessel.as_deref(), Some("VESSEL A"));
}

#[test]
fn test_destination_is_inferred_from_first_row_when_not_requested() {
    let mut first: FeedSailing = feed_row("VESSEL A", "001E", "MSK", "1", 1);
    first.pod_cd = Some(String::from("VNVUT"));
    let mut second: FeedSailing = feed_row("VESSEL B", "002E", "ONE", "1", 1);
    second.pod_cd = Some(String::from("USNYC"));

    let selected: Vec<FeedSailing> = select_preferred_rows(vec![first, second], None);

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].pod_cd.as_deref(), Some("VNVUT"));
}

#[test]
fn test_one_row_per_vessel_voyage_pair() {
    let rows: Vec<FeedSailing> = vec![
        feed_row("VESSEL A", "001E", "MSK", "1", 1),
        feed_row("VESSEL A", "001E", "ONE", "1", 1),
        feed_row("VESSEL B", "002E", "CMA", "1", 2),
        feed_row("VESSEL B", "002E", "HPL", "1", 1),
    ];

    let selected: Vec<FeedSailing> = select_preferred_rows(rows, Some("USNYC"));

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].carrier_cd.as_deref(), Some("MSK"));
    assert_eq!(selected[1].carrier_cd.as_deref(), Some("HPL"));
}
