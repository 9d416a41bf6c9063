// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partitioning of a route's sailings into shared-cabin groups.

use sailplan_domain::{CarrierCode, Sailing};
use std::collections::HashMap;

/// A set of sailings operated by an identical carrier combination.
///
/// Two sailings land in the same group iff their cooperating-carrier sets
/// are equal as sets; ordering and duplication in the source blob are
/// irrelevant. The `group_id` is a first-seen sequence label for
/// presentation only and must never be used for equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SailingGroup {
    /// Presentation label in first-seen order (`group_1`, `group_2`, ...).
    pub group_id: String,
    /// The shared carrier set, sorted ascending. Empty when no member
    /// resolves any carrier at all.
    pub carrier_codes: Vec<CarrierCode>,
    /// The member sailings, in input order.
    pub members: Vec<Sailing>,
}

impl SailingGroup {
    /// Returns the number of cooperating carriers in this group.
    #[must_use]
    pub fn cabins_count(&self) -> usize {
        self.carrier_codes.len()
    }
}

/// Partitions sailings into groups keyed by their carrier set.
///
/// The input is expected to be one route's active sailings at a single
/// data version; the function itself does not filter. Sailings with no
/// resolvable carrier are grouped under the empty key rather than
/// dropped, matching the behavior the query endpoint has always had.
#[must_use]
pub fn group_sailings(sailings: Vec<Sailing>) -> Vec<SailingGroup> {
    let mut groups: Vec<SailingGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for sailing in sailings {
        let carrier_codes: Vec<CarrierCode> = sailing.carrier_set();
        let key: String = group_key(&carrier_codes);

        if let Some(&index) = index_by_key.get(&key) {
            groups[index].members.push(sailing);
        } else {
            index_by_key.insert(key, groups.len());
            groups.push(SailingGroup {
                group_id: format!("group_{}", groups.len() + 1),
                carrier_codes,
                members: vec![sailing],
            });
        }
    }

    groups
}

/// Builds the comparable grouping key for a sorted carrier set.
fn group_key(carrier_codes: &[CarrierCode]) -> String {
    carrier_codes
        .iter()
        .map(CarrierCode::value)
        .collect::<Vec<&str>>()
        .join(",")
}
