// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-group recommendation fields.
//!
//! Each group derives a representative departure weekday, the shortest
//! transit, a representative price, and container-availability flags from
//! its members and their paired carrier supplements.

use crate::grouping::SailingGroup;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, Sailing};
use std::collections::BTreeMap;

/// Weekday sort rank for members without a parseable departure weekday.
const WEEKDAY_NONE_RANK: u16 = 999;

/// One group member: a sailing joined with the supplement of its own
/// primary carrier, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    /// The schedule fact.
    pub sailing: Sailing,
    /// The operator-entered supplement paired to this sailing.
    pub supplement: Option<CarrierSupplement>,
}

/// A shared-cabin group enriched with its derived recommendation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// Presentation label in first-seen order.
    pub group_id: String,
    /// The shared carrier set, sorted ascending.
    pub carrier_codes: Vec<CarrierCode>,
    /// Number of cooperating carriers.
    pub cabins_count: usize,
    /// Representative departure weekday.
    pub plan_open: Option<u8>,
    /// Shortest transit duration in days.
    pub plan_duration: Option<u32>,
    /// Representative price, from the earliest-departing member only.
    pub cabin_price: Option<Decimal>,
    /// Whether any member reports 20ft container availability.
    pub has_gp_20: bool,
    /// Whether any member reports 40ft container availability.
    pub has_hq_40: bool,
    /// Members sorted ascending by departure weekday, nulls last.
    pub members: Vec<GroupMember>,
}

/// Computes the derived fields for one group.
///
/// `supplements` are matched positionally to `group.members`; the caller
/// joins each sailing to the supplement of its own primary carrier.
#[must_use]
pub fn summarize_group(
    group: SailingGroup,
    supplements: Vec<Option<CarrierSupplement>>,
) -> GroupSummary {
    let SailingGroup {
        group_id,
        carrier_codes,
        members,
    } = group;

    let mut members: Vec<GroupMember> = members
        .into_iter()
        .zip(supplements)
        .map(|(sailing, supplement)| GroupMember {
            sailing,
            supplement,
        })
        .collect();
    members.sort_by_key(|member| weekday_rank(&member.sailing));

    let cabins_count: usize = carrier_codes.len();
    let plan_open: Option<u8> = representative_weekday(&members);
    let plan_duration: Option<u32> = shortest_duration(&members);
    let cabin_price: Option<Decimal> = representative_price(&members);
    let has_gp_20: bool = members
        .iter()
        .any(|m| m.supplement.as_ref().is_some_and(CarrierSupplement::has_gp_20));
    let has_hq_40: bool = members
        .iter()
        .any(|m| m.supplement.as_ref().is_some_and(CarrierSupplement::has_hq_40));

    GroupSummary {
        group_id,
        carrier_codes,
        cabins_count,
        plan_open,
        plan_duration,
        cabin_price,
        has_gp_20,
        has_hq_40,
        members,
    }
}

/// Sorts group summaries ascending by representative weekday, nulls last.
///
/// The sort is stable, so groups without a weekday keep their first-seen
/// order at the tail.
pub fn sort_summaries(summaries: &mut [GroupSummary]) {
    summaries.sort_by_key(|summary| {
        summary
            .plan_open
            .map_or(WEEKDAY_NONE_RANK, std::convert::Into::into)
    });
}

fn weekday_rank(sailing: &Sailing) -> u16 {
    sailing
        .departure_weekday()
        .map_or(WEEKDAY_NONE_RANK, std::convert::Into::into)
}

/// Picks the most frequent departure weekday; ties break to the smallest
/// value (the earliest day in the weekly cycle).
fn representative_weekday(members: &[GroupMember]) -> Option<u8> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for member in members {
        if let Some(weekday) = member.sailing.departure_weekday() {
            *counts.entry(weekday).or_insert(0) += 1;
        }
    }

    let max_count: usize = counts.values().copied().max()?;
    // BTreeMap iterates keys ascending, so the first hit is the smallest.
    counts
        .iter()
        .find(|&(_, &count)| count == max_count)
        .map(|(&weekday, _)| weekday)
}

fn shortest_duration(members: &[GroupMember]) -> Option<u32> {
    members
        .iter()
        .filter_map(|member| member.sailing.transit_days())
        .min()
}

/// Selects the group's representative price.
///
/// Only members whose `etd` parses as a date are considered; the member
/// with the strictly earliest date wins, and the group price is that
/// member's own supplement price or nothing. A price on any other member
/// never substitutes, even when the earliest-dated member has none —
/// callers render the unavailable sentinel in that case. Kept exactly
/// compatible with the long-standing endpoint behavior.
fn representative_price(members: &[GroupMember]) -> Option<Decimal> {
    let mut earliest: Option<(NaiveDate, &GroupMember)> = None;
    for member in members {
        if let Some(date) = member.sailing.etd_date() {
            let is_earlier = earliest.is_none_or(|(current, _)| date < current);
            if is_earlier {
                earliest = Some((date, member));
            }
        }
    }

    earliest
        .and_then(|(_, member)| member.supplement.as_ref())
        .and_then(|supplement| supplement.price)
}
