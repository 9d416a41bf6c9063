// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cabin-grouping query service.
//!
//! Orchestrates one query/response cycle: snapshot-read the route's
//! active sailings at the latest data version, join each to the
//! supplement of its own primary carrier, run the grouping engine and
//! aggregate calculator, and shape the result for the wire.

use crate::capabilities::{Capability, Role, authorize};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CabinGroupingRequest, CabinGroupingResponse, GroupInfo, RouteFilter, ScheduleInfo,
    SupplementInfo, UNAVAILABLE_SENTINEL,
};
use sailplan::{GroupMember, GroupSummary, group_sailings, sort_summaries, summarize_group};
use sailplan_domain::{CarrierSupplement, PortCode, Sailing, validate_route_pair};
use sailplan_persistence::Persistence;
use tracing::{debug, info};

/// Handles the cabin-grouping query for one route.
///
/// A route with no data yields a well-formed empty response, not an
/// error; only malformed input or storage failures are surfaced.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability, the port codes
/// are invalid, or a storage operation fails.
pub fn query_cabin_groups(
    persistence: &mut Persistence,
    role: Role,
    request: &CabinGroupingRequest,
) -> Result<CabinGroupingResponse, ApiError> {
    authorize(role, Capability::QuerySchedules)?;

    let (pol_cd, pod_cd): (PortCode, PortCode) =
        validate_route_pair(&request.pol_cd, &request.pod_cd).map_err(translate_domain_error)?;
    let filter: RouteFilter = RouteFilter {
        pol_cd: pol_cd.value().to_string(),
        pod_cd: pod_cd.value().to_string(),
    };

    info!(pol = %pol_cd, pod = %pod_cd, "Handling cabin grouping query");

    let Some(version) = persistence
        .max_data_version(&pol_cd, &pod_cd)
        .map_err(translate_persistence_error)?
    else {
        return Ok(CabinGroupingResponse {
            version: None,
            total_groups: 0,
            filter,
            groups: Vec::new(),
        });
    };

    let sailings: Vec<Sailing> = persistence
        .find_active_sailings(&pol_cd, &pod_cd, version)
        .map_err(translate_persistence_error)?;
    debug!(version, sailings = sailings.len(), "Loaded route snapshot");

    let mut summaries: Vec<GroupSummary> = Vec::new();
    for group in group_sailings(sailings) {
        let mut supplements: Vec<Option<CarrierSupplement>> =
            Vec::with_capacity(group.members.len());
        for member in &group.members {
            supplements.push(lookup_supplement(persistence, member)?);
        }
        summaries.push(summarize_group(group, supplements));
    }
    sort_summaries(&mut summaries);

    let groups: Vec<GroupInfo> = summaries.into_iter().map(group_to_info).collect();

    Ok(CabinGroupingResponse {
        version: Some(version),
        total_groups: groups.len(),
        filter,
        groups,
    })
}

/// Joins one sailing to the supplement of its own primary carrier.
fn lookup_supplement(
    persistence: &mut Persistence,
    sailing: &Sailing,
) -> Result<Option<CarrierSupplement>, ApiError> {
    let Some(carrier_cd) = sailing.carrier_cd.as_ref() else {
        return Ok(None);
    };
    persistence
        .get_supplement(
            carrier_cd,
            &sailing.pol_cd,
            &sailing.pod_cd,
            &sailing.vessel,
            &sailing.voyage,
        )
        .map_err(translate_persistence_error)
}

fn group_to_info(summary: GroupSummary) -> GroupInfo {
    let cabin_price: String = summary
        .cabin_price
        .map_or_else(|| UNAVAILABLE_SENTINEL.to_string(), |price| price.to_string());

    GroupInfo {
        group_id: summary.group_id,
        cabins_count: summary.cabins_count,
        carrier_codes: summary
            .carrier_codes
            .iter()
            .map(|code| code.value().to_string())
            .collect(),
        plan_open: summary.plan_open,
        plan_duration: summary.plan_duration,
        cabin_price,
        is_has_gp_20: summary.has_gp_20,
        is_has_hq_40: summary.has_hq_40,
        schedules: summary.members.into_iter().map(member_to_info).collect(),
    }
}

fn member_to_info(member: GroupMember) -> ScheduleInfo {
    let GroupMember {
        sailing,
        supplement,
    } = member;

    // Echo the parsed blob; a missing or malformed blob renders as [].
    let share_cabins: serde_json::Value = sailing
        .share_cabins
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

    ScheduleInfo {
        id: sailing.sailing_id.unwrap_or_default(),
        vessel: sailing.vessel,
        voyage: sailing.voyage,
        pol_cd: sailing.pol_cd.value().to_string(),
        pod_cd: sailing.pod_cd.value().to_string(),
        eta: sailing.eta,
        etd: sailing.etd,
        route_etd: sailing.route_etd,
        carrier_cd: sailing.carrier_cd.map(|code| code.value().to_string()),
        total_duration: sailing.total_duration,
        share_cabins,
        vessel_info: supplement.map(supplement_to_info),
    }
}

/// Shapes a supplement for the wire, substituting the sentinel for
/// absent values.
pub(crate) fn supplement_to_info(supplement: CarrierSupplement) -> SupplementInfo {
    let or_sentinel =
        |value: Option<String>| value.unwrap_or_else(|| UNAVAILABLE_SENTINEL.to_string());

    SupplementInfo {
        id: supplement.supplement_id.unwrap_or_default(),
        carrier_cd: supplement.carrier_cd.value().to_string(),
        gp_20: or_sentinel(supplement.gp_20),
        hq_40: or_sentinel(supplement.hq_40),
        cut_off_time: or_sentinel(supplement.cut_off_time),
        price: supplement
            .price
            .map_or_else(|| UNAVAILABLE_SENTINEL.to_string(), |p| p.to_string()),
    }
}
