// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Supplement lookup, operator editing, and sync statistics.

use crate::capabilities::{Capability, Role, authorize};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::grouping::supplement_to_info;
use crate::request_response::{
    SupplementInfo, SupplementQuery, SupplementUpdateRequest, SyncStatusResponse,
};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, DomainError, PortCode, validate_route_pair};
use sailplan_persistence::Persistence;
use std::str::FromStr;
use tracing::info;

/// Resolves a supplement query's key fields.
fn resolve_key(
    carrier_cd: &str,
    pol_cd: &str,
    pod_cd: &str,
) -> Result<(CarrierCode, PortCode, PortCode), ApiError> {
    let carrier: CarrierCode = CarrierCode::new(carrier_cd);
    if carrier.is_empty() {
        return Err(translate_domain_error(DomainError::EmptyCarrierCode));
    }
    let (pol, pod): (PortCode, PortCode) =
        validate_route_pair(pol_cd, pod_cd).map_err(translate_domain_error)?;
    Ok((carrier, pol, pod))
}

/// Looks up one supplement by its exact key.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability, the key is
/// invalid, or no supplement matches.
pub fn get_supplement_info(
    persistence: &mut Persistence,
    role: Role,
    query: &SupplementQuery,
) -> Result<SupplementInfo, ApiError> {
    authorize(role, Capability::ViewSupplements)?;

    let (carrier, pol, pod) = resolve_key(&query.carrier_cd, &query.pol_cd, &query.pod_cd)?;
    let supplement: Option<CarrierSupplement> = persistence
        .get_supplement(&carrier, &pol, &pod, &query.vessel, &query.voyage)
        .map_err(translate_persistence_error)?;

    supplement.map(supplement_to_info).ok_or_else(|| {
        ApiError::ResourceNotFound {
            resource_type: String::from("Supplement"),
            message: format!(
                "{carrier} {} {} {} {}",
                query.pol_cd, query.pod_cd, query.vessel, query.voyage
            ),
        }
    })
}

/// Applies an operator edit to a supplement's commercial fields.
///
/// The row must already exist — supplements come into being through the
/// reconciler fanout, not through edits.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability, the key or the
/// price is invalid, or no supplement matches.
pub fn update_supplement(
    persistence: &mut Persistence,
    role: Role,
    request: &SupplementUpdateRequest,
) -> Result<SupplementInfo, ApiError> {
    authorize(role, Capability::EditSupplements)?;

    let (carrier, pol, pod) = resolve_key(&request.carrier_cd, &request.pol_cd, &request.pod_cd)?;
    let price: Option<Decimal> = match request.price.as_deref() {
        None => None,
        Some(raw) => Some(Decimal::from_str(raw.trim()).map_err(|_| {
            translate_domain_error(DomainError::InvalidPrice {
                raw: raw.to_string(),
            })
        })?),
    };

    let supplement: CarrierSupplement = persistence
        .get_supplement(&carrier, &pol, &pod, &request.vessel, &request.voyage)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Supplement"),
            message: format!(
                "{carrier} {} {} {} {}",
                request.pol_cd, request.pod_cd, request.vessel, request.voyage
            ),
        })?;
    let Some(supplement_id) = supplement.supplement_id else {
        return Err(ApiError::Internal {
            message: String::from("Stored supplement has no ID"),
        });
    };

    persistence
        .update_supplement_operator_fields(
            supplement_id,
            request.gp_20.as_deref(),
            request.hq_40.as_deref(),
            request.cut_off_time.as_deref(),
            price,
        )
        .map_err(translate_persistence_error)?;

    info!(carrier = %carrier, vessel = %request.vessel, voyage = %request.voyage,
        "Updated supplement operator fields");

    let updated: Option<CarrierSupplement> = persistence
        .get_supplement(&carrier, &pol, &pod, &request.vessel, &request.voyage)
        .map_err(translate_persistence_error)?;
    updated.map(supplement_to_info).ok_or(ApiError::Internal {
        message: String::from("Supplement vanished during update"),
    })
}

/// Reports sync coverage statistics.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability or a count query
/// fails.
pub fn sync_status(
    persistence: &mut Persistence,
    role: Role,
) -> Result<SyncStatusResponse, ApiError> {
    authorize(role, Capability::ViewSupplements)?;

    let sailing_count: i64 = persistence
        .count_active_sailings()
        .map_err(translate_persistence_error)?;
    let supplement_count: i64 = persistence
        .count_supplements()
        .map_err(translate_persistence_error)?;
    let filled_count: i64 = persistence
        .count_filled_supplements()
        .map_err(translate_persistence_error)?;

    let fill_rate: f64 = if supplement_count > 0 {
        let filled: f64 = filled_count.to_f64().unwrap_or(0.0);
        let total: f64 = supplement_count.to_f64().unwrap_or(1.0);
        (filled / total * 10_000.0).round() / 100.0
    } else {
        0.0
    };

    Ok(SyncStatusResponse {
        sailing_count,
        supplement_count,
        filled_count,
        empty_count: supplement_count - filled_count,
        fill_rate,
    })
}
