// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The supplement sync reconciler.
//!
//! Keeps the carrier-supplement table consistent with the sailing facts.
//! Fanout is an explicit call on the write path rather than an implicit
//! on-save hook, so the side effect stays visible and testable: writers
//! go through [`save_sailing`]/[`delete_sailing`], and a batch entry
//! point re-runs the fanout over an explicit set of sailings.
//!
//! Every operation here is idempotent — re-running a fanout neither
//! duplicates supplements nor touches operator-entered fields — so a
//! half-finished batch can simply be run again.

use crate::capabilities::{Capability, Role, authorize};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{SyncCounts, SyncReport, SyncRequest};
use sailplan_domain::{CarrierCode, Sailing};
use sailplan_persistence::{Persistence, UpsertOutcome};
use tracing::{error, info, warn};

/// Persists a sailing and fans out its supplements in one step.
///
/// This is the write-path service: every create-or-update of a sailing
/// goes through here so the supplement fanout can never be forgotten.
///
/// # Errors
///
/// Returns an error if the sailing write fails. A fanout failure is
/// logged and reported as empty counts; the sailing write itself stands.
pub fn save_sailing(
    persistence: &mut Persistence,
    sailing: &Sailing,
) -> Result<(UpsertOutcome, SyncCounts), ApiError> {
    let outcome: UpsertOutcome = persistence
        .upsert_sailing(sailing)
        .map_err(translate_persistence_error)?;

    let counts: SyncCounts = match sync_sailing_saved(persistence, sailing) {
        Ok(counts) => counts,
        Err(e) => {
            // The sailing row is already committed; a partial fanout is
            // repaired by the next batch reconciliation run.
            error!(error = %e, vessel = %sailing.vessel, voyage = %sailing.voyage,
                "Supplement fanout failed after sailing write");
            SyncCounts::default()
        }
    };

    Ok((outcome, counts))
}

/// Fans out supplements for a saved sailing.
///
/// Inactive sailings are skipped entirely. For each cooperating carrier
/// the supplement is created empty when absent; an existing supplement
/// only has its identity-adjacent fields rewritten, and only when they
/// actually drifted. Operator-entered fields are never written here.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn sync_sailing_saved(
    persistence: &mut Persistence,
    sailing: &Sailing,
) -> Result<SyncCounts, ApiError> {
    if !sailing.status.is_active() {
        info!(vessel = %sailing.vessel, voyage = %sailing.voyage,
            "Skipping supplement sync for inactive sailing");
        return Ok(SyncCounts::default());
    }

    fanout_sailing(persistence, sailing, false, false)
}

/// Cleans up supplements after a sailing delete.
///
/// Recomputes the carrier set and deletes each matching supplement only
/// when it carries no operator-entered data; populated rows are kept.
/// Returns the number of supplements deleted.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn cleanup_sailing_deleted(
    persistence: &mut Persistence,
    sailing: &Sailing,
) -> Result<usize, ApiError> {
    let carriers: Vec<CarrierCode> = sailing.carrier_set();
    let mut deleted: usize = 0;

    for carrier in &carriers {
        let removed: bool = persistence
            .delete_supplement_if_empty(
                carrier,
                &sailing.pol_cd,
                &sailing.pod_cd,
                &sailing.vessel,
                &sailing.voyage,
            )
            .map_err(translate_persistence_error)?;
        if removed {
            deleted += 1;
            info!(carrier = %carrier, vessel = %sailing.vessel, voyage = %sailing.voyage,
                "Deleted empty supplement");
        }
    }

    Ok(deleted)
}

/// Deletes a sailing and runs the supplement cleanup path.
///
/// Returns the number of supplements removed alongside the deleted
/// sailing's ID.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability, the sailing does
/// not exist, or a storage operation fails.
pub fn delete_sailing(
    persistence: &mut Persistence,
    role: Role,
    sailing_id: i64,
) -> Result<usize, ApiError> {
    authorize(role, Capability::DeleteSailings)?;

    let sailing: Sailing = persistence
        .get_sailing(sailing_id)
        .map_err(translate_persistence_error)?;
    persistence
        .delete_sailing(sailing_id)
        .map_err(translate_persistence_error)?;

    cleanup_sailing_deleted(persistence, &sailing)
}

/// Batch supplement reconciliation.
///
/// Re-runs the save-path fanout over an explicit set of sailing IDs, or
/// all active sailings when none are given. `dry_run` reports what would
/// change without mutating; `force_update` rewrites identity-adjacent
/// fields on existing supplements even when unchanged. A single
/// sailing's failure is logged and counted, never aborts the batch.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability, a requested ID
/// does not name an active sailing, or loading the work list fails.
pub fn reconcile_supplements(
    persistence: &mut Persistence,
    role: Role,
    request: &SyncRequest,
) -> Result<SyncReport, ApiError> {
    authorize(role, Capability::RunReconciliation)?;

    let sailings: Vec<Sailing> = match &request.sailing_ids {
        Some(ids) => {
            let found: Vec<Sailing> = persistence
                .find_active_sailings_by_ids(ids)
                .map_err(translate_persistence_error)?;
            if found.len() != ids.len() {
                let found_ids: Vec<i64> = found.iter().filter_map(|s| s.sailing_id).collect();
                let missing: Vec<i64> = ids
                    .iter()
                    .copied()
                    .filter(|id| !found_ids.contains(id))
                    .collect();
                return Err(ApiError::InvalidInput {
                    field: String::from("sailing_ids"),
                    message: format!("No active sailing with ID(s): {missing:?}"),
                });
            }
            found
        }
        None => {
            let ids: Vec<i64> = persistence
                .list_active_sailing_ids()
                .map_err(translate_persistence_error)?;
            persistence
                .find_active_sailings_by_ids(&ids)
                .map_err(translate_persistence_error)?
        }
    };

    info!(
        total = sailings.len(),
        dry_run = request.dry_run,
        force_update = request.force_update,
        "Starting batch supplement reconciliation"
    );

    let mut report: SyncReport = SyncReport::default();
    for sailing in &sailings {
        report.processed += 1;

        if sailing.carrier_set().is_empty() {
            report.skipped += 1;
            continue;
        }

        match fanout_sailing(persistence, sailing, request.dry_run, request.force_update) {
            Ok(counts) => {
                report.created += counts.created;
                report.updated += counts.updated;
            }
            Err(e) => {
                error!(error = %e, sailing_id = ?sailing.sailing_id,
                    "Reconciliation failed for sailing; continuing batch");
                report.errors += 1;
            }
        }
    }

    info!(
        processed = report.processed,
        created = report.created,
        updated = report.updated,
        skipped = report.skipped,
        errors = report.errors,
        "Batch supplement reconciliation finished"
    );

    Ok(report)
}

/// The per-sailing carrier fanout shared by the save path and the batch
/// entry point.
fn fanout_sailing(
    persistence: &mut Persistence,
    sailing: &Sailing,
    dry_run: bool,
    force_update: bool,
) -> Result<SyncCounts, ApiError> {
    let carriers: Vec<CarrierCode> = sailing.carrier_set();
    if carriers.is_empty() {
        warn!(vessel = %sailing.vessel, voyage = %sailing.voyage,
            "Sailing has no resolvable carrier; nothing to fan out");
        return Ok(SyncCounts::default());
    }

    let mut counts: SyncCounts = SyncCounts::default();
    for carrier in &carriers {
        let existing = persistence
            .get_supplement(
                carrier,
                &sailing.pol_cd,
                &sailing.pod_cd,
                &sailing.vessel,
                &sailing.voyage,
            )
            .map_err(translate_persistence_error)?;

        match existing {
            None => {
                if !dry_run {
                    persistence
                        .insert_empty_supplement(
                            carrier,
                            &sailing.pol_cd,
                            &sailing.pod_cd,
                            &sailing.vessel,
                            &sailing.voyage,
                        )
                        .map_err(translate_persistence_error)?;
                }
                counts.created += 1;
            }
            Some(supplement) => {
                let drifted: bool = supplement.pol_cd != sailing.pol_cd
                    || supplement.pod_cd != sailing.pod_cd
                    || supplement.vessel != sailing.vessel
                    || supplement.voyage != sailing.voyage;
                if drifted || force_update {
                    if !dry_run {
                        let Some(supplement_id) = supplement.supplement_id else {
                            continue;
                        };
                        persistence
                            .update_supplement_identity(
                                supplement_id,
                                &sailing.pol_cd,
                                &sailing.pod_cd,
                                &sailing.vessel,
                                &sailing.voyage,
                            )
                            .map_err(translate_persistence_error)?;
                    }
                    counts.updated += 1;
                }
            }
        }
    }

    Ok(counts)
}
