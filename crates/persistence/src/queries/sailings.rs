// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sailing queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use sailplan_domain::Sailing;

use crate::data_models::SailingRow;
use crate::diesel_schema::vessel_sailings;
use crate::error::PersistenceError;
use crate::queries::STATUS_ACTIVE;

backend_fn! {
/// Returns the highest data version among a route's active sailings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn max_data_version(
    conn: &mut _,
    pol_cd: &str,
    pod_cd: &str,
) -> Result<Option<i32>, PersistenceError> {
    let version = vessel_sailings::table
        .filter(vessel_sailings::pol_cd.eq(pol_cd))
        .filter(vessel_sailings::pod_cd.eq(pod_cd))
        .filter(vessel_sailings::status.eq(STATUS_ACTIVE))
        .select(diesel::dsl::max(vessel_sailings::data_version))
        .first::<Option<i32>>(conn)?;
    Ok(version)
}
}

backend_fn! {
/// Returns the highest data version across the whole table.
///
/// Ingestion allocates the next version from this; a fresh database
/// yields `None`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn global_max_data_version(
    conn: &mut _,
) -> Result<Option<i32>, PersistenceError> {
    let version = vessel_sailings::table
        .select(diesel::dsl::max(vessel_sailings::data_version))
        .first::<Option<i32>>(conn)?;
    Ok(version)
}
}

backend_fn! {
/// Loads a route's active sailings at one data version, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn find_active_sailings(
    conn: &mut _,
    pol_cd: &str,
    pod_cd: &str,
    data_version: i32,
) -> Result<Vec<Sailing>, PersistenceError> {
    let rows = vessel_sailings::table
        .filter(vessel_sailings::pol_cd.eq(pol_cd))
        .filter(vessel_sailings::pod_cd.eq(pod_cd))
        .filter(vessel_sailings::status.eq(STATUS_ACTIVE))
        .filter(vessel_sailings::data_version.eq(data_version))
        .order(vessel_sailings::sailing_id.asc())
        .select(SailingRow::as_select())
        .load::<SailingRow>(conn)?;

    rows.into_iter().map(SailingRow::into_domain).collect()
}
}

backend_fn! {
/// Loads a single sailing by its surrogate ID.
///
/// # Errors
///
/// Returns an error if the sailing does not exist or the row is corrupt.
pub fn get_sailing(
    conn: &mut _,
    sailing_id: i64,
) -> Result<Sailing, PersistenceError> {
    let row = vessel_sailings::table
        .filter(vessel_sailings::sailing_id.eq(sailing_id))
        .select(SailingRow::as_select())
        .first::<SailingRow>(conn)?;
    row.into_domain()
}
}

backend_fn! {
/// Lists the IDs of all active sailings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_sailing_ids(
    conn: &mut _,
) -> Result<Vec<i64>, PersistenceError> {
    let ids = vessel_sailings::table
        .filter(vessel_sailings::status.eq(STATUS_ACTIVE))
        .order(vessel_sailings::sailing_id.asc())
        .select(vessel_sailings::sailing_id)
        .load::<i64>(conn)?;
    Ok(ids)
}
}

backend_fn! {
/// Loads the active sailings with the given IDs.
///
/// IDs without an active row are silently absent from the result; the
/// caller decides whether that is an error.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn find_active_sailings_by_ids(
    conn: &mut _,
    sailing_ids: &[i64],
) -> Result<Vec<Sailing>, PersistenceError> {
    let rows = vessel_sailings::table
        .filter(vessel_sailings::sailing_id.eq_any(sailing_ids))
        .filter(vessel_sailings::status.eq(STATUS_ACTIVE))
        .order(vessel_sailings::sailing_id.asc())
        .select(SailingRow::as_select())
        .load::<SailingRow>(conn)?;

    rows.into_iter().map(SailingRow::into_domain).collect()
}
}

backend_fn! {
/// Counts all active sailings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_sailings(
    conn: &mut _,
) -> Result<i64, PersistenceError> {
    let count = vessel_sailings::table
        .filter(vessel_sailings::status.eq(STATUS_ACTIVE))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count)
}
}
