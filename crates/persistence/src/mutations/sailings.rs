// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sailing mutations.
//!
//! Upserts are expressed as an explicit lookup followed by an insert or
//! update so one function body works on both backends; Diesel's
//! `ON CONFLICT` DSL is `SQLite`/Postgres-only.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use sailplan_domain::Sailing;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewSailingRow, SailingChangeset};
use crate::diesel_schema::vessel_sailings;
use crate::error::PersistenceError;
use crate::mutations::UpsertOutcome;

backend_fn! {
/// Inserts a sailing, or updates the existing row sharing its identity
/// tuple `(pol_cd, pod_cd, vessel, voyage, data_version)`.
///
/// On update every non-identity column is rewritten from the given
/// sailing, so a re-import fully supersedes the stored row.
///
/// # Errors
///
/// Returns an error if the lookup, insert, or update fails.
pub fn upsert_sailing(
    conn: &mut _,
    sailing: &Sailing,
) -> Result<UpsertOutcome, PersistenceError> {
    let existing: Option<i64> = vessel_sailings::table
        .filter(vessel_sailings::pol_cd.eq(sailing.pol_cd.value()))
        .filter(vessel_sailings::pod_cd.eq(sailing.pod_cd.value()))
        .filter(vessel_sailings::vessel.eq(&sailing.vessel))
        .filter(vessel_sailings::voyage.eq(&sailing.voyage))
        .filter(vessel_sailings::data_version.eq(sailing.data_version))
        .select(vessel_sailings::sailing_id)
        .first::<i64>(conn)
        .optional()?;

    if let Some(sailing_id) = existing {
        diesel::update(
            vessel_sailings::table.filter(vessel_sailings::sailing_id.eq(sailing_id)),
        )
        .set(SailingChangeset::from_domain(sailing))
        .execute(conn)?;
        return Ok(UpsertOutcome::Updated(sailing_id));
    }

    diesel::insert_into(vessel_sailings::table)
        .values(NewSailingRow::from_domain(sailing))
        .execute(conn)?;
    let sailing_id: i64 = conn.last_insert_id()?;
    Ok(UpsertOutcome::Created(sailing_id))
}
}

backend_fn! {
/// Deletes a sailing row by its surrogate ID.
///
/// # Errors
///
/// Returns an error if the row does not exist or the delete fails.
pub fn delete_sailing(
    conn: &mut _,
    sailing_id: i64,
) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(
        vessel_sailings::table.filter(vessel_sailings::sailing_id.eq(sailing_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Sailing {sailing_id} does not exist"
        )));
    }
    Ok(())
}
}
