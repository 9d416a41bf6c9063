// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier-supplement mutations.
//!
//! The reconciler only ever touches identity-adjacent columns here; the
//! operator-entered columns have their own dedicated update path and are
//! never written by sync.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::carrier_supplements;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an empty supplement for the given key.
///
/// All operator columns start NULL; operators fill them in manually.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. duplicate key).
pub fn insert_empty_supplement(
    conn: &mut _,
    carrier_cd: &str,
    pol_cd: &str,
    pod_cd: &str,
    vessel: &str,
    voyage: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(carrier_supplements::table)
        .values((
            carrier_supplements::carrier_cd.eq(carrier_cd),
            carrier_supplements::pol_cd.eq(pol_cd),
            carrier_supplements::pod_cd.eq(pod_cd),
            carrier_supplements::vessel.eq(vessel),
            carrier_supplements::voyage.eq(voyage),
        ))
        .execute(conn)?;

    conn.last_insert_id()
}
}

backend_fn! {
/// Rewrites the identity-adjacent columns of an existing supplement.
///
/// Used when a sailing row is edited in place and its route or voyage
/// fields drift from the supplement that was fanned out for it.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_supplement_identity(
    conn: &mut _,
    supplement_id: i64,
    pol_cd: &str,
    pod_cd: &str,
    vessel: &str,
    voyage: &str,
) -> Result<(), PersistenceError> {
    diesel::update(
        carrier_supplements::table
            .filter(carrier_supplements::supplement_id.eq(supplement_id)),
    )
    .set((
        carrier_supplements::pol_cd.eq(pol_cd),
        carrier_supplements::pod_cd.eq(pod_cd),
        carrier_supplements::vessel.eq(vessel),
        carrier_supplements::voyage.eq(voyage),
    ))
    .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Rewrites the four operator-entered columns of an existing supplement.
///
/// This is the operator edit path; `None` clears the stored value.
///
/// # Errors
///
/// Returns an error if the row does not exist or the update fails.
pub fn update_supplement_operator_fields(
    conn: &mut _,
    supplement_id: i64,
    gp_20: Option<&str>,
    hq_40: Option<&str>,
    cut_off_time: Option<&str>,
    price: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        carrier_supplements::table
            .filter(carrier_supplements::supplement_id.eq(supplement_id)),
    )
    .set((
        carrier_supplements::gp_20.eq(gp_20),
        carrier_supplements::hq_40.eq(hq_40),
        carrier_supplements::cut_off_time.eq(cut_off_time),
        carrier_supplements::price.eq(price),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Supplement {supplement_id} does not exist"
        )));
    }
    Ok(())
}
}

backend_fn! {
/// Deletes a supplement row by its surrogate ID.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_supplement(
    conn: &mut _,
    supplement_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(
        carrier_supplements::table
            .filter(carrier_supplements::supplement_id.eq(supplement_id)),
    )
    .execute(conn)?;
    Ok(())
}
}
