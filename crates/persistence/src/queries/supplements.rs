// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier-supplement queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use sailplan_domain::CarrierSupplement;

use crate::data_models::SupplementRow;
use crate::diesel_schema::carrier_supplements;
use crate::error::PersistenceError;

backend_fn! {
/// Looks up the supplement for one carrier/route/voyage key.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_supplement(
    conn: &mut _,
    carrier_cd: &str,
    pol_cd: &str,
    pod_cd: &str,
    vessel: &str,
    voyage: &str,
) -> Result<Option<CarrierSupplement>, PersistenceError> {
    let row = carrier_supplements::table
        .filter(carrier_supplements::carrier_cd.eq(carrier_cd))
        .filter(carrier_supplements::pol_cd.eq(pol_cd))
        .filter(carrier_supplements::pod_cd.eq(pod_cd))
        .filter(carrier_supplements::vessel.eq(vessel))
        .filter(carrier_supplements::voyage.eq(voyage))
        .select(SupplementRow::as_select())
        .first::<SupplementRow>(conn)
        .optional()?;

    row.map(SupplementRow::into_domain).transpose()
}
}

backend_fn! {
/// Counts all supplements.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_supplements(
    conn: &mut _,
) -> Result<i64, PersistenceError> {
    let count = carrier_supplements::table
        .count()
        .get_result::<i64>(conn)?;
    Ok(count)
}
}

backend_fn! {
/// Counts supplements carrying at least one operator-entered value.
///
/// Mirrors the sync-status statistic: a row is "filled" when any of the
/// four operator columns is non-null, blank strings included.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_filled_supplements(
    conn: &mut _,
) -> Result<i64, PersistenceError> {
    let count = carrier_supplements::table
        .filter(
            carrier_supplements::gp_20
                .is_not_null()
                .or(carrier_supplements::hq_40.is_not_null())
                .or(carrier_supplements::cut_off_time.is_not_null())
                .or(carrier_supplements::price.is_not_null()),
        )
        .count()
        .get_result::<i64>(conn)?;
    Ok(count)
}
}
