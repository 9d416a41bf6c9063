// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the sailplan schedule backend.
//!
//! This crate stores the two record sets the engine works over — sailing
//! facts and operator-entered carrier supplements — on Diesel, with two
//! supported backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — development, unit tests, integration tests.
//!   Always available, needs no external infrastructure.
//! - **`MariaDB`/`MySQL`** — compiled by default, validated only via the
//!   explicit opt-in `cargo xtask test-mariadb` command, which provisions
//!   a container, runs migrations, executes the `#[ignore]`-marked backend
//!   validation tests, and cleans up.
//!
//! ## Migration Strategy
//!
//! `SQL` syntax differences require separate migration directories:
//!
//! - `migrations/` — `SQLite`-specific (default)
//! - `migrations_mysql/` — `MySQL`/`MariaDB`-specific
//!
//! Both produce identical schema semantics in backend-appropriate syntax.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically; `xtask` orchestrates
//!   all infrastructure and tests fail fast when it is missing

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, CarrierSupplement, PortCode, Sailing};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a sequential ID, giving tests
/// deterministic isolation without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// Generates two functions from a single body:
/// - one suffixed `_sqlite` taking `&mut SqliteConnection`
/// - one suffixed `_mysql` taking `&mut MysqlConnection`
///
/// Diesel's type system requires concrete backend types at compile time,
/// so generic backend functions are not an option. The macro only
/// duplicates bodies and substitutes connection types; backend dispatch
/// happens exclusively in the `Persistence` adapter.
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::UpsertOutcome;

use data_models::price_to_text;

/// Internal enum for backend-specific database connections.
///
/// Allows the adapter to work with either `SQLite` or `MySQL` while
/// keeping a single public API; backend selection happens once at
/// construction time.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for sailing facts and carrier supplements.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-memory database, keeping tests
    /// isolated from one another.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a persistence adapter with a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    // ========================================================================
    // Sailings
    // ========================================================================

    /// Inserts a sailing or updates the row sharing its identity tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_sailing(&mut self, sailing: &Sailing) -> Result<UpsertOutcome, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::sailings::upsert_sailing_sqlite(conn, sailing),
            BackendConnection::Mysql(conn) => mutations::sailings::upsert_sailing_mysql(conn, sailing),
        }
    }

    /// Loads a sailing by its surrogate ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the sailing does not exist.
    pub fn get_sailing(&mut self, sailing_id: i64) -> Result<Sailing, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::sailings::get_sailing_sqlite(conn, sailing_id),
            BackendConnection::Mysql(conn) => queries::sailings::get_sailing_mysql(conn, sailing_id),
        }
    }

    /// Deletes a sailing by its surrogate ID.
    ///
    /// Supplement cleanup is the caller's responsibility; the API layer
    /// runs the reconciler's delete path around this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the sailing does not exist or the delete fails.
    pub fn delete_sailing(&mut self, sailing_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::sailings::delete_sailing_sqlite(conn, sailing_id),
            BackendConnection::Mysql(conn) => mutations::sailings::delete_sailing_mysql(conn, sailing_id),
        }
    }

    /// Returns the highest data version among a route's active sailings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn max_data_version(
        &mut self,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
    ) -> Result<Option<i32>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::sailings::max_data_version_sqlite(conn, pol_cd.value(), pod_cd.value())
            }
            BackendConnection::Mysql(conn) => {
                queries::sailings::max_data_version_mysql(conn, pol_cd.value(), pod_cd.value())
            }
        }
    }

    /// Allocates the next import data version (global maximum plus one).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn next_data_version(&mut self) -> Result<i32, PersistenceError> {
        let current: Option<i32> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::sailings::global_max_data_version_sqlite(conn)?
            }
            BackendConnection::Mysql(conn) => {
                queries::sailings::global_max_data_version_mysql(conn)?
            }
        };
        Ok(current.unwrap_or(0) + 1)
    }

    /// Loads a route's active sailings at one data version.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_sailings(
        &mut self,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
        data_version: i32,
    ) -> Result<Vec<Sailing>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::sailings::find_active_sailings_sqlite(
                conn,
                pol_cd.value(),
                pod_cd.value(),
                data_version,
            ),
            BackendConnection::Mysql(conn) => queries::sailings::find_active_sailings_mysql(
                conn,
                pol_cd.value(),
                pod_cd.value(),
                data_version,
            ),
        }
    }

    /// Lists the IDs of all active sailings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_sailing_ids(&mut self) -> Result<Vec<i64>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::sailings::list_active_sailing_ids_sqlite(conn)
            }
            BackendConnection::Mysql(conn) => queries::sailings::list_active_sailing_ids_mysql(conn),
        }
    }

    /// Loads the active sailings with the given IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_sailings_by_ids(
        &mut self,
        sailing_ids: &[i64],
    ) -> Result<Vec<Sailing>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::sailings::find_active_sailings_by_ids_sqlite(conn, sailing_ids)
            }
            BackendConnection::Mysql(conn) => {
                queries::sailings::find_active_sailings_by_ids_mysql(conn, sailing_ids)
            }
        }
    }

    /// Counts all active sailings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_sailings(&mut self) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::sailings::count_active_sailings_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::sailings::count_active_sailings_mysql(conn),
        }
    }

    // ========================================================================
    // Carrier supplements
    // ========================================================================

    /// Looks up the supplement for one carrier/route/voyage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_supplement(
        &mut self,
        carrier_cd: &CarrierCode,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
        vessel: &str,
        voyage: &str,
    ) -> Result<Option<CarrierSupplement>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::supplements::get_supplement_sqlite(
                conn,
                carrier_cd.value(),
                pol_cd.value(),
                pod_cd.value(),
                vessel,
                voyage,
            ),
            BackendConnection::Mysql(conn) => queries::supplements::get_supplement_mysql(
                conn,
                carrier_cd.value(),
                pol_cd.value(),
                pod_cd.value(),
                vessel,
                voyage,
            ),
        }
    }

    /// Inserts an empty supplement for the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_empty_supplement(
        &mut self,
        carrier_cd: &CarrierCode,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
        vessel: &str,
        voyage: &str,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::supplements::insert_empty_supplement_sqlite(
                conn,
                carrier_cd.value(),
                pol_cd.value(),
                pod_cd.value(),
                vessel,
                voyage,
            ),
            BackendConnection::Mysql(conn) => mutations::supplements::insert_empty_supplement_mysql(
                conn,
                carrier_cd.value(),
                pol_cd.value(),
                pod_cd.value(),
                vessel,
                voyage,
            ),
        }
    }

    /// Rewrites the identity-adjacent columns of an existing supplement.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_supplement_identity(
        &mut self,
        supplement_id: i64,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
        vessel: &str,
        voyage: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::supplements::update_supplement_identity_sqlite(
                    conn,
                    supplement_id,
                    pol_cd.value(),
                    pod_cd.value(),
                    vessel,
                    voyage,
                )
            }
            BackendConnection::Mysql(conn) => {
                mutations::supplements::update_supplement_identity_mysql(
                    conn,
                    supplement_id,
                    pol_cd.value(),
                    pod_cd.value(),
                    vessel,
                    voyage,
                )
            }
        }
    }

    /// Rewrites the four operator-entered columns of a supplement.
    ///
    /// This is the operator edit path; the reconciler never calls it.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplement does not exist or the update fails.
    pub fn update_supplement_operator_fields(
        &mut self,
        supplement_id: i64,
        gp_20: Option<&str>,
        hq_40: Option<&str>,
        cut_off_time: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<(), PersistenceError> {
        let price_text: Option<String> = price_to_text(price);
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::supplements::update_supplement_operator_fields_sqlite(
                    conn,
                    supplement_id,
                    gp_20,
                    hq_40,
                    cut_off_time,
                    price_text.as_deref(),
                )
            }
            BackendConnection::Mysql(conn) => {
                mutations::supplements::update_supplement_operator_fields_mysql(
                    conn,
                    supplement_id,
                    gp_20,
                    hq_40,
                    cut_off_time,
                    price_text.as_deref(),
                )
            }
        }
    }

    /// Deletes the supplement for the given key, but only when it carries
    /// no operator-entered data.
    ///
    /// Returns whether a row was deleted. A populated supplement is left
    /// in place; it may still be referenced by other data versions or
    /// retained for historical reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or delete fails.
    pub fn delete_supplement_if_empty(
        &mut self,
        carrier_cd: &CarrierCode,
        pol_cd: &PortCode,
        pod_cd: &PortCode,
        vessel: &str,
        voyage: &str,
    ) -> Result<bool, PersistenceError> {
        let Some(supplement) = self.get_supplement(carrier_cd, pol_cd, pod_cd, vessel, voyage)?
        else {
            return Ok(false);
        };
        if !supplement.has_no_operator_data() {
            return Ok(false);
        }
        let Some(supplement_id) = supplement.supplement_id else {
            return Ok(false);
        };

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::supplements::delete_supplement_sqlite(conn, supplement_id)?;
            }
            BackendConnection::Mysql(conn) => {
                mutations::supplements::delete_supplement_mysql(conn, supplement_id)?;
            }
        }
        Ok(true)
    }

    /// Counts all supplements.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_supplements(&mut self) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::supplements::count_supplements_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::supplements::count_supplements_mysql(conn),
        }
    }

    /// Counts supplements carrying at least one operator-entered value.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_filled_supplements(&mut self) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::supplements::count_filled_supplements_sqlite(conn)
            }
            BackendConnection::Mysql(conn) => {
                queries::supplements::count_filled_supplements_mysql(conn)
            }
        }
    }
}
