// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side persistence functions.
//!
//! All mutations are generated in backend-specific monomorphic versions
//! (`_sqlite` and `_mysql` suffixes) by the `backend_fn!` macro.

pub mod sailings;
pub mod supplements;

/// Whether an upsert created a new row or touched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was inserted with the given surrogate ID.
    Created(i64),
    /// An existing row with the given surrogate ID was updated.
    Updated(i64),
}

impl UpsertOutcome {
    /// Returns the surrogate ID of the affected row.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }

    /// Returns whether a new row was inserted.
    #[must_use]
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}
