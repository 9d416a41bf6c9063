// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed capability checks at the service boundary.
//!
//! Authentication itself (tokens, sessions) belongs to the transport
//! layer and is out of scope here; handlers receive an already-resolved
//! [`Role`] and check it against the capability each operation requires.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// The role an authenticated caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full access, including destructive maintenance operations.
    Admin,
    /// Day-to-day operations: schedule queries and supplement editing.
    Operator,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Returns the role's display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Operator => "Operator",
            Self::Viewer => "Viewer",
        }
    }
}

/// A discrete operation the API can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Query the cabin-grouping endpoint.
    QuerySchedules,
    /// Read carrier supplements and sync statistics.
    ViewSupplements,
    /// Edit operator-entered supplement fields.
    EditSupplements,
    /// Bulk-import supplement data from CSV.
    ImportSupplements,
    /// Run batch supplement reconciliation.
    RunReconciliation,
    /// Delete sailing rows.
    DeleteSailings,
}

impl Capability {
    /// Returns the action name used in error messages.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::QuerySchedules => "query schedules",
            Self::ViewSupplements => "view supplements",
            Self::EditSupplements => "edit supplements",
            Self::ImportSupplements => "import supplements",
            Self::RunReconciliation => "run reconciliation",
            Self::DeleteSailings => "delete sailings",
        }
    }

    /// Returns the weakest role that grants this capability.
    #[must_use]
    pub const fn required_role(self) -> Role {
        match self {
            Self::QuerySchedules | Self::ViewSupplements => Role::Viewer,
            Self::EditSupplements | Self::ImportSupplements => Role::Operator,
            Self::RunReconciliation | Self::DeleteSailings => Role::Admin,
        }
    }
}

impl Role {
    /// Returns whether this role grants the given capability.
    #[must_use]
    pub const fn allows(self, capability: Capability) -> bool {
        match capability.required_role() {
            Role::Viewer => true,
            Role::Operator => matches!(self, Self::Admin | Self::Operator),
            Role::Admin => matches!(self, Self::Admin),
        }
    }
}

/// Enforces that a role grants a capability.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the role does not grant it.
pub fn authorize(role: Role, capability: Capability) -> Result<(), ApiError> {
    if role.allows(capability) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: capability.action().to_string(),
            required_role: capability.required_role().as_str().to_string(),
        })
    }
}
