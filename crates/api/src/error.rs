// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sailplan_domain::DomainError;
use sailplan_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract; lower-layer errors are translated, never passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed — the role does not grant the capability.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Validation failures become client errors; everything else is internal.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::EmptyPortCode { field } => ApiError::InvalidInput {
            field: field.clone(),
            message: err.to_string(),
        },
        DomainError::InvalidPortCode { .. } => ApiError::InvalidInput {
            field: String::from("portCode"),
            message: err.to_string(),
        },
        DomainError::EmptyCarrierCode => ApiError::InvalidInput {
            field: String::from("carrierCd"),
            message: err.to_string(),
        },
        DomainError::InvalidPrice { .. } => ApiError::InvalidInput {
            field: String::from("price"),
            message: err.to_string(),
        },
        DomainError::InvalidStatus(_) | DomainError::InvalidDataVersion(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match &err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: message.clone(),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
