// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A port code is empty or whitespace.
    EmptyPortCode {
        /// The field the code was supplied for (e.g. "polCd").
        field: String,
    },
    /// A port code has an invalid shape.
    InvalidPortCode {
        /// The rejected code.
        code: String,
        /// Why the code was rejected.
        reason: String,
    },
    /// A carrier code is empty or whitespace.
    EmptyCarrierCode,
    /// A price string could not be parsed as a decimal.
    InvalidPrice {
        /// The rejected raw value.
        raw: String,
    },
    /// A sailing status integer is neither 0 nor 1.
    InvalidStatus(i32),
    /// A data version is not positive.
    InvalidDataVersion(i32),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPortCode { field } => {
                write!(f, "Port code for '{field}' must not be empty")
            }
            Self::InvalidPortCode { code, reason } => {
                write!(f, "Invalid port code '{code}': {reason}")
            }
            Self::EmptyCarrierCode => write!(f, "Carrier code must not be empty"),
            Self::InvalidPrice { raw } => {
                write!(f, "Invalid price '{raw}': not a decimal value")
            }
            Self::InvalidStatus(value) => {
                write!(f, "Invalid sailing status {value}: must be 0 or 1")
            }
            Self::InvalidDataVersion(value) => {
                write!(f, "Invalid data version {value}: must be positive")
            }
        }
    }
}

impl std::error::Error for DomainError {}
