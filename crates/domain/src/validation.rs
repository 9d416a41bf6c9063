// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::PortCode;

/// Maximum accepted port code length.
const MAX_PORT_CODE_LEN: usize = 10;

/// Validates a raw port code for a named request field.
///
/// # Errors
///
/// Returns an error if the code is empty, too long, or contains
/// non-alphanumeric characters.
pub fn validate_port_code(field: &str, raw: &str) -> Result<PortCode, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyPortCode {
            field: field.to_string(),
        });
    }
    if trimmed.len() > MAX_PORT_CODE_LEN {
        return Err(DomainError::InvalidPortCode {
            code: trimmed.to_string(),
            reason: format!("longer than {MAX_PORT_CODE_LEN} characters"),
        });
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidPortCode {
            code: trimmed.to_string(),
            reason: "contains non-alphanumeric characters".to_string(),
        });
    }
    Ok(PortCode::new(trimmed))
}

/// Validates an origin/destination pair from a query request.
///
/// # Errors
///
/// Returns an error if either code fails [`validate_port_code`].
pub fn validate_route_pair(pol_cd: &str, pod_cd: &str) -> Result<(PortCode, PortCode), DomainError> {
    let pol = validate_port_code("polCd", pol_cd)?;
    let pod = validate_port_code("podCd", pod_cd)?;
    Ok((pol, pod))
}
