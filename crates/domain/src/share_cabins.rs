// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared-cabin cooperation blob parsing.
//!
//! The blob is persisted as text: a JSON array whose elements are either a
//! plain carrier-code string or an object carrying at least a `carrierCd`
//! field. Anything else is tolerated and skipped per element. A blob that
//! fails to parse as a whole is treated as absent.

use crate::types::CarrierCode;
use serde::Deserialize;

/// One element of the shared-cabin cooperation blob.
///
/// Variants are tried in declaration order: object entries resolve to
/// `Detailed`, bare strings to `Code`, and any other shape (including
/// objects without a `carrierCd` field) to `Unparsable`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ShareCabinEntry {
    /// An object entry naming a cooperating carrier.
    Detailed {
        /// The cooperating carrier's code.
        #[serde(rename = "carrierCd")]
        carrier_cd: String,
    },
    /// A bare carrier-code string.
    Code(String),
    /// An entry of unknown shape, skipped during extraction.
    Unparsable(serde_json::Value),
}

impl ShareCabinEntry {
    /// Returns the carrier code carried by this entry, if any.
    #[must_use]
    pub fn carrier_code(&self) -> Option<CarrierCode> {
        match self {
            Self::Detailed { carrier_cd } | Self::Code(carrier_cd) => {
                let code = CarrierCode::new(carrier_cd);
                if code.is_empty() { None } else { Some(code) }
            }
            Self::Unparsable(_) => None,
        }
    }
}

/// Parses a raw cooperation blob into its entries.
///
/// Returns `None` when the blob is not a JSON array at all; malformed
/// elements inside a well-formed array surface as `Unparsable` entries
/// rather than failing the whole parse.
#[must_use]
pub fn parse_share_cabins(blob: &str) -> Option<Vec<ShareCabinEntry>> {
    serde_json::from_str::<Vec<ShareCabinEntry>>(blob).ok()
}

/// Extracts the cooperating-carrier codes for one sailing.
///
/// Folds the blob's entries to carrier codes, skipping unparseable
/// elements. An absent, empty, or wholly unparseable blob — or one that
/// yields no codes — falls back to the sailing's own carrier code when
/// present. The result is de-duplicated and sorted ascending.
#[must_use]
pub fn extract_carrier_codes(
    blob: Option<&str>,
    fallback: Option<&CarrierCode>,
) -> Vec<CarrierCode> {
    let mut codes: Vec<CarrierCode> = blob
        .filter(|raw| !raw.trim().is_empty())
        .and_then(parse_share_cabins)
        .map(|entries| {
            entries
                .iter()
                .filter_map(ShareCabinEntry::carrier_code)
                .collect()
        })
        .unwrap_or_default();

    if codes.is_empty() {
        if let Some(own) = fallback {
            if !own.is_empty() {
                codes.push(own.clone());
            }
        }
    }

    codes.sort();
    codes.dedup();
    codes
}
