// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV bulk import of operator-entered supplement data.
//!
//! Operators maintain prices and container availability in spreadsheets;
//! this module lets them load a whole sheet at once instead of editing
//! row by row. Parsing and validation are separate from application, so
//! a dry run can report per-row outcomes without mutating state.

use csv::StringRecord;
use rust_decimal::Decimal;
use sailplan_domain::{CarrierCode, PortCode, validate_route_pair};
use sailplan_persistence::Persistence;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::info;

use crate::capabilities::{Capability, Role, authorize};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{CsvRowResult, CsvRowStatus, ImportReport};

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["carrier_cd", "pol_cd", "pod_cd", "vessel", "voyage"];

/// Optional operator-data headers.
const OPERATOR_HEADERS: &[&str] = &["gp_20", "hq_40", "cut_off_time", "price"];

/// One validated supplement row ready for application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementCsvRow {
    pub carrier_cd: CarrierCode,
    pub pol_cd: PortCode,
    pub pod_cd: PortCode,
    pub vessel: String,
    pub voyage: String,
    pub gp_20: Option<String>,
    pub hq_40: Option<String>,
    pub cut_off_time: Option<String>,
    pub price: Option<Decimal>,
}

/// Normalizes a CSV header for case-insensitive matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates the header row and maps column names to indices.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("csv"),
            message: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Parses one record into a validated row, or a list of field errors.
fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<SupplementCsvRow, Vec<String>> {
    let field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    };

    let mut errors: Vec<String> = Vec::new();

    let carrier_raw: String = field("carrier_cd").unwrap_or_else(|| {
        errors.push(String::from("carrier_cd: required field is missing or empty"));
        String::new()
    });
    let pol_raw: String = field("pol_cd").unwrap_or_else(|| {
        errors.push(String::from("pol_cd: required field is missing or empty"));
        String::new()
    });
    let pod_raw: String = field("pod_cd").unwrap_or_else(|| {
        errors.push(String::from("pod_cd: required field is missing or empty"));
        String::new()
    });
    let vessel: String = field("vessel").unwrap_or_else(|| {
        errors.push(String::from("vessel: required field is missing or empty"));
        String::new()
    });
    let voyage: String = field("voyage").unwrap_or_else(|| {
        errors.push(String::from("voyage: required field is missing or empty"));
        String::new()
    });

    let price: Option<Decimal> = match field("price") {
        None => None,
        Some(raw) => match Decimal::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(format!("price: '{raw}' is not a decimal value"));
                None
            }
        },
    };

    let route = if errors.is_empty() {
        match validate_route_pair(&pol_raw, &pod_raw) {
            Ok(pair) => Some(pair),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        }
    } else {
        None
    };

    match route {
        Some((pol_cd, pod_cd)) if errors.is_empty() => Ok(SupplementCsvRow {
            carrier_cd: CarrierCode::new(&carrier_raw),
            pol_cd,
            pod_cd,
            vessel,
            voyage,
            gp_20: field("gp_20"),
            hq_40: field("hq_40"),
            cut_off_time: field("cut_off_time"),
            price,
        }),
        _ => Err(errors),
    }
}

/// Parses a whole CSV document into per-row results.
///
/// The expected columns are the five key fields plus the optional
/// operator columns (`gp_20`, `hq_40`, `cut_off_time`, `price`).
///
/// # Errors
///
/// Returns an error if the document cannot be read or the header row is
/// missing required columns. Individual bad rows do not fail the parse.
pub fn parse_supplement_rows(
    csv_text: &str,
) -> Result<Vec<Result<SupplementCsvRow, Vec<String>>>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("csv"),
            message: format!("Cannot read CSV headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<Result<SupplementCsvRow, Vec<String>>> = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(parse_row(&record, &header_map)),
            Err(e) => rows.push(Err(vec![format!("Malformed CSV record: {e}")])),
        }
    }

    Ok(rows)
}

/// Imports supplement rows from a CSV document.
///
/// Each valid row upserts the supplement for its key and overwrites the
/// operator fields with the row's values — a sheet import is the
/// operator edit path in bulk, so unlike the reconciler it may write
/// operator data. With `dry_run` the per-row outcomes are computed but
/// nothing is persisted.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability or the CSV
/// document itself is unreadable. Row-level problems are reported in
/// the result, not as errors.
pub fn import_supplements_csv(
    persistence: &mut Persistence,
    role: Role,
    csv_text: &str,
    dry_run: bool,
) -> Result<ImportReport, ApiError> {
    authorize(role, Capability::ImportSupplements)?;

    let parsed = parse_supplement_rows(csv_text)?;
    let mut report: ImportReport = ImportReport {
        dry_run,
        created: 0,
        updated: 0,
        invalid: 0,
        rows: Vec::with_capacity(parsed.len()),
    };

    for (index, row) in parsed.into_iter().enumerate() {
        let row_number: usize = index + 1;
        match row {
            Err(errors) => {
                report.invalid += 1;
                report.rows.push(CsvRowResult {
                    row: row_number,
                    status: CsvRowStatus::Invalid,
                    message: Some(errors.join("; ")),
                });
            }
            Ok(row) => {
                let status: CsvRowStatus = apply_row(persistence, &row, dry_run)?;
                match status {
                    CsvRowStatus::Created => report.created += 1,
                    CsvRowStatus::Updated => report.updated += 1,
                    CsvRowStatus::Invalid => report.invalid += 1,
                }
                report.rows.push(CsvRowResult {
                    row: row_number,
                    status,
                    message: None,
                });
            }
        }
    }

    info!(
        dry_run,
        created = report.created,
        updated = report.updated,
        invalid = report.invalid,
        "Supplement CSV import finished"
    );

    Ok(report)
}

/// Applies one validated row, creating the supplement when absent.
fn apply_row(
    persistence: &mut Persistence,
    row: &SupplementCsvRow,
    dry_run: bool,
) -> Result<CsvRowStatus, ApiError> {
    let existing = persistence
        .get_supplement(
            &row.carrier_cd,
            &row.pol_cd,
            &row.pod_cd,
            &row.vessel,
            &row.voyage,
        )
        .map_err(translate_persistence_error)?;

    let (supplement_id, status): (Option<i64>, CsvRowStatus) = match existing {
        Some(supplement) => (supplement.supplement_id, CsvRowStatus::Updated),
        None => {
            if dry_run {
                (None, CsvRowStatus::Created)
            } else {
                let id: i64 = persistence
                    .insert_empty_supplement(
                        &row.carrier_cd,
                        &row.pol_cd,
                        &row.pod_cd,
                        &row.vessel,
                        &row.voyage,
                    )
                    .map_err(translate_persistence_error)?;
                (Some(id), CsvRowStatus::Created)
            }
        }
    };

    if !dry_run {
        if let Some(id) = supplement_id {
            persistence
                .update_supplement_operator_fields(
                    id,
                    row.gp_20.as_deref(),
                    row.hq_40.as_deref(),
                    row.cut_off_time.as_deref(),
                    row.price,
                )
                .map_err(translate_persistence_error)?;
        }
    }

    Ok(status)
}
