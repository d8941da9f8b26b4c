// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of raw rate tables against a pricing format.
//!
//! Validation never stops at the first problem. Every part is checked,
//! every row is checked, and every field within a row is checked, so a
//! carrier can fix an entire upload in one pass.

use crate::registry::TemplatePart;
use crate::rows::{
    ColumnMap, ParsedTable, data_rows, parse_skid_rate, parse_table, parse_terminal_mapping,
    parse_terminal_rate, parse_zone_rate,
};
use crate::types::{
    MAX_SKID_COUNT, PricingFormat, RateTables, SkidRate, TERMINAL_CODE_LEN, TemplatePartKind,
    TerminalMapping, TerminalRate, ZoneRate,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// One problem found in an uploaded rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The template part the problem was found in.
    pub part: TemplatePartKind,
    /// 1-based display row (header is row 1), or `None` for part-level problems.
    pub row: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) const fn for_part(part: TemplatePartKind, message: String) -> Self {
        Self {
            part,
            row: None,
            message,
        }
    }

    pub(crate) const fn for_row(part: TemplatePartKind, row: usize, message: String) -> Self {
        Self {
            part,
            row: Some(row),
            message,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "{} row {row}: {}", self.part, self.message),
            None => write!(f, "{}: {}", self.part, self.message),
        }
    }
}

/// The result of validating one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub format: PricingFormat,
    /// Issues grouped by part in registry order, sorted by row within a part.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether the upload can be normalized.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every issue rendered as a human-readable sentence.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Records parsed during validation, kept for the normalizer.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckedTables {
    pub terminal_mapping: Option<Vec<TerminalMapping>>,
    pub terminal_rates: Option<Vec<TerminalRate>>,
    pub skid_rates: Option<Vec<SkidRate>>,
    pub zone_matrix: Option<Vec<ZoneRate>>,
}

/// Finds a part's table by exact key, then by case-insensitive key.
pub(crate) fn find_table<'t>(tables: &'t RateTables, key: &str) -> Option<&'t Vec<Vec<String>>> {
    tables.get(key).or_else(|| {
        tables
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
            .map(|(_, rows)| rows)
    })
}

/// Validates raw tables for the given format.
///
/// Pure and deterministic: the same tables always produce the same report.
#[must_use]
pub fn validate_rate_tables(format: PricingFormat, tables: &RateTables) -> ValidationReport {
    let (_, issues) = check_tables(format, tables);
    ValidationReport { format, issues }
}

/// Validates every part of `format` and returns the parsed records with
/// the full issue list.
pub(crate) fn check_tables(
    format: PricingFormat,
    tables: &RateTables,
) -> (CheckedTables, Vec<ValidationIssue>) {
    let mut checked: CheckedTables = CheckedTables::default();
    let mut issues: Vec<ValidationIssue> = Vec::new();
    // Terminal codes from the mapping table; None skips the orphan check
    let mut known_codes: Option<HashSet<String>> = None;

    for part in format.descriptor().parts {
        let Some(rows) = find_table(tables, part.kind.as_str()) else {
            if part.required {
                issues.push(ValidationIssue::for_part(
                    part.kind,
                    String::from("required file is missing"),
                ));
            }
            continue;
        };

        let mut part_issues: Vec<ValidationIssue> = match part.kind {
            TemplatePartKind::TerminalMapping => {
                let (records, codes, part_issues) = check_terminal_mapping(part, rows);
                checked.terminal_mapping = Some(records);
                known_codes = codes;
                part_issues
            }
            TemplatePartKind::TerminalRates => {
                let (records, part_issues) =
                    check_terminal_rates(part, rows, known_codes.as_ref());
                checked.terminal_rates = Some(records);
                part_issues
            }
            TemplatePartKind::SkidRates => {
                let (records, part_issues) = check_skid_rates(part, rows);
                checked.skid_rates = Some(records);
                part_issues
            }
            TemplatePartKind::ZoneMatrix => {
                let (records, part_issues) = check_zone_matrix(part, rows);
                checked.zone_matrix = Some(records);
                part_issues
            }
        };

        // Stable: part-level issues first, then by row in discovery order
        part_issues.sort_by_key(|issue| issue.row);
        issues.extend(part_issues);
    }

    (checked, issues)
}

fn check_terminal_mapping(
    part: &TemplatePart,
    rows: &[Vec<String>],
) -> (
    Vec<TerminalMapping>,
    Option<HashSet<String>>,
    Vec<ValidationIssue>,
) {
    let mut parsed: ParsedTable<TerminalMapping> = parse_table(part, rows, parse_terminal_mapping);

    if let Some(columns) = parsed.columns.as_ref() {
        let mut seen: HashMap<(String, String), usize> = HashMap::new();
        for (row_number, row) in data_rows(rows) {
            let Some(key) = mapping_key(columns, row) else {
                continue;
            };
            if let Some(first) = seen.get(&key) {
                parsed.issues.push(ValidationIssue::for_row(
                    part.kind,
                    row_number,
                    format!(
                        "duplicate mapping for {}, {} (first defined on row {first})",
                        key.0, key.1
                    ),
                ));
            } else {
                seen.insert(key, row_number);
            }
        }
    }

    let codes: Option<HashSet<String>> = parsed.columns.as_ref().map(|columns| {
        data_rows(rows)
            .map(|(_, row)| columns.cell(row, "Terminal_Code"))
            .filter(|code| code.chars().count() == TERMINAL_CODE_LEN)
            .map(str::to_uppercase)
            .collect()
    });

    (parsed.rows, codes, parsed.issues)
}

fn check_terminal_rates(
    part: &TemplatePart,
    rows: &[Vec<String>],
    known_codes: Option<&HashSet<String>>,
) -> (Vec<TerminalRate>, Vec<ValidationIssue>) {
    let mut parsed: ParsedTable<TerminalRate> = parse_table(part, rows, parse_terminal_rate);

    if let Some(columns) = parsed.columns.as_ref() {
        let mut ranges: HashMap<(String, String), Vec<(f64, f64, usize)>> = HashMap::new();
        for (row_number, row) in data_rows(rows) {
            let Some((lane, new_min, new_max)) = weight_break_key(columns, row) else {
                continue;
            };
            let existing: &mut Vec<(f64, f64, usize)> = ranges.entry(lane.clone()).or_default();

            if let Some((min, max, other_row)) = existing
                .iter()
                .find(|(min, max, _)| !(new_max <= *min || new_min >= *max))
            {
                parsed.issues.push(ValidationIssue::for_row(
                    part.kind,
                    row_number,
                    format!(
                        "weight range [{new_min}, {new_max}) for {} -> {} overlaps [{min}, {max}) on row {other_row}",
                        lane.0, lane.1
                    ),
                ));
            }
            existing.push((new_min, new_max, row_number));
        }
    }

    if let (Some(codes), Some(columns)) = (known_codes, parsed.columns.as_ref()) {
        for (row_number, row) in data_rows(rows) {
            let orphans: BTreeSet<String> = ["Origin_Terminal", "Destination_Terminal"]
                .iter()
                .map(|column| columns.cell(row, column))
                .filter(|code| code.chars().count() == TERMINAL_CODE_LEN)
                .map(str::to_uppercase)
                .filter(|code| !codes.contains(code))
                .collect();
            if !orphans.is_empty() {
                let listed: Vec<String> = orphans.into_iter().collect();
                parsed.issues.push(ValidationIssue::for_row(
                    part.kind,
                    row_number,
                    format!(
                        "terminal code(s) {} are not defined in terminal_mapping",
                        listed.join(", ")
                    ),
                ));
            }
        }
    }

    (parsed.rows, parsed.issues)
}

fn check_skid_rates(
    part: &TemplatePart,
    rows: &[Vec<String>],
) -> (Vec<SkidRate>, Vec<ValidationIssue>) {
    let mut parsed: ParsedTable<SkidRate> = parse_table(part, rows, parse_skid_rate);

    if let Some(columns) = parsed.columns.as_ref() {
        let mut seen: HashMap<u32, usize> = HashMap::new();
        for (row_number, row) in data_rows(rows) {
            let Some(skid_count) = skid_key(columns, row) else {
                continue;
            };
            if let Some(first) = seen.get(&skid_count) {
                parsed.issues.push(ValidationIssue::for_row(
                    part.kind,
                    row_number,
                    format!(
                        "duplicate rate for {skid_count} skid(s) (first defined on row {first})"
                    ),
                ));
            } else {
                seen.insert(skid_count, row_number);
            }
        }
    }

    (parsed.rows, parsed.issues)
}

fn check_zone_matrix(
    part: &TemplatePart,
    rows: &[Vec<String>],
) -> (Vec<ZoneRate>, Vec<ValidationIssue>) {
    let mut parsed: ParsedTable<ZoneRate> = parse_table(part, rows, parse_zone_rate);

    if let Some(columns) = parsed.columns.as_ref() {
        let mut seen: HashMap<(String, String, Option<u64>), usize> = HashMap::new();
        for (row_number, row) in data_rows(rows) {
            let Some((origin_zone, destination_zone, max_weight)) = zone_key(columns, row) else {
                continue;
            };
            let key: (String, String, Option<u64>) =
                (origin_zone, destination_zone, max_weight.map(f64::to_bits));
            if let Some(first) = seen.get(&key) {
                let ceiling: String = max_weight.map_or_else(
                    || String::from("no maximum weight"),
                    |w| format!("max weight {w}"),
                );
                parsed.issues.push(ValidationIssue::for_row(
                    part.kind,
                    row_number,
                    format!(
                        "duplicate zone rate {} -> {} with {ceiling} (first defined on row {first})",
                        key.0, key.1
                    ),
                ));
            } else {
                seen.insert(key, row_number);
            }
        }
    }

    (parsed.rows, parsed.issues)
}

// Uniqueness keys are read from raw cells so a row with an unrelated field
// error still claims its key. A key is `None` only when the cells that form
// it are themselves unusable.

fn mapping_key(columns: &ColumnMap, row: &[String]) -> Option<(String, String)> {
    let city: &str = columns.cell(row, "City");
    let province: &str = columns.cell(row, "Province");
    (!city.is_empty() && !province.is_empty())
        .then(|| (city.to_uppercase(), province.to_uppercase()))
}

fn terminal_code_key(columns: &ColumnMap, row: &[String], column: &str) -> Option<String> {
    let code: &str = columns.cell(row, column);
    (code.chars().count() == TERMINAL_CODE_LEN).then(|| code.to_uppercase())
}

fn finite_cell(columns: &ColumnMap, row: &[String], column: &str) -> Option<f64> {
    columns
        .cell(row, column)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn weight_break_key(columns: &ColumnMap, row: &[String]) -> Option<((String, String), f64, f64)> {
    let origin: String = terminal_code_key(columns, row, "Origin_Terminal")?;
    let destination: String = terminal_code_key(columns, row, "Destination_Terminal")?;
    let min: f64 = finite_cell(columns, row, "Weight_Min")?;
    let max: f64 = finite_cell(columns, row, "Weight_Max")?;
    (max > min).then_some(((origin, destination), min, max))
}

fn skid_key(columns: &ColumnMap, row: &[String]) -> Option<u32> {
    columns
        .cell(row, "Skid_Count")
        .parse::<u32>()
        .ok()
        .filter(|count| (1..=MAX_SKID_COUNT).contains(count))
}

fn zone_key(columns: &ColumnMap, row: &[String]) -> Option<(String, String, Option<f64>)> {
    let origin: &str = columns.cell(row, "Origin_Zone");
    let destination: &str = columns.cell(row, "Destination_Zone");
    if origin.is_empty() || destination.is_empty() {
        return None;
    }
    let max_weight: Option<f64> = if columns.cell(row, "Max_Weight").is_empty() {
        None
    } else {
        Some(finite_cell(columns, row, "Max_Weight").filter(|w| *w > 0.0)?)
    };
    Some((origin.to_uppercase(), destination.to_uppercase(), max_weight))
}
