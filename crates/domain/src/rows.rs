// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Header-mapped access to raw CSV rows.
//!
//! Raw tables arrive as rows of string cells with the header at index 0.
//! This module maps header names to column positions once per table and
//! turns each data row into a named-field record, collecting every field
//! problem in the row instead of stopping at the first.

use crate::registry::TemplatePart;
use crate::types::{
    DEFAULT_TRANSIT_DAYS, MAX_SKID_COUNT, RateType, SkidRate, TERMINAL_CODE_LEN, TerminalMapping,
    TerminalRate, ZoneRate,
};
use crate::validation::ValidationIssue;
use std::collections::HashMap;

/// Normalizes a header cell for case-insensitive, whitespace-tolerant matching.
pub(crate) fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Column positions for one table, keyed by normalized header.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    /// Builds the map from a header row.
    ///
    /// Returns the display names of required columns that are missing.
    pub(crate) fn from_header(
        part: &TemplatePart,
        header: &[String],
    ) -> Result<Self, Vec<&'static str>> {
        let mut indices: HashMap<String, usize> = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            // First occurrence wins when a header is repeated
            indices.entry(normalize_header(cell)).or_insert(idx);
        }

        let missing: Vec<&'static str> = part
            .headers
            .iter()
            .copied()
            .filter(|h| part.is_required_column(h))
            .filter(|h| !indices.contains_key(&normalize_header(h)))
            .collect();

        if missing.is_empty() {
            Ok(Self { indices })
        } else {
            Err(missing)
        }
    }

    /// Returns the trimmed cell for `column`, or `""` if absent.
    pub(crate) fn cell<'r>(&self, row: &'r [String], column: &str) -> &'r str {
        self.indices
            .get(&normalize_header(column))
            .and_then(|&idx| row.get(idx))
            .map_or("", |s| s.trim())
    }
}

/// Data rows of a raw table paired with their 1-based display row number.
///
/// The header is display row 1, so the first data row is row 2. Rows whose
/// cells are all blank are skipped.
pub(crate) fn data_rows(rows: &[Vec<String>]) -> impl Iterator<Item = (usize, &[String])> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|(idx, row)| (idx + 1, row.as_slice()))
}

/// Lower bound a numeric field must satisfy.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Bound {
    NonNegative,
    Positive,
}

impl Bound {
    const fn admits(self, value: f64) -> bool {
        match self {
            Self::NonNegative => value >= 0.0,
            Self::Positive => value > 0.0,
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::NonNegative => "a number greater than or equal to 0",
            Self::Positive => "a number greater than 0",
        }
    }
}

/// Field extraction for a single data row.
///
/// Every accessor records a message on failure and returns `None`, so a
/// parser can pull all fields before deciding whether the row is usable.
pub(crate) struct RowFields<'a> {
    columns: &'a ColumnMap,
    row: &'a [String],
    errors: Vec<String>,
}

impl<'a> RowFields<'a> {
    pub(crate) const fn new(columns: &'a ColumnMap, row: &'a [String]) -> Self {
        Self {
            columns,
            row,
            errors: Vec::new(),
        }
    }

    fn raw(&self, column: &str) -> &'a str {
        self.columns.cell(self.row, column)
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.errors.push(message);
    }

    pub(crate) const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub(crate) fn required_text(&mut self, column: &str) -> Option<String> {
        let raw: &str = self.raw(column);
        if raw.is_empty() {
            self.fail(format!("{column} is required"));
            return None;
        }
        Some(raw.to_string())
    }

    pub(crate) fn optional_text(&self, column: &str) -> Option<String> {
        let raw: &str = self.raw(column);
        (!raw.is_empty()).then(|| raw.to_string())
    }

    pub(crate) fn terminal_code(&mut self, column: &str) -> Option<String> {
        let code: String = self.required_text(column)?;
        if code.chars().count() != TERMINAL_CODE_LEN {
            self.fail(format!(
                "{column} '{code}' must be exactly {TERMINAL_CODE_LEN} characters"
            ));
            return None;
        }
        Some(code.to_uppercase())
    }

    fn parse_finite(&mut self, column: &str, raw: &str, expected: &str) -> Option<f64> {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.fail(format!("{column} must be {expected}, got '{raw}'"));
                None
            }
        }
    }

    pub(crate) fn number(&mut self, column: &str, bound: Bound) -> Option<f64> {
        let raw: &str = self.raw(column);
        if raw.is_empty() {
            self.fail(format!("{column} is required"));
            return None;
        }
        let value: f64 = self.parse_finite(column, raw, bound.describe())?;
        if !bound.admits(value) {
            self.fail(format!("{column} must be {}, got '{raw}'", bound.describe()));
            return None;
        }
        Some(value)
    }

    /// Parses an optional positive number. `Some(None)` means left blank.
    pub(crate) fn optional_positive(&mut self, column: &str) -> Option<Option<f64>> {
        if self.raw(column).is_empty() {
            return Some(None);
        }
        self.number(column, Bound::Positive).map(Some)
    }

    pub(crate) fn transit_days(&mut self, column: &str) -> Option<u32> {
        let raw: &str = self.raw(column);
        if raw.is_empty() {
            return Some(DEFAULT_TRANSIT_DAYS);
        }
        match raw.parse::<u32>() {
            Ok(days) if days >= 1 => Some(days),
            _ => {
                self.fail(format!(
                    "{column} must be a whole number of at least 1, got '{raw}'"
                ));
                None
            }
        }
    }

    pub(crate) fn skid_count(&mut self, column: &str) -> Option<u32> {
        let raw: &str = self.raw(column);
        if raw.is_empty() {
            self.fail(format!("{column} is required"));
            return None;
        }
        match raw.parse::<u32>() {
            Ok(count) if (1..=MAX_SKID_COUNT).contains(&count) => Some(count),
            _ => {
                self.fail(format!(
                    "{column} must be a whole number from 1 to {MAX_SKID_COUNT}, got '{raw}'"
                ));
                None
            }
        }
    }

    pub(crate) fn rate_type(&mut self, column: &str) -> Option<RateType> {
        let raw: &str = self.raw(column);
        if raw.is_empty() {
            self.fail(format!("{column} is required"));
            return None;
        }
        raw.parse::<RateType>().map_or_else(
            |_| {
                self.fail(format!(
                    "{column} '{raw}' must be one of PER_100LBS, PER_LB, FLAT_RATE"
                ));
                None
            },
            Some,
        )
    }
}

/// The outcome of parsing one table.
#[derive(Debug, Clone)]
pub(crate) struct ParsedTable<T> {
    /// Column map, if the header row was usable.
    pub columns: Option<ColumnMap>,
    /// Records for rows without field errors.
    pub rows: Vec<T>,
    pub issues: Vec<ValidationIssue>,
}

/// Parses every data row of a table with `parse_row`.
///
/// Structural problems (no header, missing columns, no data) are reported
/// once for the part. Field problems are reported per row.
pub(crate) fn parse_table<T>(
    part: &TemplatePart,
    rows: &[Vec<String>],
    parse_row: impl Fn(&mut RowFields<'_>) -> Option<T>,
) -> ParsedTable<T> {
    let mut parsed: ParsedTable<T> = ParsedTable {
        columns: None,
        rows: Vec::new(),
        issues: Vec::new(),
    };

    let Some(header) = rows.first() else {
        parsed.issues.push(ValidationIssue::for_part(
            part.kind,
            String::from("the file is empty; expected a header row"),
        ));
        return parsed;
    };

    let columns: ColumnMap = match ColumnMap::from_header(part, header) {
        Ok(columns) => columns,
        Err(missing) => {
            parsed.issues.push(ValidationIssue::for_part(
                part.kind,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
            return parsed;
        }
    };

    let mut data_row_count: usize = 0;
    for (row_number, row) in data_rows(rows) {
        data_row_count += 1;
        let mut fields: RowFields<'_> = RowFields::new(&columns, row);
        match parse_row(&mut fields) {
            Some(record) if !fields.has_errors() => parsed.rows.push(record),
            _ => parsed.issues.extend(
                fields
                    .into_errors()
                    .into_iter()
                    .map(|message| ValidationIssue::for_row(part.kind, row_number, message)),
            ),
        }
    }

    if data_row_count == 0 {
        parsed.issues.push(ValidationIssue::for_part(
            part.kind,
            String::from("contains no data rows"),
        ));
    }

    parsed.columns = Some(columns);
    parsed
}

pub(crate) fn parse_terminal_mapping(fields: &mut RowFields<'_>) -> Option<TerminalMapping> {
    let city: Option<String> = fields.required_text("City");
    let province: Option<String> = fields.required_text("Province");
    let terminal_code: Option<String> = fields.terminal_code("Terminal_Code");
    let terminal_name: Option<String> = fields.required_text("Terminal_Name");
    let service_area: String = fields
        .optional_text("Service_Area")
        .map(|s| s.to_uppercase())
        .unwrap_or_default();

    let (Some(city), Some(province), Some(terminal_code), Some(terminal_name)) =
        (city, province, terminal_code, terminal_name)
    else {
        return None;
    };

    Some(TerminalMapping {
        city: city.to_uppercase(),
        province: province.to_uppercase(),
        terminal_code,
        terminal_name,
        service_area,
    })
}

pub(crate) fn parse_terminal_rate(fields: &mut RowFields<'_>) -> Option<TerminalRate> {
    let origin_terminal: Option<String> = fields.terminal_code("Origin_Terminal");
    let destination_terminal: Option<String> = fields.terminal_code("Destination_Terminal");
    let weight_min: Option<f64> = fields.number("Weight_Min", Bound::NonNegative);
    let weight_max: Option<f64> = fields.number("Weight_Max", Bound::NonNegative);
    let rate_type: Option<RateType> = fields.rate_type("Rate_Type");
    let rate_value: Option<f64> = fields.number("Rate_Value", Bound::Positive);
    let min_charge: Option<f64> = fields.number("Min_Charge", Bound::NonNegative);
    let fuel_surcharge: Option<f64> = fields.number("Fuel_Surcharge", Bound::NonNegative);
    let transit_days: Option<u32> = fields.transit_days("Transit_Days");

    if let (Some(min), Some(max)) = (weight_min, weight_max)
        && max <= min
    {
        fields.fail(format!(
            "Weight_Max ({max}) must be greater than Weight_Min ({min})"
        ));
    }

    if fields.has_errors() {
        return None;
    }

    let (
        Some(origin_terminal),
        Some(destination_terminal),
        Some(weight_min),
        Some(weight_max),
        Some(rate_type),
        Some(rate_value),
        Some(min_charge),
        Some(fuel_surcharge),
        Some(transit_days),
    ) = (
        origin_terminal,
        destination_terminal,
        weight_min,
        weight_max,
        rate_type,
        rate_value,
        min_charge,
        fuel_surcharge,
        transit_days,
    )
    else {
        return None;
    };

    Some(TerminalRate {
        origin_terminal,
        destination_terminal,
        weight_min,
        weight_max,
        rate_type,
        rate_value,
        min_charge,
        fuel_surcharge,
        transit_days,
    })
}

pub(crate) fn parse_skid_rate(fields: &mut RowFields<'_>) -> Option<SkidRate> {
    let skid_count: Option<u32> = fields.skid_count("Skid_Count");
    let rate: Option<f64> = fields.number("Rate", Bound::Positive);
    let fuel_surcharge: Option<f64> = fields.number("Fuel_Surcharge", Bound::NonNegative);
    let transit_days: Option<u32> = fields.transit_days("Transit_Days");
    let max_weight_per_skid: Option<Option<f64>> =
        fields.optional_positive("Max_Weight_Per_Skid");
    let notes: Option<String> = fields.optional_text("Notes");

    let (
        Some(skid_count),
        Some(rate),
        Some(fuel_surcharge),
        Some(transit_days),
        Some(max_weight_per_skid),
    ) = (
        skid_count,
        rate,
        fuel_surcharge,
        transit_days,
        max_weight_per_skid,
    )
    else {
        return None;
    };

    Some(SkidRate {
        skid_count,
        rate,
        fuel_surcharge,
        transit_days,
        max_weight_per_skid,
        notes,
    })
}

pub(crate) fn parse_zone_rate(fields: &mut RowFields<'_>) -> Option<ZoneRate> {
    let origin_zone: Option<String> = fields.required_text("Origin_Zone");
    let destination_zone: Option<String> = fields.required_text("Destination_Zone");
    let base_rate: Option<f64> = fields.number("Base_Rate", Bound::Positive);
    let fuel_surcharge_pct: Option<f64> = fields.number("Fuel_Surcharge", Bound::NonNegative);
    let transit_days: Option<u32> = fields.transit_days("Transit_Days");
    let max_weight: Option<Option<f64>> = fields.optional_positive("Max_Weight");

    let (
        Some(origin_zone),
        Some(destination_zone),
        Some(base_rate),
        Some(fuel_surcharge_pct),
        Some(transit_days),
        Some(max_weight),
    ) = (
        origin_zone,
        destination_zone,
        base_rate,
        fuel_surcharge_pct,
        transit_days,
        max_weight,
    )
    else {
        return None;
    };

    Some(ZoneRate {
        origin_zone: origin_zone.to_uppercase(),
        destination_zone: destination_zone.to_uppercase(),
        base_rate,
        fuel_surcharge_pct,
        transit_days,
        max_weight,
    })
}
