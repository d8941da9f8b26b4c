// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV ingestion for uploaded rate files.
//!
//! Files are read into raw row tables only. Header matching, field parsing
//! and every data-quality rule belong to the validator, so a file that is
//! well-formed CSV is never rejected here.

use csv::StringRecord;
use ratebook_domain::RateTables;
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Reads one uploaded CSV file into rows of raw cells.
///
/// The first row is kept as the header row. Rows may have differing
/// lengths and blank lines are skipped. A leading byte order mark is
/// removed.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the text is not readable CSV.
pub fn parse_csv_table(part: &str, csv_text: &str) -> Result<Vec<Vec<String>>, ApiError> {
    let text: &str = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);

    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvFormat {
            part: part.to_string(),
            reason: format!("line {}: {e}", idx + 1),
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(ToString::to_string).collect());
    }

    Ok(rows)
}

/// Reads every uploaded file, keyed by template part.
///
/// # Errors
///
/// Returns the first `ApiError::InvalidCsvFormat` encountered.
pub fn parse_csv_tables(files: &BTreeMap<String, String>) -> Result<RateTables, ApiError> {
    files
        .iter()
        .map(|(part, text)| {
            let key: String = part.trim().to_lowercase();
            parse_csv_table(&key, text).map(|rows| (key, rows))
        })
        .collect()
}
