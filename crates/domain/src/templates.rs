// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Downloadable CSV templates with sample rows and fill-in instructions.

use crate::error::DomainError;
use crate::registry::TemplatePart;
use crate::types::{DEFAULT_TRANSIT_DAYS, MAX_SKID_COUNT, PricingFormat, TemplatePartKind};
use serde::Serialize;

/// A CSV template for one part of a pricing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateExample {
    pub format: PricingFormat,
    pub part: TemplatePartKind,
    /// Suggested download name, e.g. `terminal_weight_based_terminal_rates.csv`.
    pub file_name: String,
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
    /// Header plus sample rows rendered as CSV.
    pub csv_text: String,
    /// Column-by-column guidance.
    pub instructions: Vec<String>,
    /// General notes about the part.
    pub notes: Vec<String>,
}

/// Builds the template for one part of a format.
///
/// # Errors
///
/// Returns `DomainError::UnknownTemplatePart` if the format does not use
/// the part, or `DomainError::TemplateRender` if the samples cannot be
/// written as CSV.
pub fn generate_template(
    format: PricingFormat,
    part_key: &str,
) -> Result<TemplateExample, DomainError> {
    let part: &TemplatePart = format.descriptor().part_by_key(part_key)?;

    let headers: Vec<String> = part.headers.iter().map(|h| (*h).to_string()).collect();
    let sample_rows: Vec<Vec<String>> = sample_rows(part.kind)
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect();
    let csv_text: String = render_csv(&headers, &sample_rows)?;

    Ok(TemplateExample {
        format,
        part: part.kind,
        file_name: format!("{}_{}.csv", format.as_str(), part.kind.as_str()),
        headers,
        sample_rows,
        csv_text,
        instructions: instructions(part.kind),
        notes: notes(format, part.kind),
    })
}

/// Renders a header row and data rows as CSV text.
///
/// Every row must have as many cells as the header.
pub(crate) fn render_csv(
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<String, DomainError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    for record in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        writer
            .write_record(record)
            .map_err(|e| DomainError::TemplateRender(e.to_string()))?;
    }
    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| DomainError::TemplateRender(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::TemplateRender(e.to_string()))
}

fn sample_rows(kind: TemplatePartKind) -> &'static [&'static [&'static str]] {
    match kind {
        TemplatePartKind::TerminalMapping => &[
            &["Kitchener", "ON", "KIT", "Kitchener Terminal", "Waterloo Region"],
            &["Waterloo", "ON", "KIT", "Kitchener Terminal", "Waterloo Region"],
            &["Toronto", "ON", "TOR", "Toronto Terminal", "GTA"],
            &["Montreal", "QC", "MTL", "Montreal Terminal", ""],
        ],
        TemplatePartKind::TerminalRates => &[
            &["KIT", "TOR", "0", "500", "PER_100LBS", "78.11", "125", "18.5", "1"],
            &["KIT", "TOR", "500", "1000", "PER_100LBS", "42.05", "275", "18.5", "1"],
            &["KIT", "MTL", "0", "1000", "FLAT_RATE", "410", "410", "18.5", ""],
            &["TOR", "MTL", "0", "20000", "PER_LB", "0.31", "150", "18.5", "3"],
        ],
        TemplatePartKind::SkidRates => &[
            &["1", "185", "20", "2", "1500", ""],
            &["2", "330", "20", "2", "1500", ""],
            &["3", "465", "20", "3", "1500", "Tailgate delivery extra"],
            &["4", "590", "20", "", "", ""],
        ],
        TemplatePartKind::ZoneMatrix => &[
            &["ON", "ON", "95", "18", "1", "1000"],
            &["ON", "ON", "210", "18", "1", ""],
            &["ON", "QC", "260", "18", "2", ""],
            &["QC", "ON", "255", "18", "", ""],
        ],
    }
}

fn instructions(kind: TemplatePartKind) -> Vec<String> {
    match kind {
        TemplatePartKind::TerminalMapping => vec![
            String::from("City: city served by the terminal"),
            String::from("Province: province or state code, e.g. ON"),
            String::from("Terminal_Code: exactly 3 characters, e.g. KIT"),
            String::from("Terminal_Name: display name of the terminal"),
            String::from("Service_Area: optional region label"),
        ],
        TemplatePartKind::TerminalRates => vec![
            String::from("Origin_Terminal / Destination_Terminal: codes from terminal_mapping"),
            String::from("Weight_Min: lowest weight in the break (inclusive), 0 or more"),
            String::from("Weight_Max: highest weight in the break (exclusive), above Weight_Min"),
            String::from("Rate_Type: PER_100LBS, PER_LB, or FLAT_RATE"),
            String::from("Rate_Value: price applied by the rate type, above 0"),
            String::from("Min_Charge: lowest base charge for the break, 0 or more"),
            String::from("Fuel_Surcharge: percentage of the base charge, 0 or more"),
            format!("Transit_Days: whole days, defaults to {DEFAULT_TRANSIT_DAYS} when blank"),
        ],
        TemplatePartKind::SkidRates => vec![
            format!("Skid_Count: whole number from 1 to {MAX_SKID_COUNT}, one row per count"),
            String::from("Rate: price for that many skids, above 0"),
            String::from("Fuel_Surcharge: percentage of the rate, 0 or more"),
            format!("Transit_Days: whole days, defaults to {DEFAULT_TRANSIT_DAYS} when blank"),
            String::from("Max_Weight_Per_Skid: optional weight ceiling per skid"),
            String::from("Notes: optional free text"),
        ],
        TemplatePartKind::ZoneMatrix => vec![
            String::from("Origin_Zone / Destination_Zone: province or state codes, e.g. ON"),
            String::from("Base_Rate: price for the zone pair, above 0"),
            String::from("Fuel_Surcharge: percentage of the base rate, 0 or more"),
            format!("Transit_Days: whole days, defaults to {DEFAULT_TRANSIT_DAYS} when blank"),
            String::from("Max_Weight: optional weight ceiling for the row; blank means no limit"),
        ],
    }
}

fn notes(format: PricingFormat, kind: TemplatePartKind) -> Vec<String> {
    let mut notes: Vec<String> = vec![String::from(
        "Keep the header row; columns may appear in any order and extra columns are ignored.",
    )];
    match kind {
        TemplatePartKind::TerminalMapping => {
            notes.push(String::from(
                "Each city and province pair may appear only once.",
            ));
        }
        TemplatePartKind::TerminalRates => {
            notes.push(String::from(
                "Weight breaks on the same lane must not overlap; [0, 500) and [500, 1000) are contiguous.",
            ));
            notes.push(String::from(
                "Every terminal code must also appear in terminal_mapping.",
            ));
        }
        TemplatePartKind::SkidRates => {
            notes.push(String::from("Each skid count may appear only once."));
        }
        TemplatePartKind::ZoneMatrix => {
            notes.push(String::from(
                "Several rows may share a zone pair when their Max_Weight differs; the tightest matching row is used.",
            ));
        }
    }
    if format == PricingFormat::HybridTerminalZone && kind == TemplatePartKind::ZoneMatrix {
        notes.push(String::from(
            "Zone rates are used when either city has no terminal or no weight break fits.",
        ));
    }
    notes
}
