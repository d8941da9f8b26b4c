// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    ConfigSummary, ImportMetadata, NormalizedCarrierConfig, PricingFormat, RateTables, SkidRate,
    TerminalMapping, TerminalRate, ZoneRate,
};
use crate::validation::{CheckedTables, check_tables};
use std::collections::HashSet;

/// Converts validated raw tables into a carrier rate configuration.
///
/// The tables are validated first. Normalization never produces a
/// configuration from tables that carry validation issues.
///
/// # Errors
///
/// Returns an error if:
/// - The carrier id or config name is blank
/// - The currency is not a three letter code
/// - The tables fail validation (`DomainError::InvalidRateTables`)
pub fn normalize_rate_tables(
    format: PricingFormat,
    tables: &RateTables,
    metadata: &ImportMetadata,
) -> Result<NormalizedCarrierConfig, DomainError> {
    let carrier_id: String = normalize_carrier_id(&metadata.carrier_id)?;
    let config_name: String = normalize_config_name(&metadata.config_name)?;
    let currency: String = normalize_currency(&metadata.currency)?;

    let (checked, issues) = check_tables(format, tables);
    if !issues.is_empty() {
        return Err(DomainError::InvalidRateTables {
            errors: issues.iter().map(ToString::to_string).collect(),
        });
    }

    let CheckedTables {
        terminal_mapping,
        terminal_rates,
        skid_rates,
        zone_matrix,
    } = checked;

    let total_records: usize = terminal_mapping.as_ref().map_or(0, Vec::len)
        + terminal_rates.as_ref().map_or(0, Vec::len)
        + skid_rates.as_ref().map_or(0, Vec::len)
        + zone_matrix.as_ref().map_or(0, Vec::len);

    let summary: ConfigSummary = summarize(
        terminal_mapping.as_deref(),
        terminal_rates.as_deref(),
        skid_rates.as_deref(),
        zone_matrix.as_deref(),
    );

    Ok(NormalizedCarrierConfig {
        carrier_id,
        format,
        config_name,
        currency,
        created_by: metadata.created_by.trim().to_string(),
        total_records,
        terminal_mapping,
        terminal_rates,
        skid_rates,
        zone_matrix,
        summary,
    })
}

/// Carrier ids that collide with the fixed `/rates/...` action routes.
const RESERVED_CARRIER_IDS: &[&str] = &["validate", "import"];

/// Trims a carrier id, rejecting blanks, embedded whitespace or slashes,
/// and reserved words.
///
/// # Errors
///
/// Returns `DomainError::InvalidCarrierId` if the id is blank, contains
/// whitespace or `/`, or is a reserved word.
pub fn normalize_carrier_id(carrier_id: &str) -> Result<String, DomainError> {
    let trimmed: &str = carrier_id.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidCarrierId(String::from(
            "Carrier id cannot be empty",
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidCarrierId(format!(
            "Carrier id '{trimmed}' cannot contain whitespace"
        )));
    }
    if trimmed.contains('/') {
        return Err(DomainError::InvalidCarrierId(format!(
            "Carrier id '{trimmed}' cannot contain '/'"
        )));
    }
    if RESERVED_CARRIER_IDS
        .iter()
        .any(|reserved| trimmed.eq_ignore_ascii_case(reserved))
    {
        return Err(DomainError::InvalidCarrierId(format!(
            "Carrier id '{trimmed}' is reserved"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_config_name(config_name: &str) -> Result<String, DomainError> {
    let trimmed: &str = config_name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidConfigName(String::from(
            "Configuration name cannot be empty",
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_currency(currency: &str) -> Result<String, DomainError> {
    let trimmed: &str = currency.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidCurrency(format!(
            "Currency '{trimmed}' must be a three letter code"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

fn summarize(
    mappings: Option<&[TerminalMapping]>,
    rates: Option<&[TerminalRate]>,
    skids: Option<&[SkidRate]>,
    zones: Option<&[ZoneRate]>,
) -> ConfigSummary {
    let mappings: &[TerminalMapping] = mappings.unwrap_or_default();
    let rates: &[TerminalRate] = rates.unwrap_or_default();
    let skids: &[SkidRate] = skids.unwrap_or_default();
    let zones: &[ZoneRate] = zones.unwrap_or_default();

    let terminal_count: usize = mappings
        .iter()
        .map(|m| m.terminal_code.as_str())
        .collect::<HashSet<_>>()
        .len();

    let lane_count: usize = rates
        .iter()
        .map(|r| (r.origin_terminal.as_str(), r.destination_terminal.as_str()))
        .collect::<HashSet<_>>()
        .len();

    let skid_count_range: Option<(u32, u32)> = skids
        .iter()
        .map(|s| s.skid_count)
        .min()
        .zip(skids.iter().map(|s| s.skid_count).max());

    let zone_pair_count: usize = zones
        .iter()
        .map(|z| (z.origin_zone.as_str(), z.destination_zone.as_str()))
        .collect::<HashSet<_>>()
        .len();

    let max_configured_weight: Option<f64> = rates
        .iter()
        .map(|r| r.weight_max)
        .chain(zones.iter().filter_map(|z| z.max_weight))
        .reduce(f64::max);

    ConfigSummary {
        terminal_count,
        mapped_city_count: mappings.len(),
        lane_count,
        rate_break_count: rates.len(),
        skid_count_range,
        zone_pair_count,
        max_configured_weight,
    }
}
