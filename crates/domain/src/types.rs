// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Parsed CSV tables keyed by template part name (e.g. `terminal_rates`).
///
/// Row 0 of every table is the header row; data rows start at index 1.
pub type RateTables = BTreeMap<String, Vec<Vec<String>>>;

/// Transit days applied when a rate row leaves the column blank.
pub const DEFAULT_TRANSIT_DAYS: u32 = 2;

/// Highest skid count a skid rate table may price.
pub const MAX_SKID_COUNT: u32 = 26;

/// Required length of a terminal code.
pub const TERMINAL_CODE_LEN: usize = 3;

/// The pricing scheme a carrier's rate tables follow.
///
/// The format decides which template parts an import must supply and
/// which resolution path a quote takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingFormat {
    /// City → terminal mapping plus terminal-to-terminal weight breaks.
    TerminalWeightBased,
    /// One price per skid (pallet) count.
    SkidBased,
    /// Zone-to-zone base rates.
    ZoneMatrix,
    /// Terminal weight breaks with a zone matrix fallback.
    HybridTerminalZone,
}

impl PricingFormat {
    /// Every supported format, in registry order.
    pub const ALL: [Self; 4] = [
        Self::TerminalWeightBased,
        Self::SkidBased,
        Self::ZoneMatrix,
        Self::HybridTerminalZone,
    ];

    /// Returns the registry key for this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TerminalWeightBased => "terminal_weight_based",
            Self::SkidBased => "skid_based",
            Self::ZoneMatrix => "zone_matrix",
            Self::HybridTerminalZone => "hybrid_terminal_zone",
        }
    }

    /// Whether this format prices by skid count rather than lane and weight.
    #[must_use]
    pub const fn uses_skids(&self) -> bool {
        matches!(self, Self::SkidBased)
    }
}

impl FromStr for PricingFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal_weight_based" => Ok(Self::TerminalWeightBased),
            "skid_based" => Ok(Self::SkidBased),
            "zone_matrix" => Ok(Self::ZoneMatrix),
            "hybrid_terminal_zone" => Ok(Self::HybridTerminalZone),
            _ => Err(DomainError::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for PricingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One CSV file within a pricing format's import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePartKind {
    /// City/province to terminal code mapping.
    TerminalMapping,
    /// Terminal-to-terminal weight break rates.
    TerminalRates,
    /// Per-skid-count rates.
    SkidRates,
    /// Zone-to-zone rates.
    ZoneMatrix,
}

impl TemplatePartKind {
    /// Returns the key this part is stored under in [`RateTables`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TerminalMapping => "terminal_mapping",
            Self::TerminalRates => "terminal_rates",
            Self::SkidRates => "skid_rates",
            Self::ZoneMatrix => "zone_matrix",
        }
    }

    /// Looks up a part by key, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "terminal_mapping" => Some(Self::TerminalMapping),
            "terminal_rates" => Some(Self::TerminalRates),
            "skid_rates" => Some(Self::SkidRates),
            "zone_matrix" => Some(Self::ZoneMatrix),
            _ => None,
        }
    }
}

impl std::fmt::Display for TemplatePartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The formula applied within a weight break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateType {
    /// Rate is charged per hundred pounds of shipment weight.
    #[serde(rename = "PER_100LBS")]
    Per100Lbs,
    /// Rate is charged per pound.
    #[serde(rename = "PER_LB")]
    PerLb,
    /// Rate is a flat amount regardless of weight within the break.
    #[serde(rename = "FLAT_RATE")]
    FlatRate,
}

impl RateType {
    /// Returns the canonical upper-case spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Per100Lbs => "PER_100LBS",
            Self::PerLb => "PER_LB",
            Self::FlatRate => "FLAT_RATE",
        }
    }

    /// Applies the rate formula and the minimum charge floor.
    #[must_use]
    pub fn charge(&self, rate_value: f64, min_charge: f64, weight: f64) -> f64 {
        let raw: f64 = match self {
            Self::Per100Lbs => rate_value * weight / 100.0,
            Self::PerLb => rate_value * weight,
            Self::FlatRate => rate_value,
        };
        raw.max(min_charge)
    }
}

impl FromStr for RateType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PER_100LBS" => Ok(Self::Per100Lbs),
            "PER_LB" => Ok(Self::PerLb),
            "FLAT_RATE" => Ok(Self::FlatRate),
            _ => Err(DomainError::UnknownRateType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a carrier's shipments are rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RatingMethod {
    /// Rates come from the carrier's normalized rate configuration.
    Normalized,
    /// No normalized configuration; rates are entered by hand.
    #[default]
    Manual,
}

impl RatingMethod {
    /// Returns the stored spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for RatingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normalized" => Ok(Self::Normalized),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::UnknownRatingMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for RatingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A city served by a carrier terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalMapping {
    /// Upper-cased city name.
    pub city: String,
    /// Upper-cased province or state code.
    pub province: String,
    /// Three character terminal code, upper-cased.
    pub terminal_code: String,
    /// Terminal display name, case preserved.
    pub terminal_name: String,
    /// Upper-cased service area label (may be empty).
    pub service_area: String,
}

/// A weight break between two terminals.
///
/// The break covers the half-open range `[weight_min, weight_max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalRate {
    pub origin_terminal: String,
    pub destination_terminal: String,
    pub weight_min: f64,
    pub weight_max: f64,
    pub rate_type: RateType,
    pub rate_value: f64,
    pub min_charge: f64,
    /// Fuel surcharge as a percentage of the base charge.
    pub fuel_surcharge: f64,
    pub transit_days: u32,
}

impl TerminalRate {
    /// Whether `weight` falls inside this break.
    #[must_use]
    pub fn covers(&self, weight: f64) -> bool {
        self.weight_min <= weight && weight < self.weight_max
    }
}

/// A price for shipping a given number of skids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkidRate {
    pub skid_count: u32,
    pub rate: f64,
    pub fuel_surcharge: f64,
    pub transit_days: u32,
    /// Per-skid weight ceiling, if the carrier publishes one.
    pub max_weight_per_skid: Option<f64>,
    pub notes: Option<String>,
}

/// A zone-to-zone base rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRate {
    pub origin_zone: String,
    pub destination_zone: String,
    pub base_rate: f64,
    pub fuel_surcharge_pct: f64,
    pub transit_days: u32,
    /// Heaviest shipment this row prices; `None` means no ceiling.
    pub max_weight: Option<f64>,
}

impl ZoneRate {
    /// Whether this row can carry `weight`.
    #[must_use]
    pub fn carries(&self, weight: f64) -> bool {
        self.max_weight.is_none_or(|max| weight <= max)
    }
}

/// Who is importing which carrier's rates, and under what name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMetadata {
    pub carrier_id: String,
    pub config_name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub created_by: String,
}

impl ImportMetadata {
    /// Creates import metadata.
    #[must_use]
    pub const fn new(
        carrier_id: String,
        config_name: String,
        currency: String,
        created_by: String,
    ) -> Self {
        Self {
            carrier_id,
            config_name,
            currency,
            created_by,
        }
    }
}

/// Summary statistics computed when a configuration is normalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Distinct terminal codes in the mapping table.
    pub terminal_count: usize,
    /// Cities mapped to a terminal.
    pub mapped_city_count: usize,
    /// Distinct origin → destination terminal pairs with at least one break.
    pub lane_count: usize,
    /// Total weight breaks across all lanes.
    pub rate_break_count: usize,
    /// Lowest and highest priced skid counts.
    pub skid_count_range: Option<(u32, u32)>,
    /// Distinct origin → destination zone pairs.
    pub zone_pair_count: usize,
    /// Highest weight any terminal break or zone row can carry.
    pub max_configured_weight: Option<f64>,
}

/// The persisted, queryable form of a carrier's rate tables.
///
/// A configuration is produced whole by a single import and replaced whole
/// by the next one. It is never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCarrierConfig {
    pub carrier_id: String,
    pub format: PricingFormat,
    pub config_name: String,
    pub currency: String,
    pub created_by: String,
    /// Sum of all normalized record counts.
    pub total_records: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_mapping: Option<Vec<TerminalMapping>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_rates: Option<Vec<TerminalRate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skid_rates: Option<Vec<SkidRate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_matrix: Option<Vec<ZoneRate>>,
    pub summary: ConfigSummary,
}
