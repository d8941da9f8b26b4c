// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::PricingFormat;
use thiserror::Error;

/// Errors raised by the rate domain for integration problems.
///
/// Data-quality problems in uploaded tables are not errors; they are
/// reported through [`crate::ValidationReport`]. The one exception is
/// [`DomainError::InvalidRateTables`], raised when a caller asks for
/// normalization of tables that do not validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The pricing format key is not registered.
    #[error(
        "Unknown pricing format '{0}': expected one of terminal_weight_based, skid_based, zone_matrix, hybrid_terminal_zone"
    )]
    UnknownFormat(String),
    /// The template part is not registered for the format.
    #[error("Template part '{part}' is not defined for pricing format {format}")]
    UnknownTemplatePart {
        /// The format that was asked about.
        format: PricingFormat,
        /// The part key that was not found.
        part: String,
    },
    /// The rate type is not one of the supported formulas.
    #[error("Unknown rate type '{0}': expected PER_100LBS, PER_LB, or FLAT_RATE")]
    UnknownRateType(String),
    /// The rating method is not recognized.
    #[error("Unknown rating method '{0}'")]
    UnknownRatingMethod(String),
    /// Normalization was requested for tables that fail validation.
    #[error("Rate tables failed validation with {} error(s)", errors.len())]
    InvalidRateTables {
        /// Every validation error, in report order.
        errors: Vec<String>,
    },
    /// Carrier identifier is empty or malformed.
    #[error("Invalid carrier id: {0}")]
    InvalidCarrierId(String),
    /// Configuration name is empty.
    #[error("Invalid configuration name: {0}")]
    InvalidConfigName(String),
    /// Currency is not a three letter code.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    /// A template could not be rendered as CSV.
    #[error("Failed to render template CSV: {0}")]
    TemplateRender(String),
}

/// Expected lookup misses when resolving a rate for a shipment.
///
/// A missing rate is a normal business outcome; callers typically try
/// another carrier or fall back to manual rating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// No terminal serves the city/province pair.
    #[error("No terminal serves {city}, {province}")]
    TerminalNotFound {
        /// The normalized city.
        city: String,
        /// The normalized province.
        province: String,
    },
    /// No weight break on the lane covers the shipment weight.
    #[error("No rate from {origin} to {destination} covers a weight of {weight} lbs")]
    NoRateForWeight {
        /// Origin terminal code.
        origin: String,
        /// Destination terminal code.
        destination: String,
        /// The shipment weight.
        weight: f64,
    },
    /// The skid table has no row for the requested count.
    #[error("No skid rate is configured for {0} skid(s)")]
    NoRateForSkidCount(u32),
    /// No zone row covers the zone pair and weight.
    #[error("No zone rate from {origin_zone} to {destination_zone} covers a weight of {weight} lbs")]
    NoZoneRate {
        /// Origin zone.
        origin_zone: String,
        /// Destination zone.
        destination_zone: String,
        /// The shipment weight.
        weight: f64,
    },
    /// The shipment is heavier than the skids may carry.
    #[error(
        "{total_weight} lbs exceeds the {max_weight} lbs allowed for {skid_count} skid(s)"
    )]
    SkidWeightExceeded {
        /// Requested skid count.
        skid_count: u32,
        /// Declared total weight.
        total_weight: f64,
        /// Maximum weight for that many skids.
        max_weight: f64,
    },
    /// The shipment weight is not a positive finite number.
    #[error("Shipment weight must be a positive number, got {0}")]
    InvalidWeight(f64),
    /// The configuration's format cannot answer this kind of query.
    #[error("Pricing format {format} does not support {operation}")]
    UnsupportedFormat {
        /// The configuration's format.
        format: PricingFormat,
        /// The attempted resolution.
        operation: &'static str,
    },
}
