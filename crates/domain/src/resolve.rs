// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate resolution against a normalized carrier configuration.

use crate::error::ResolutionError;
use crate::types::{
    NormalizedCarrierConfig, PricingFormat, RateType, SkidRate, TerminalMapping, TerminalRate,
    ZoneRate,
};
use serde::{Deserialize, Serialize};

/// Origin and destination of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentLane {
    pub origin_city: String,
    pub origin_province: String,
    pub destination_city: String,
    pub destination_province: String,
}

impl ShipmentLane {
    #[must_use]
    pub const fn new(
        origin_city: String,
        origin_province: String,
        destination_city: String,
        destination_province: String,
    ) -> Self {
        Self {
            origin_city,
            origin_province,
            destination_city,
            destination_province,
        }
    }
}

/// Which table row priced a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    Terminal {
        origin: String,
        destination: String,
    },
    Zone {
        origin_zone: String,
        destination_zone: String,
    },
    Skid {
        skid_count: u32,
    },
}

/// A priced shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Base charge after the minimum charge floor.
    pub charge: f64,
    pub fuel_amount: f64,
    pub total_charge: f64,
    pub transit_days: u32,
    pub rate_type: RateType,
    pub source: RateSource,
    /// Why the terminal path was abandoned, when a hybrid quote fell back
    /// to the zone matrix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn quote(
    charge: f64,
    fuel_pct: f64,
    transit_days: u32,
    rate_type: RateType,
    source: RateSource,
) -> RateQuote {
    // Fuel is taken on the rounded charge so the parts sum to the total
    let charge: f64 = round_cents(charge);
    let fuel_amount: f64 = round_cents(charge * fuel_pct / 100.0);
    RateQuote {
        charge,
        fuel_amount,
        total_charge: round_cents(charge + fuel_amount),
        transit_days,
        rate_type,
        source,
        fallback_reason: None,
    }
}

fn check_weight(weight: f64) -> Result<f64, ResolutionError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(ResolutionError::InvalidWeight(weight))
    }
}

/// Prices a shipment on a lane.
///
/// # Errors
///
/// Returns a `ResolutionError` when the weight is not positive, when the
/// configuration has no row that prices the lane and weight, or when the
/// configuration is skid based.
pub fn resolve_rate(
    config: &NormalizedCarrierConfig,
    lane: &ShipmentLane,
    weight: f64,
) -> Result<RateQuote, ResolutionError> {
    let weight: f64 = check_weight(weight)?;

    match config.format {
        PricingFormat::TerminalWeightBased => resolve_terminal(config, lane, weight),
        PricingFormat::ZoneMatrix => resolve_zone(config, lane, weight),
        PricingFormat::HybridTerminalZone => match resolve_terminal(config, lane, weight) {
            Ok(quote) => Ok(quote),
            Err(
                reason @ (ResolutionError::TerminalNotFound { .. }
                | ResolutionError::NoRateForWeight { .. }),
            ) => {
                let mut quote: RateQuote = resolve_zone(config, lane, weight)?;
                quote.fallback_reason = Some(reason.to_string());
                Ok(quote)
            }
            Err(other) => Err(other),
        },
        PricingFormat::SkidBased => Err(ResolutionError::UnsupportedFormat {
            format: config.format,
            operation: "weight based lane rating",
        }),
    }
}

/// Prices a shipment by skid count.
///
/// # Errors
///
/// Returns a `ResolutionError` when no row prices the count, when the
/// declared weight exceeds the per-skid ceiling, or when the configuration
/// is not skid based.
pub fn resolve_skid_rate(
    config: &NormalizedCarrierConfig,
    skid_count: u32,
    total_weight: Option<f64>,
) -> Result<RateQuote, ResolutionError> {
    if !config.format.uses_skids() {
        return Err(ResolutionError::UnsupportedFormat {
            format: config.format,
            operation: "skid rating",
        });
    }
    let skids: &[SkidRate] = config.skid_rates.as_deref().unwrap_or_default();

    let skid: &SkidRate = skids
        .iter()
        .find(|s| s.skid_count == skid_count)
        .ok_or(ResolutionError::NoRateForSkidCount(skid_count))?;

    if let Some(total_weight) = total_weight {
        let total_weight: f64 = check_weight(total_weight)?;
        if let Some(per_skid) = skid.max_weight_per_skid {
            let max_weight: f64 = per_skid * f64::from(skid_count);
            if total_weight > max_weight {
                return Err(ResolutionError::SkidWeightExceeded {
                    skid_count,
                    total_weight,
                    max_weight,
                });
            }
        }
    }

    Ok(quote(
        skid.rate,
        skid.fuel_surcharge,
        skid.transit_days,
        RateType::FlatRate,
        RateSource::Skid { skid_count },
    ))
}

fn find_terminal<'c>(
    mappings: &'c [TerminalMapping],
    city: &str,
    province: &str,
) -> Result<&'c TerminalMapping, ResolutionError> {
    let city: String = city.trim().to_uppercase();
    let province: String = province.trim().to_uppercase();
    mappings
        .iter()
        .find(|m| m.city == city && m.province == province)
        .ok_or(ResolutionError::TerminalNotFound { city, province })
}

fn resolve_terminal(
    config: &NormalizedCarrierConfig,
    lane: &ShipmentLane,
    weight: f64,
) -> Result<RateQuote, ResolutionError> {
    let mappings: &[TerminalMapping] = config.terminal_mapping.as_deref().unwrap_or_default();
    let rates: &[TerminalRate] = config.terminal_rates.as_deref().unwrap_or_default();

    let origin: &TerminalMapping = find_terminal(mappings, &lane.origin_city, &lane.origin_province)?;
    let destination: &TerminalMapping = find_terminal(
        mappings,
        &lane.destination_city,
        &lane.destination_province,
    )?;

    let rate: &TerminalRate = rates
        .iter()
        .find(|r| {
            r.origin_terminal == origin.terminal_code
                && r.destination_terminal == destination.terminal_code
                && r.covers(weight)
        })
        .ok_or_else(|| ResolutionError::NoRateForWeight {
            origin: origin.terminal_code.clone(),
            destination: destination.terminal_code.clone(),
            weight,
        })?;

    Ok(quote(
        rate.rate_type.charge(rate.rate_value, rate.min_charge, weight),
        rate.fuel_surcharge,
        rate.transit_days,
        rate.rate_type,
        RateSource::Terminal {
            origin: rate.origin_terminal.clone(),
            destination: rate.destination_terminal.clone(),
        },
    ))
}

fn resolve_zone(
    config: &NormalizedCarrierConfig,
    lane: &ShipmentLane,
    weight: f64,
) -> Result<RateQuote, ResolutionError> {
    let zones: &[ZoneRate] = config.zone_matrix.as_deref().unwrap_or_default();
    let origin_zone: String = lane.origin_province.trim().to_uppercase();
    let destination_zone: String = lane.destination_province.trim().to_uppercase();

    // Tightest ceiling wins; rows without a ceiling are considered last
    let zone: &ZoneRate = zones
        .iter()
        .filter(|z| {
            z.origin_zone == origin_zone
                && z.destination_zone == destination_zone
                && z.carries(weight)
        })
        .min_by(|a, b| match (a.max_weight, b.max_weight) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
        .ok_or_else(|| ResolutionError::NoZoneRate {
            origin_zone: origin_zone.clone(),
            destination_zone: destination_zone.clone(),
            weight,
        })?;

    Ok(quote(
        zone.base_rate,
        zone.fuel_surcharge_pct,
        zone.transit_days,
        RateType::FlatRate,
        RateSource::Zone {
            origin_zone: zone.origin_zone.clone(),
            destination_zone: zone.destination_zone.clone(),
        },
    ))
}
