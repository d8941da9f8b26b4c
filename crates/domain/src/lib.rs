// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod normalize;
mod registry;
mod resolve;
mod rows;
mod templates;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ResolutionError};
pub use normalize::{normalize_carrier_id, normalize_rate_tables};
pub use registry::{
    Complexity, FormatDescriptor, TemplatePart, all_format_descriptors, get_format_descriptor,
};
pub use resolve::{RateQuote, RateSource, ShipmentLane, resolve_rate, resolve_skid_rate};
pub use templates::{TemplateExample, generate_template};

// Re-export public types
pub use types::{
    ConfigSummary, DEFAULT_TRANSIT_DAYS, ImportMetadata, MAX_SKID_COUNT, NormalizedCarrierConfig,
    PricingFormat, RateTables, RateType, RatingMethod, SkidRate, TERMINAL_CODE_LEN,
    TemplatePartKind, TerminalMapping, TerminalRate, ZoneRate,
};
pub use validation::{ValidationIssue, ValidationReport, validate_rate_tables};
