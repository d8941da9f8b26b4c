// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use ratebook_domain::{
    Complexity, ConfigSummary, NormalizedCarrierConfig, PricingFormat, RateSource, RateType,
    RatingMethod, TemplatePartKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One template part of a pricing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// The part key, e.g. `terminal_rates`.
    pub key: String,
    /// Whether an upload must include this part.
    pub required: bool,
    /// Every header in template order.
    pub headers: Vec<String>,
    /// Headers whose cells may be left blank.
    pub optional_headers: Vec<String>,
}

/// A registered pricing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// The format key, e.g. `terminal_weight_based`.
    pub key: String,
    /// Display name.
    pub name: String,
    pub description: String,
    pub complexity: Complexity,
    pub parts: Vec<PartInfo>,
}

/// API response listing every registered pricing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// API response carrying a downloadable CSV template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub format: PricingFormat,
    pub part: TemplatePartKind,
    pub file_name: String,
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
    /// Header plus sample rows rendered as CSV.
    pub csv_text: String,
    pub instructions: Vec<String>,
    pub notes: Vec<String>,
}

/// API request to validate uploaded rate files without importing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRatesRequest {
    /// The pricing format key.
    pub format: String,
    /// CSV text keyed by template part.
    pub files: BTreeMap<String, String>,
}

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssueInfo {
    pub part: TemplatePartKind,
    /// 1-based display row (header is row 1); absent for file-level problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub message: String,
}

/// API response for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRatesResponse {
    pub format: PricingFormat,
    /// Whether the files can be imported.
    pub valid: bool,
    /// Every problem rendered as a sentence, in report order.
    pub errors: Vec<String>,
    /// The same problems in structured form.
    pub issues: Vec<ValidationIssueInfo>,
}

/// API request to import uploaded rate files for a carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRatesRequest {
    pub carrier_id: String,
    /// The pricing format key.
    pub format: String,
    pub config_name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// CSV text keyed by template part.
    pub files: BTreeMap<String, String>,
}

/// API response for a successful import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRatesResponse {
    pub carrier_id: String,
    /// Identifier of the stored configuration.
    pub config_id: i64,
    /// Identifier of the audit event recording the import.
    pub event_id: i64,
    pub format: PricingFormat,
    pub config_name: String,
    pub currency: String,
    pub total_records: usize,
    pub summary: ConfigSummary,
    /// A success message.
    pub message: String,
}

/// API response for a successful removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRatesResponse {
    pub carrier_id: String,
    pub event_id: i64,
    pub rating_method: RatingMethod,
    /// A success message.
    pub message: String,
}

/// API response carrying a carrier's live configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfigResponse {
    pub config_id: i64,
    /// ISO-8601 import timestamp.
    pub imported_at: String,
    pub rating_method: RatingMethod,
    pub config: NormalizedCarrierConfig,
}

/// Summary of one live configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfigInfo {
    pub config_id: i64,
    pub carrier_id: String,
    pub format: PricingFormat,
    pub config_name: String,
    pub currency: String,
    pub created_by: String,
    pub total_records: usize,
    pub imported_at: String,
}

/// API response listing every live configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRateConfigsResponse {
    pub configs: Vec<RateConfigInfo>,
}

/// One entry in a carrier's import history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportHistoryEntry {
    pub event_id: i64,
    /// The configuration the event installed, while it is still live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<i64>,
    pub created_at: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub actor_id: String,
    pub reason: String,
    pub before: String,
    pub after: String,
}

/// API response carrying a carrier's import history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportHistoryResponse {
    pub carrier_id: String,
    pub entries: Vec<ImportHistoryEntry>,
}

/// API request to price a shipment by lane and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteShipmentRequest {
    pub carrier_id: String,
    pub origin_city: String,
    pub origin_province: String,
    pub destination_city: String,
    pub destination_province: String,
    /// Shipment weight in pounds.
    pub weight: f64,
}

/// API request to price a shipment by skid count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSkidsRequest {
    pub carrier_id: String,
    pub skid_count: u32,
    /// Declared total weight in pounds, checked against the per-skid ceiling.
    #[serde(default)]
    pub total_weight: Option<f64>,
}

/// API response for a priced shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuoteResponse {
    pub carrier_id: String,
    pub config_name: String,
    pub currency: String,
    pub charge: f64,
    pub fuel_amount: f64,
    pub total_charge: f64,
    pub transit_days: u32,
    pub rate_type: RateType,
    pub source: RateSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
