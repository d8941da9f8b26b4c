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

mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_import::{parse_csv_table, parse_csv_tables};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_resolution_error,
};
pub use handlers::{
    get_format, get_import_history, get_rate_config, get_template, import_rates, list_formats,
    list_rate_configs, quote_shipment, quote_skids, remove_rates, validate_rates,
};
pub use request_response::{
    FormatInfo, ImportHistoryEntry, ImportHistoryResponse, ImportRatesRequest,
    ImportRatesResponse, ListFormatsResponse, ListRateConfigsResponse, PartInfo,
    QuoteShipmentRequest, QuoteSkidsRequest, RateConfigInfo, RateConfigResponse,
    RateQuoteResponse, RemoveRatesResponse, TemplateResponse, ValidateRatesRequest,
    ValidateRatesResponse, ValidationIssueInfo,
};
