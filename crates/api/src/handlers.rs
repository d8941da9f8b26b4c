// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations over the rate engine.
//!
//! Handlers translate requests into domain inputs, run the pure domain and
//! core functions, persist transitions and translate every error into an
//! [`ApiError`].

use ratebook::{CarrierRateState, Command, TransitionResult, apply};
use ratebook_audit::{Actor, Cause};
use ratebook_domain::{
    FormatDescriptor, NormalizedCarrierConfig, PricingFormat, RateQuote, RateTables,
    RatingMethod, ShipmentLane, TemplateExample, TemplatePart, ValidationReport,
    all_format_descriptors, generate_template, get_format_descriptor, normalize_carrier_id,
    resolve_rate, resolve_skid_rate, validate_rate_tables,
};
use ratebook_persistence::{
    CarrierRouting, ImportEventRecord, PersistTransitionResult, Persistence, RateConfigListing,
    StoredRateConfig,
};
use tracing::{debug, info, warn};

use crate::csv_import::parse_csv_tables;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_resolution_error,
};
use crate::request_response::{
    FormatInfo, ImportHistoryEntry, ImportHistoryResponse, ImportRatesRequest,
    ImportRatesResponse, ListFormatsResponse, ListRateConfigsResponse, PartInfo,
    QuoteShipmentRequest, QuoteSkidsRequest, RateConfigInfo, RateConfigResponse,
    RateQuoteResponse, RemoveRatesResponse, TemplateResponse, ValidateRatesRequest,
    ValidateRatesResponse, ValidationIssueInfo,
};

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn part_info(part: &TemplatePart) -> PartInfo {
    PartInfo {
        key: part.kind.as_str().to_string(),
        required: part.required,
        headers: to_strings(part.headers),
        optional_headers: to_strings(part.optional_headers),
    }
}

fn format_info(descriptor: &FormatDescriptor) -> FormatInfo {
    FormatInfo {
        key: descriptor.format.as_str().to_string(),
        name: descriptor.name.to_string(),
        description: descriptor.description.to_string(),
        complexity: descriptor.complexity,
        parts: descriptor.parts.iter().map(part_info).collect(),
    }
}

/// Parses a format key supplied in a request body.
fn parse_format_field(format: &str) -> Result<PricingFormat, ApiError> {
    format.parse().map_err(|_| ApiError::InvalidInput {
        field: String::from("format"),
        message: format!(
            "'{format}' is not a registered pricing format; expected one of {}",
            PricingFormat::ALL
                .iter()
                .map(PricingFormat::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

fn carrier_id_field(carrier_id: &str) -> Result<String, ApiError> {
    normalize_carrier_id(carrier_id).map_err(translate_domain_error)
}

/// Lists every registered pricing format.
#[must_use]
pub fn list_formats() -> ListFormatsResponse {
    ListFormatsResponse {
        formats: all_format_descriptors().iter().map(format_info).collect(),
    }
}

/// Describes one pricing format.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the format key is not registered.
pub fn get_format(key: &str) -> Result<FormatInfo, ApiError> {
    let descriptor: &FormatDescriptor = get_format_descriptor(key).map_err(translate_domain_error)?;
    Ok(format_info(descriptor))
}

/// Builds the CSV template for one part of a format.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the format or part is unknown.
pub fn get_template(format: &str, part: &str) -> Result<TemplateResponse, ApiError> {
    let format: PricingFormat = format.parse().map_err(translate_domain_error)?;
    let template: TemplateExample =
        generate_template(format, part).map_err(translate_domain_error)?;

    Ok(TemplateResponse {
        format: template.format,
        part: template.part,
        file_name: template.file_name,
        headers: template.headers,
        sample_rows: template.sample_rows,
        csv_text: template.csv_text,
        instructions: template.instructions,
        notes: template.notes,
    })
}

/// Validates uploaded files without importing them.
///
/// A file that fails validation is a successful call: the problems are
/// returned in the response.
///
/// # Errors
///
/// Returns an error if the format is unknown or a file is not readable CSV.
pub fn validate_rates(request: &ValidateRatesRequest) -> Result<ValidateRatesResponse, ApiError> {
    let format: PricingFormat = parse_format_field(&request.format)?;
    let tables: RateTables = parse_csv_tables(&request.files)?;

    let report: ValidationReport = validate_rate_tables(format, &tables);
    debug!(
        format = %format,
        issue_count = report.issues.len(),
        "Validated rate files"
    );

    Ok(ValidateRatesResponse {
        format,
        valid: report.is_valid(),
        errors: report.errors(),
        issues: report
            .issues
            .into_iter()
            .map(|issue| ValidationIssueInfo {
                part: issue.part,
                row: issue.row,
                message: issue.message,
            })
            .collect(),
    })
}

/// Imports uploaded files as the carrier's rate configuration.
///
/// The previous configuration, if any, is replaced and the carrier is
/// routed to normalized rating. The change is recorded in the carrier's
/// import history.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The import request
/// * `actor` - Who is importing; recorded as the config's creator
/// * `cause` - Why the rates are being imported
///
/// # Errors
///
/// Returns an error if:
/// - The carrier id, format, config name or currency is invalid
/// - A file is not readable CSV
/// - The files fail validation (`ApiError::ValidationFailed`)
/// - The database operation fails
pub fn import_rates(
    persistence: &mut Persistence,
    request: ImportRatesRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ImportRatesResponse, ApiError> {
    let carrier_id: String = carrier_id_field(&request.carrier_id)?;
    let format: PricingFormat = parse_format_field(&request.format)?;
    let tables: RateTables = parse_csv_tables(&request.files)?;

    let state: CarrierRateState = persistence.get_carrier_state(&carrier_id)?;
    let command: Command = Command::ImportRates {
        format,
        config_name: request.config_name,
        currency: request.currency,
        tables,
    };

    let transition: TransitionResult = apply(&state, command, actor, cause).map_err(|e| {
        warn!(carrier_id = %carrier_id, format = %format, error = %e, "Rate import rejected");
        translate_core_error(e)
    })?;

    let persisted: PersistTransitionResult = persistence.persist_transition(&transition)?;
    let config_id: i64 = persisted.config_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Imported configuration was not assigned an id"),
    })?;

    let config: NormalizedCarrierConfig =
        transition.new_state.config.ok_or_else(|| ApiError::Internal {
            message: String::from("Import produced no configuration"),
        })?;

    info!(
        carrier_id = %carrier_id,
        format = %config.format,
        config_id,
        total_records = config.total_records,
        "Imported carrier rates"
    );

    Ok(ImportRatesResponse {
        message: format!(
            "Imported '{}' for carrier '{carrier_id}' with {} record(s)",
            config.config_name, config.total_records
        ),
        carrier_id,
        config_id,
        event_id: persisted.event_id,
        format: config.format,
        config_name: config.config_name,
        currency: config.currency,
        total_records: config.total_records,
        summary: config.summary,
    })
}

/// Removes the carrier's rate configuration and returns it to manual rating.
///
/// # Errors
///
/// Returns an error if the carrier id is invalid, the carrier has no
/// normalized rates, or the database operation fails.
pub fn remove_rates(
    persistence: &mut Persistence,
    carrier_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<RemoveRatesResponse, ApiError> {
    let carrier_id: String = carrier_id_field(carrier_id)?;
    let state: CarrierRateState = persistence.get_carrier_state(&carrier_id)?;

    let transition: TransitionResult =
        apply(&state, Command::RemoveRates, actor, cause).map_err(translate_core_error)?;
    let persisted: PersistTransitionResult = persistence.persist_transition(&transition)?;

    info!(carrier_id = %carrier_id, event_id = persisted.event_id, "Removed carrier rates");

    Ok(RemoveRatesResponse {
        message: format!("Carrier '{carrier_id}' returned to manual rating"),
        carrier_id,
        event_id: persisted.event_id,
        rating_method: transition.new_state.rating_method(),
    })
}

/// Returns the carrier's live configuration.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the carrier has no configuration.
pub fn get_rate_config(
    persistence: &mut Persistence,
    carrier_id: &str,
) -> Result<RateConfigResponse, ApiError> {
    let carrier_id: String = carrier_id_field(carrier_id)?;
    let stored: StoredRateConfig = persistence
        .get_rate_config(&carrier_id)?
        .ok_or_else(|| no_rates(&carrier_id))?;
    let rating_method: RatingMethod = persistence
        .get_carrier_routing(&carrier_id)?
        .map_or(RatingMethod::Normalized, |routing| routing.rating_method);

    Ok(RateConfigResponse {
        config_id: stored.config_id,
        imported_at: stored.imported_at,
        rating_method,
        config: stored.config,
    })
}

/// Lists every live configuration, ordered by carrier.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rate_configs(
    persistence: &mut Persistence,
) -> Result<ListRateConfigsResponse, ApiError> {
    let listings: Vec<RateConfigListing> = persistence.list_rate_configs()?;
    Ok(ListRateConfigsResponse {
        configs: listings
            .into_iter()
            .map(|listing| RateConfigInfo {
                config_id: listing.config_id,
                carrier_id: listing.carrier_id,
                format: listing.format,
                config_name: listing.config_name,
                currency: listing.currency,
                created_by: listing.created_by,
                total_records: listing.total_records,
                imported_at: listing.imported_at,
            })
            .collect(),
    })
}

/// Returns the carrier's import and removal history, oldest first.
///
/// A carrier that was never imported has an empty history.
///
/// # Errors
///
/// Returns an error if the carrier id is invalid or the query fails.
pub fn get_import_history(
    persistence: &mut Persistence,
    carrier_id: &str,
) -> Result<ImportHistoryResponse, ApiError> {
    let carrier_id: String = carrier_id_field(carrier_id)?;
    let records: Vec<ImportEventRecord> = persistence.get_import_history(&carrier_id)?;

    Ok(ImportHistoryResponse {
        carrier_id,
        entries: records
            .into_iter()
            .map(|record| ImportHistoryEntry {
                event_id: record.event_id,
                config_id: record.config_id,
                created_at: record.created_at,
                action: record.event.action.name,
                details: record.event.action.details,
                actor_id: record.event.actor.id,
                reason: record.event.cause.description,
                before: record.event.before.data,
                after: record.event.after.data,
            })
            .collect(),
    })
}

fn no_rates(carrier_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Rate configuration"),
        message: format!("Carrier '{carrier_id}' has no normalized rates configured"),
    }
}

/// Loads the configuration of a carrier routed to normalized rating.
fn load_rating_config(
    persistence: &mut Persistence,
    carrier_id: &str,
) -> Result<NormalizedCarrierConfig, ApiError> {
    let routing: Option<CarrierRouting> = persistence.get_carrier_routing(carrier_id)?;
    if routing.is_none_or(|r| r.rating_method != RatingMethod::Normalized) {
        return Err(no_rates(carrier_id));
    }
    persistence
        .get_rate_config(carrier_id)?
        .map(|stored| stored.config)
        .ok_or_else(|| no_rates(carrier_id))
}

fn quote_response(config: NormalizedCarrierConfig, quote: RateQuote) -> RateQuoteResponse {
    RateQuoteResponse {
        carrier_id: config.carrier_id,
        config_name: config.config_name,
        currency: config.currency,
        charge: quote.charge,
        fuel_amount: quote.fuel_amount,
        total_charge: quote.total_charge,
        transit_days: quote.transit_days,
        rate_type: quote.rate_type,
        source: quote.source,
        fallback_reason: quote.fallback_reason,
    }
}

/// Prices a shipment by lane and weight with the carrier's normalized rates.
///
/// # Errors
///
/// Returns an error if:
/// - The carrier is not routed to normalized rating (`ResourceNotFound`)
/// - The weight is not positive (`InvalidInput`)
/// - The carrier's rates do not price the lane (`RateUnavailable`)
/// - The carrier's format is skid based (`DomainRuleViolation`)
pub fn quote_shipment(
    persistence: &mut Persistence,
    request: &QuoteShipmentRequest,
) -> Result<RateQuoteResponse, ApiError> {
    let carrier_id: String = carrier_id_field(&request.carrier_id)?;
    let config: NormalizedCarrierConfig = load_rating_config(persistence, &carrier_id)?;

    let lane: ShipmentLane = ShipmentLane::new(
        request.origin_city.clone(),
        request.origin_province.clone(),
        request.destination_city.clone(),
        request.destination_province.clone(),
    );
    let quote: RateQuote =
        resolve_rate(&config, &lane, request.weight).map_err(translate_resolution_error)?;

    debug!(
        carrier_id = %carrier_id,
        weight = request.weight,
        total_charge = quote.total_charge,
        "Quoted shipment"
    );
    Ok(quote_response(config, quote))
}

/// Prices a shipment by skid count with the carrier's normalized rates.
///
/// # Errors
///
/// Returns an error if the carrier is not routed to normalized rating, the
/// carrier's format is not skid based, or no rate covers the request.
pub fn quote_skids(
    persistence: &mut Persistence,
    request: &QuoteSkidsRequest,
) -> Result<RateQuoteResponse, ApiError> {
    let carrier_id: String = carrier_id_field(&request.carrier_id)?;
    let config: NormalizedCarrierConfig = load_rating_config(persistence, &carrier_id)?;

    let quote: RateQuote = resolve_skid_rate(&config, request.skid_count, request.total_weight)
        .map_err(translate_resolution_error)?;

    debug!(
        carrier_id = %carrier_id,
        skid_count = request.skid_count,
        total_charge = quote.total_charge,
        "Quoted skids"
    );
    Ok(quote_response(config, quote))
}
