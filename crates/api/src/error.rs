// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API-specific error types.
//!
//! These errors are distinct from domain and persistence errors. Each
//! lower-level error is translated explicitly so internal detail does not
//! leak across the boundary.

use ratebook::CoreError;
use ratebook_domain::{DomainError, ResolutionError};
use ratebook_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An uploaded CSV file could not be read at all.
    #[error("Invalid CSV for {part}: {reason}")]
    InvalidCsvFormat {
        /// The template part the file was uploaded for.
        part: String,
        /// Why the file could not be read.
        reason: String,
    },
    /// The uploaded tables failed validation.
    #[error("Rate tables failed validation with {} error(s)", errors.len())]
    ValidationFailed {
        /// Every validation error, in report order.
        errors: Vec<String>,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The carrier's rates do not price the shipment.
    #[error("Rate unavailable: {message}")]
    RateUnavailable {
        /// Why no rate could be found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownFormat(key) => ApiError::ResourceNotFound {
            resource_type: String::from("Pricing format"),
            message: format!("'{key}' is not a registered pricing format"),
        },
        DomainError::UnknownTemplatePart { format, part } => ApiError::ResourceNotFound {
            resource_type: String::from("Template part"),
            message: format!("'{part}' is not a part of pricing format {format}"),
        },
        DomainError::UnknownRateType(value) => ApiError::InvalidInput {
            field: String::from("rate_type"),
            message: format!("'{value}' is not a supported rate type"),
        },
        DomainError::UnknownRatingMethod(value) => ApiError::Internal {
            message: format!("Stored rating method '{value}' is not recognized"),
        },
        DomainError::InvalidRateTables { errors } => ApiError::ValidationFailed { errors },
        DomainError::InvalidCarrierId(message) => ApiError::InvalidInput {
            field: String::from("carrier_id"),
            message,
        },
        DomainError::InvalidConfigName(message) => ApiError::InvalidInput {
            field: String::from("config_name"),
            message,
        },
        DomainError::InvalidCurrency(message) => ApiError::InvalidInput {
            field: String::from("currency"),
            message,
        },
        DomainError::TemplateRender(reason) => ApiError::Internal {
            message: format!("Template could not be rendered: {reason}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoRatesConfigured { carrier_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Rate configuration"),
            message: format!("Carrier '{carrier_id}' has no normalized rates configured"),
        },
    }
}

/// Translates a resolution miss into an API error.
///
/// Bad shipment input is reported as invalid input; every other miss means
/// the carrier simply has no rate for the shipment.
#[must_use]
pub fn translate_resolution_error(err: ResolutionError) -> ApiError {
    match err {
        ResolutionError::InvalidWeight(_) => ApiError::InvalidInput {
            field: String::from("weight"),
            message: err.to_string(),
        },
        ResolutionError::UnsupportedFormat { .. } => ApiError::DomainRuleViolation {
            rule: String::from("format_supports_query"),
            message: err.to_string(),
        },
        ResolutionError::TerminalNotFound { .. }
        | ResolutionError::NoRateForWeight { .. }
        | ResolutionError::NoRateForSkidCount(_)
        | ResolutionError::NoZoneRate { .. }
        | ResolutionError::SkidWeightExceeded { .. } => ApiError::RateUnavailable {
            message: err.to_string(),
        },
    }
}
