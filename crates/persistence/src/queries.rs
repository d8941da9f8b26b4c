// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use ratebook::CarrierRateState;
use ratebook_audit::{AuditEvent, StateSnapshot};
use ratebook_domain::{NormalizedCarrierConfig, PricingFormat, RatingMethod};

use crate::data_models::{
    CarrierRouting, CarrierRoutingRow, ImportEventRecord, ImportEventRow, RateConfigListing,
    RateConfigRow, StoredRateConfig,
};
use crate::diesel_schema::{carrier_routing, import_events, rate_configs};
use crate::error::PersistenceError;

fn to_usize(value: i64) -> Result<usize, PersistenceError> {
    usize::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("Record count {value} is out of range"))
    })
}

fn to_stored(row: RateConfigRow) -> Result<StoredRateConfig, PersistenceError> {
    let config: NormalizedCarrierConfig = serde_json::from_str(&row.config_json)?;
    Ok(StoredRateConfig {
        config_id: row.config_id,
        imported_at: row.imported_at,
        config,
    })
}

/// Loads a carrier's live configuration, if it has one.
///
/// # Errors
///
/// Returns an error if the query fails or the stored document is unreadable.
pub fn get_rate_config(
    conn: &mut SqliteConnection,
    carrier_id: &str,
) -> Result<Option<StoredRateConfig>, PersistenceError> {
    rate_configs::table
        .filter(rate_configs::carrier_id.eq(carrier_id))
        .select(RateConfigRow::as_select())
        .first::<RateConfigRow>(conn)
        .optional()?
        .map(to_stored)
        .transpose()
}

/// Loads a carrier's current rate state.
///
/// A carrier that has never imported rates has an empty state.
///
/// # Errors
///
/// Returns an error if the query fails or the stored document is unreadable.
pub fn get_carrier_state(
    conn: &mut SqliteConnection,
    carrier_id: &str,
) -> Result<CarrierRateState, PersistenceError> {
    Ok(match get_rate_config(conn, carrier_id)? {
        Some(stored) => CarrierRateState::with_config(carrier_id.to_string(), stored.config),
        None => CarrierRateState::new(carrier_id.to_string()),
    })
}

/// Lists every live configuration, ordered by carrier id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_rate_configs(
    conn: &mut SqliteConnection,
) -> Result<Vec<RateConfigListing>, PersistenceError> {
    let rows: Vec<RateConfigRow> = rate_configs::table
        .order(rate_configs::carrier_id.asc())
        .select(RateConfigRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| -> Result<RateConfigListing, PersistenceError> {
            let format: PricingFormat = row
                .format
                .parse()
                .map_err(|e: ratebook_domain::DomainError| {
                    PersistenceError::ReconstructionError(e.to_string())
                })?;
            Ok(RateConfigListing {
                config_id: row.config_id,
                carrier_id: row.carrier_id,
                format,
                config_name: row.config_name,
                currency: row.currency,
                created_by: row.created_by,
                total_records: to_usize(row.total_records)?,
                imported_at: row.imported_at,
            })
        })
        .collect()
}

/// Loads a carrier's routing record, if one was ever written.
///
/// # Errors
///
/// Returns an error if the query fails or the stored rating method is unknown.
pub fn get_carrier_routing(
    conn: &mut SqliteConnection,
    carrier_id: &str,
) -> Result<Option<CarrierRouting>, PersistenceError> {
    let row: Option<CarrierRoutingRow> = carrier_routing::table
        .filter(carrier_routing::carrier_id.eq(carrier_id))
        .select(CarrierRoutingRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| -> Result<CarrierRouting, PersistenceError> {
        let rating_method: RatingMethod = row
            .rating_method
            .parse()
            .map_err(|e: ratebook_domain::DomainError| {
                PersistenceError::ReconstructionError(e.to_string())
            })?;
        Ok(CarrierRouting {
            carrier_id: row.carrier_id,
            rating_method,
            rate_config_id: row.rate_config_id,
            updated_at: row.updated_at,
        })
    })
    .transpose()
}

/// Loads a carrier's audit trail, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be decoded.
pub fn get_import_history(
    conn: &mut SqliteConnection,
    carrier_id: &str,
) -> Result<Vec<ImportEventRecord>, PersistenceError> {
    let rows: Vec<ImportEventRow> = import_events::table
        .filter(import_events::carrier_id.eq(carrier_id))
        .order(import_events::event_id.asc())
        .select(ImportEventRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| -> Result<ImportEventRecord, PersistenceError> {
            let event: AuditEvent = AuditEvent::new(
                row.carrier_id,
                serde_json::from_str(&row.actor_json)?,
                serde_json::from_str(&row.cause_json)?,
                serde_json::from_str(&row.action_json)?,
                StateSnapshot::new(row.before_snapshot),
                StateSnapshot::new(row.after_snapshot),
            );
            Ok(ImportEventRecord {
                event_id: row.event_id,
                config_id: row.config_id,
                created_at: row.created_at,
                event,
            })
        })
        .collect()
}
