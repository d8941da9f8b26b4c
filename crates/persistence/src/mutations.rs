// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! A transition is written in one transaction: the carrier's previous
//! configuration is deleted, the new one (if any) inserted, the routing
//! record repointed, and the audit event appended. Concurrent imports for
//! the same carrier serialize on the connection; the last one wins.

use diesel::prelude::*;
use diesel::SqliteConnection;
use ratebook::TransitionResult;
use ratebook_audit::AuditEvent;
use ratebook_domain::NormalizedCarrierConfig;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::data_models::PersistTransitionResult;
use crate::diesel_schema::{carrier_routing, import_events, rate_configs};
use crate::error::PersistenceError;

fn now_timestamp() -> Result<String, PersistenceError> {
    Ok(OffsetDateTime::now_utc().format(&Iso8601::DEFAULT)?)
}

/// Persists a transition result.
///
/// # Errors
///
/// Returns an error if serialization or any statement fails. Nothing is
/// written in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let now: String = now_timestamp()?;
        let carrier_id: &str = result.new_state.carrier_id.as_str();

        let removed: usize = diesel::delete(
            rate_configs::table.filter(rate_configs::carrier_id.eq(carrier_id)),
        )
        .execute(conn)?;
        debug!(carrier_id, removed, "Cleared previous rate configuration");

        let config_id: Option<i64> = match &result.new_state.config {
            Some(config) => Some(insert_rate_config(conn, config, &now)?),
            None => None,
        };

        diesel::replace_into(carrier_routing::table)
            .values((
                carrier_routing::carrier_id.eq(carrier_id),
                carrier_routing::rating_method.eq(result.new_state.rating_method().as_str()),
                carrier_routing::rate_config_id.eq(config_id),
                carrier_routing::updated_at.eq(now.as_str()),
            ))
            .execute(conn)?;

        let event_id: i64 = insert_import_event(conn, &result.audit_event, config_id, &now)?;

        info!(
            carrier_id,
            event_id,
            ?config_id,
            action = %result.audit_event.action.name,
            "Persisted rate transition"
        );

        Ok(PersistTransitionResult {
            event_id,
            config_id,
        })
    })
}

fn insert_rate_config(
    conn: &mut SqliteConnection,
    config: &NormalizedCarrierConfig,
    imported_at: &str,
) -> Result<i64, PersistenceError> {
    let config_json: String = serde_json::to_string(config)?;
    let total_records: i64 = i64::try_from(config.total_records).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "total_records {} does not fit in a database integer",
            config.total_records
        ))
    })?;

    diesel::insert_into(rate_configs::table)
        .values((
            rate_configs::carrier_id.eq(&config.carrier_id),
            rate_configs::format.eq(config.format.as_str()),
            rate_configs::config_name.eq(&config.config_name),
            rate_configs::currency.eq(&config.currency),
            rate_configs::created_by.eq(&config.created_by),
            rate_configs::total_records.eq(total_records),
            rate_configs::config_json.eq(config_json),
            rate_configs::imported_at.eq(imported_at),
        ))
        .execute(conn)?;

    let config_id: i64 = get_last_insert_rowid(conn)?;
    debug!(config_id, total_records, "Inserted rate configuration");
    Ok(config_id)
}

fn insert_import_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    config_id: Option<i64>,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;

    diesel::insert_into(import_events::table)
        .values((
            import_events::carrier_id.eq(&event.carrier_id),
            import_events::config_id.eq(config_id),
            import_events::actor_json.eq(actor_json),
            import_events::cause_json.eq(cause_json),
            import_events::action_json.eq(action_json),
            import_events::before_snapshot.eq(&event.before.data),
            import_events::after_snapshot.eq(&event.after.data),
            import_events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
