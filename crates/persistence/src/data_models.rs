// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use ratebook_audit::AuditEvent;
use ratebook_domain::{NormalizedCarrierConfig, PricingFormat, RatingMethod};

use crate::diesel_schema::{carrier_routing, import_events, rate_configs};

/// A `rate_configs` row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = rate_configs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RateConfigRow {
    pub config_id: i64,
    pub carrier_id: String,
    pub format: String,
    pub config_name: String,
    pub currency: String,
    pub created_by: String,
    pub total_records: i64,
    pub config_json: String,
    pub imported_at: String,
}

/// A `carrier_routing` row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = carrier_routing)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CarrierRoutingRow {
    pub carrier_id: String,
    pub rating_method: String,
    pub rate_config_id: Option<i64>,
    pub updated_at: String,
}

/// An `import_events` row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = import_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ImportEventRow {
    pub event_id: i64,
    pub carrier_id: String,
    pub config_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: String,
}

/// A carrier's live rate configuration as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRateConfig {
    pub config_id: i64,
    /// ISO-8601 timestamp of the import that produced this configuration.
    pub imported_at: String,
    pub config: NormalizedCarrierConfig,
}

/// One line of the configuration listing; the tables themselves are not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateConfigListing {
    pub config_id: i64,
    pub carrier_id: String,
    pub format: PricingFormat,
    pub config_name: String,
    pub currency: String,
    pub created_by: String,
    pub total_records: usize,
    pub imported_at: String,
}

/// How a carrier's shipments are rated, and from which configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierRouting {
    pub carrier_id: String,
    pub rating_method: RatingMethod,
    pub rate_config_id: Option<i64>,
    pub updated_at: String,
}

/// A persisted audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEventRecord {
    pub event_id: i64,
    /// The configuration this event produced, while it is still live.
    pub config_id: Option<i64>,
    pub created_at: String,
    pub event: AuditEvent,
}

/// Identifiers assigned when a transition is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    pub event_id: i64,
    /// The new configuration's id; `None` after a removal.
    pub config_id: Option<i64>,
}
