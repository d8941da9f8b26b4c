// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for carrier rate configurations.
//!
//! Stores each carrier's live normalized configuration, the routing record
//! that says how the carrier is rated, and an append-only trail of import
//! and removal events. Built on Diesel over `SQLite`.
//!
//! ## Testing
//!
//! Every test opens its own shared in-memory database, so tests need no
//! external infrastructure and never see each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use diesel::SqliteConnection;
use ratebook::{CarrierRateState, TransitionResult};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub use data_models::{
    CarrierRouting, ImportEventRecord, PersistTransitionResult, RateConfigListing,
    StoredRateConfig,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for rate configurations and their audit trail.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives its own database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:ratebook_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Persists a transition: replaces the carrier's configuration, repoints
    /// its routing record and appends the audit event, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Loads the current rate state of a carrier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_carrier_state(
        &mut self,
        carrier_id: &str,
    ) -> Result<CarrierRateState, PersistenceError> {
        queries::get_carrier_state(&mut self.conn, carrier_id)
    }

    /// Loads a carrier's live configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_rate_config(
        &mut self,
        carrier_id: &str,
    ) -> Result<Option<StoredRateConfig>, PersistenceError> {
        queries::get_rate_config(&mut self.conn, carrier_id)
    }

    /// Lists every live configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_rate_configs(&mut self) -> Result<Vec<RateConfigListing>, PersistenceError> {
        queries::list_rate_configs(&mut self.conn)
    }

    /// Loads a carrier's routing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_carrier_routing(
        &mut self,
        carrier_id: &str,
    ) -> Result<Option<CarrierRouting>, PersistenceError> {
        queries::get_carrier_routing(&mut self.conn, carrier_id)
    }

    /// Loads a carrier's import and removal history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_import_history(
        &mut self,
        carrier_id: &str,
    ) -> Result<Vec<ImportEventRecord>, PersistenceError> {
        queries::get_import_history(&mut self.conn, carrier_id)
    }
}
