// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use ratebook_domain::{NormalizedCarrierConfig, PricingFormat};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Who changed a carrier's rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "integration").
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a carrier's rates were changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Request or ticket identifier.
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What happened to a carrier's rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`ImportRates`").
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }

    /// A full replace of the carrier's rate configuration.
    #[must_use]
    pub fn import_rates(format: PricingFormat, config_name: &str) -> Self {
        Self::new(
            String::from("ImportRates"),
            Some(format!("Imported '{config_name}' as {format}")),
        )
    }

    /// Removal of the carrier's rate configuration.
    #[must_use]
    pub fn remove_rates() -> Self {
        Self::new(
            String::from("RemoveRates"),
            Some(String::from("Carrier returned to manual rating")),
        )
    }
}

/// A one-line summary of a carrier's rate configuration at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot of a carrier with no normalized rates.
    #[must_use]
    pub fn no_rates() -> Self {
        Self::new(String::from("rating_method=manual"))
    }

    /// Snapshot summarizing a normalized configuration.
    #[must_use]
    pub fn of_config(config: &NormalizedCarrierConfig) -> Self {
        Self::new(format!(
            "rating_method=normalized, format={}, config_name={}, currency={}, total_records={}",
            config.format, config.config_name, config.currency, config.total_records
        ))
    }
}

/// An immutable record of one change to a carrier's rates.
///
/// Every successful import or removal produces exactly one audit event:
/// - Who performed the change (actor)
/// - Why it was performed (cause)
/// - What was done (action)
/// - The carrier's rates before and after
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub carrier_id: String,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
}

impl AuditEvent {
    #[must_use]
    pub const fn new(
        carrier_id: String,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            carrier_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}
