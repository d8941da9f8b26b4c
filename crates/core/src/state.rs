// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ratebook_audit::{AuditEvent, StateSnapshot};
use ratebook_domain::{NormalizedCarrierConfig, RatingMethod};

/// The rate state of a single carrier.
///
/// A carrier either has one normalized configuration or none. There is no
/// partial state: imports replace the whole configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierRateState {
    pub carrier_id: String,
    pub config: Option<NormalizedCarrierConfig>,
}

impl CarrierRateState {
    /// Creates the state of a carrier with no normalized rates.
    #[must_use]
    pub const fn new(carrier_id: String) -> Self {
        Self {
            carrier_id,
            config: None,
        }
    }

    /// Creates the state of a carrier with an existing configuration.
    #[must_use]
    pub const fn with_config(carrier_id: String, config: NormalizedCarrierConfig) -> Self {
        Self {
            carrier_id,
            config: Some(config),
        }
    }

    /// How this carrier's shipments are currently rated.
    #[must_use]
    pub const fn rating_method(&self) -> RatingMethod {
        if self.config.is_some() {
            RatingMethod::Normalized
        } else {
            RatingMethod::Manual
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        self.config
            .as_ref()
            .map_or_else(StateSnapshot::no_rates, StateSnapshot::of_config)
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: CarrierRateState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
