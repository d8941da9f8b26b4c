// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CarrierRateState, TransitionResult};
use ratebook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use ratebook_domain::{
    ImportMetadata, NormalizedCarrierConfig, normalize_carrier_id, normalize_rate_tables,
};

/// Applies a command to a carrier's current rate state.
///
/// Pure: nothing is persisted. On success the caller receives the new
/// state and exactly one audit event describing the transition.
///
/// # Arguments
///
/// * `state` - The carrier's current rate state
/// * `command` - The command to apply
/// * `actor` - Who is making the change; recorded as the config's creator
/// * `cause` - Why the change is being made
///
/// # Errors
///
/// Returns an error if:
/// - The carrier id or import metadata is invalid
/// - The uploaded tables fail validation
/// - Rates are removed from a carrier that has none
pub fn apply(
    state: &CarrierRateState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let carrier_id: String = normalize_carrier_id(&state.carrier_id)?;

    match command {
        Command::ImportRates {
            format,
            config_name,
            currency,
            tables,
        } => {
            let metadata: ImportMetadata =
                ImportMetadata::new(carrier_id.clone(), config_name, currency, actor.id.clone());
            let config: NormalizedCarrierConfig =
                normalize_rate_tables(format, &tables, &metadata)?;

            let before: StateSnapshot = state.to_snapshot();
            let action: Action = Action::import_rates(config.format, &config.config_name);
            let new_state: CarrierRateState =
                CarrierRateState::with_config(carrier_id.clone(), config);
            let after: StateSnapshot = new_state.to_snapshot();

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(carrier_id, actor, cause, action, before, after),
            })
        }
        Command::RemoveRates => {
            if state.config.is_none() {
                return Err(CoreError::NoRatesConfigured { carrier_id });
            }

            let before: StateSnapshot = state.to_snapshot();
            let new_state: CarrierRateState = CarrierRateState::new(carrier_id.clone());
            let after: StateSnapshot = new_state.to_snapshot();

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(
                    carrier_id,
                    actor,
                    cause,
                    Action::remove_rates(),
                    before,
                    after,
                ),
            })
        }
    }
}
