// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod rate_config_tests;

use crate::Persistence;
use ratebook::{CarrierRateState, Command, TransitionResult, apply};
use ratebook_audit::{Actor, Cause};
use ratebook_domain::{PricingFormat, RateTables};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("rates-admin"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Tariff upload"))
}

pub fn create_skid_tables(rate_for_one: &str) -> RateTables {
    let rows: Vec<Vec<String>> = [
        ["Skid_Count", "Rate", "Fuel_Surcharge"],
        ["1", rate_for_one, "15"],
        ["2", "320", "15"],
    ]
    .iter()
    .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
    .collect();
    let mut tables: RateTables = RateTables::new();
    tables.insert(String::from("skid_rates"), rows);
    tables
}

/// Applies an import for `carrier_id` against its stored state and persists it.
pub fn import_skids(persistence: &mut Persistence, carrier_id: &str, rate_for_one: &str) -> TransitionResult {
    let state: CarrierRateState = persistence.get_carrier_state(carrier_id).unwrap();
    let transition: TransitionResult = apply(
        &state,
        Command::ImportRates {
            format: PricingFormat::SkidBased,
            config_name: format!("{carrier_id} skids"),
            currency: String::from("CAD"),
            tables: create_skid_tables(rate_for_one),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_transition(&transition).unwrap();
    transition
}
