// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use ratebook_audit::{Actor, Cause};
use ratebook_domain::{PricingFormat, RateTables};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("rates-admin"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Annual tariff update"))
}

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

pub fn create_skid_tables(rate_for_one: &str) -> RateTables {
    let mut tables: RateTables = RateTables::new();
    tables.insert(
        String::from("skid_rates"),
        rows(&[
            &["Skid_Count", "Rate", "Fuel_Surcharge"],
            &["1", rate_for_one, "15"],
            &["2", "320", "15"],
        ]),
    );
    tables
}

pub fn create_import_command(rate_for_one: &str) -> Command {
    Command::ImportRates {
        format: PricingFormat::SkidBased,
        config_name: String::from("Spring 2026"),
        currency: String::from("usd"),
        tables: create_skid_tables(rate_for_one),
    }
}
