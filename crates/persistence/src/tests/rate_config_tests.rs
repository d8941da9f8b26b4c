// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_actor, create_test_cause, import_skids};
use crate::{CarrierRouting, Persistence, RateConfigListing, StoredRateConfig};
use ratebook::{CarrierRateState, Command, TransitionResult, apply};
use ratebook_domain::{PricingFormat, RatingMethod};

#[test]
fn test_import_stores_config_and_routing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let transition: TransitionResult = import_skids(&mut persistence, "ACME", "180");

    let stored: StoredRateConfig = persistence.get_rate_config("ACME").unwrap().unwrap();
    assert_eq!(Some(&stored.config), transition.new_state.config.as_ref());
    assert_eq!(stored.config.total_records, 2);
    assert!(!stored.imported_at.is_empty());

    let routing: CarrierRouting = persistence.get_carrier_routing("ACME").unwrap().unwrap();
    assert_eq!(routing.rating_method, RatingMethod::Normalized);
    assert_eq!(routing.rate_config_id, Some(stored.config_id));
}

#[test]
fn test_reimport_replaces_config() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    import_skids(&mut persistence, "ACME", "180");
    let first_id: i64 = persistence.get_rate_config("ACME").unwrap().unwrap().config_id;

    import_skids(&mut persistence, "ACME", "199");

    let listings: Vec<RateConfigListing> = persistence.list_rate_configs().unwrap();
    assert_eq!(listings.len(), 1);

    let stored: StoredRateConfig = persistence.get_rate_config("ACME").unwrap().unwrap();
    assert_ne!(stored.config_id, first_id);
    let skids = stored.config.skid_rates.unwrap();
    assert_eq!(skids[0].rate, 199.0);

    let routing: CarrierRouting = persistence.get_carrier_routing("ACME").unwrap().unwrap();
    assert_eq!(routing.rate_config_id, Some(stored.config_id));
}

#[test]
fn test_list_rate_configs_orders_by_carrier() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    import_skids(&mut persistence, "ZED", "100");
    import_skids(&mut persistence, "ACME", "180");

    let listings: Vec<RateConfigListing> = persistence.list_rate_configs().unwrap();
    let carriers: Vec<&str> = listings.iter().map(|l| l.carrier_id.as_str()).collect();
    assert_eq!(carriers, vec!["ACME", "ZED"]);
    assert_eq!(listings[0].format, PricingFormat::SkidBased);
    assert_eq!(listings[0].total_records, 2);
    assert_eq!(listings[0].currency, "CAD");
    assert_eq!(listings[0].created_by, "rates-admin");
}

#[test]
fn test_remove_clears_config_and_marks_manual() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    import_skids(&mut persistence, "ACME", "180");

    let state: CarrierRateState = persistence.get_carrier_state("ACME").unwrap();
    let transition: TransitionResult = apply(
        &state,
        Command::RemoveRates,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let persisted = persistence.persist_transition(&transition).unwrap();

    assert_eq!(persisted.config_id, None);
    assert!(persistence.get_rate_config("ACME").unwrap().is_none());
    let routing: CarrierRouting = persistence.get_carrier_routing("ACME").unwrap().unwrap();
    assert_eq!(routing.rating_method, RatingMethod::Manual);
    assert_eq!(routing.rate_config_id, None);
}

#[test]
fn test_carrier_state_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let transition: TransitionResult = import_skids(&mut persistence, "ACME", "180");

    let state: CarrierRateState = persistence.get_carrier_state("ACME").unwrap();
    assert_eq!(state, transition.new_state);
    assert_eq!(state.rating_method(), RatingMethod::Normalized);
}
