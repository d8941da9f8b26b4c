// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ratebook_domain::{PricingFormat, RatingMethod};
use ratebook_persistence::Persistence;

use super::helpers::{
    MAPPING_CSV, SKID_CSV, create_test_actor, create_test_cause, create_test_persistence, files,
    import_request, import_terminal_rates,
};
use crate::{
    ApiError, ImportHistoryResponse, ImportRatesRequest, ImportRatesResponse, ListRateConfigsResponse,
    RateConfigResponse, RemoveRatesResponse, get_import_history, get_rate_config, import_rates,
    list_rate_configs, remove_rates,
};

#[test]
fn test_import_rates_stores_normalized_config() {
    let mut persistence: Persistence = create_test_persistence();
    let response: ImportRatesResponse = import_terminal_rates(&mut persistence, " CARRIER-1 ");

    assert_eq!(response.carrier_id, "CARRIER-1");
    assert_eq!(response.format, PricingFormat::TerminalWeightBased);
    assert_eq!(response.currency, "CAD");
    assert_eq!(response.total_records, 5);
    assert_eq!(response.summary.lane_count, 1);

    let stored: RateConfigResponse = get_rate_config(&mut persistence, "CARRIER-1").unwrap();
    assert_eq!(stored.config_id, response.config_id);
    assert_eq!(stored.rating_method, RatingMethod::Normalized);
    assert_eq!(stored.config.created_by, "rates-admin");
    assert_eq!(stored.config.terminal_mapping.as_ref().map(Vec::len), Some(3));
}

#[test]
fn test_import_rates_rejects_invalid_tables_without_persisting() {
    let mut persistence: Persistence = create_test_persistence();
    let rates: &str = "Origin_Terminal,Destination_Terminal,Weight_Min,Weight_Max,Rate_Type,Rate_Value,Min_Charge,Fuel_Surcharge\n\
KIT,TOR,0,500,PER_KG,78.11,125,0\n";
    let result: Result<ImportRatesResponse, ApiError> = import_rates(
        &mut persistence,
        import_request(
            "CARRIER-1",
            "terminal_weight_based",
            files(&[("terminal_mapping", MAPPING_CSV), ("terminal_rates", rates)]),
        ),
        create_test_actor(),
        create_test_cause(),
    );

    match result.unwrap_err() {
        ApiError::ValidationFailed { errors } => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("PER_KG"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let listing: ListRateConfigsResponse = list_rate_configs(&mut persistence).unwrap();
    assert!(listing.configs.is_empty());
}

#[test]
fn test_import_rates_rejects_bad_currency() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: ImportRatesRequest = import_request("CARRIER-1", "skid_based", files(&[("skid_rates", SKID_CSV)]));
    request.currency = String::from("dollars");

    let result: Result<ImportRatesResponse, ApiError> = import_rates(
        &mut persistence,
        request,
        create_test_actor(),
        create_test_cause(),
    );
    match result.unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "currency"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_import_rates_rejects_blank_carrier() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<ImportRatesResponse, ApiError> = import_rates(
        &mut persistence,
        import_request("  ", "skid_based", files(&[("skid_rates", SKID_CSV)])),
        create_test_actor(),
        create_test_cause(),
    );
    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput { .. }));
}

#[test]
fn test_reimport_replaces_config_and_extends_history() {
    let mut persistence: Persistence = create_test_persistence();
    let first: ImportRatesResponse = import_terminal_rates(&mut persistence, "CARRIER-1");
    let second: ImportRatesResponse = import_rates(
        &mut persistence,
        import_request("CARRIER-1", "skid_based", files(&[("skid_rates", SKID_CSV)])),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_ne!(first.config_id, second.config_id);

    let stored: RateConfigResponse = get_rate_config(&mut persistence, "CARRIER-1").unwrap();
    assert_eq!(stored.config.format, PricingFormat::SkidBased);
    assert!(stored.config.terminal_rates.is_none());

    let listing: ListRateConfigsResponse = list_rate_configs(&mut persistence).unwrap();
    assert_eq!(listing.configs.len(), 1);

    let history: ImportHistoryResponse = get_import_history(&mut persistence, "CARRIER-1").unwrap();
    assert_eq!(history.entries.len(), 2);
    assert_eq!(history.entries[0].before, "rating_method=manual");
    assert_eq!(history.entries[1].before, history.entries[0].after);
    assert_eq!(history.entries[1].config_id, Some(second.config_id));
    assert_eq!(history.entries[0].reason, "Tariff upload");
}

#[test]
fn test_list_rate_configs_orders_by_carrier() {
    let mut persistence: Persistence = create_test_persistence();
    import_terminal_rates(&mut persistence, "ZED-FREIGHT");
    import_terminal_rates(&mut persistence, "ACME");

    let listing: ListRateConfigsResponse = list_rate_configs(&mut persistence).unwrap();
    let carriers: Vec<&str> = listing.configs.iter().map(|c| c.carrier_id.as_str()).collect();
    assert_eq!(carriers, vec!["ACME", "ZED-FREIGHT"]);
}

#[test]
fn test_remove_rates_returns_carrier_to_manual() {
    let mut persistence: Persistence = create_test_persistence();
    import_terminal_rates(&mut persistence, "CARRIER-1");

    let removed: RemoveRatesResponse = remove_rates(
        &mut persistence,
        "CARRIER-1",
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(removed.rating_method, RatingMethod::Manual);

    let result: Result<RateConfigResponse, ApiError> =
        get_rate_config(&mut persistence, "CARRIER-1");
    assert!(matches!(result.unwrap_err(), ApiError::ResourceNotFound { .. }));

    let history: ImportHistoryResponse = get_import_history(&mut persistence, "CARRIER-1").unwrap();
    assert_eq!(history.entries.len(), 2);
    assert_eq!(history.entries[1].action, "RemoveRates");
    assert_eq!(history.entries[1].after, "rating_method=manual");
}

#[test]
fn test_remove_rates_without_config_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<RemoveRatesResponse, ApiError> = remove_rates(
        &mut persistence,
        "CARRIER-1",
        create_test_actor(),
        create_test_cause(),
    );
    assert!(matches!(result.unwrap_err(), ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_history_of_unknown_carrier_is_empty() {
    let mut persistence: Persistence = create_test_persistence();
    let history: ImportHistoryResponse = get_import_history(&mut persistence, "NOBODY").unwrap();
    assert!(history.entries.is_empty());
}
