// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::import_skids;

#[test]
fn test_in_memory_database_enforces_foreign_keys() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    import_skids(&mut first, "ACME", "180");

    assert_eq!(first.list_rate_configs().unwrap().len(), 1);
    assert!(second.list_rate_configs().unwrap().is_empty());
}

#[test]
fn test_fresh_database_has_no_state() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.get_rate_config("ACME").unwrap().is_none());
    assert!(persistence.get_carrier_routing("ACME").unwrap().is_none());
    assert!(persistence.get_import_history("ACME").unwrap().is_empty());
    assert!(persistence.get_carrier_state("ACME").unwrap().config.is_none());
}
