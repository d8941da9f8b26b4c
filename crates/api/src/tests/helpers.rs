// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use ratebook_audit::{Actor, Cause};
use ratebook_persistence::Persistence;
use std::collections::BTreeMap;

use crate::{ImportRatesRequest, ImportRatesResponse, import_rates};

pub const MAPPING_CSV: &str = "City,Province,Terminal_Code,Terminal_Name,Service_Area\n\
Kitchener,ON,KIT,Kitchener Terminal,Waterloo Region\n\
Toronto,ON,TOR,Toronto Terminal,GTA\n\
Montreal,QC,MTL,Montreal Terminal,\n";

pub const RATES_CSV: &str = "Origin_Terminal,Destination_Terminal,Weight_Min,Weight_Max,Rate_Type,Rate_Value,Min_Charge,Fuel_Surcharge,Transit_Days\n\
KIT,TOR,0,500,PER_100LBS,78.11,125,0,1\n\
KIT,TOR,501,1000,PER_100LBS,42.05,275,0,1\n";

pub const SKID_CSV: &str = "Skid_Count,Rate,Fuel_Surcharge,Transit_Days,Max_Weight_Per_Skid\n\
1,185,20,2,1500\n\
2,330,20,2,1500\n";

pub const ZONE_CSV: &str = "Origin_Zone,Destination_Zone,Base_Rate,Fuel_Surcharge,Transit_Days,Max_Weight\n\
ON,ON,95,10,1,1000\n\
ON,ON,210,10,1,\n\
ON,QC,260,10,2,\n";

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("rates-admin"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("Tariff upload"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn files(parts: &[(&str, &str)]) -> BTreeMap<String, String> {
    parts
        .iter()
        .map(|(part, text)| ((*part).to_string(), (*text).to_string()))
        .collect()
}

pub fn terminal_files() -> BTreeMap<String, String> {
    files(&[("terminal_mapping", MAPPING_CSV), ("terminal_rates", RATES_CSV)])
}

pub fn import_request(
    carrier_id: &str,
    format: &str,
    files: BTreeMap<String, String>,
) -> ImportRatesRequest {
    ImportRatesRequest {
        carrier_id: carrier_id.to_string(),
        format: format.to_string(),
        config_name: String::from("2026 Tariff"),
        currency: String::from("cad"),
        files,
    }
}

pub fn import_terminal_rates(persistence: &mut Persistence, carrier_id: &str) -> ImportRatesResponse {
    import_rates(
        persistence,
        import_request(carrier_id, "terminal_weight_based", terminal_files()),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}
