// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ImportMetadata, RateTables};

pub const MAPPING_HEADER: &[&str] = &[
    "City",
    "Province",
    "Terminal_Code",
    "Terminal_Name",
    "Service_Area",
];

pub const RATES_HEADER: &[&str] = &[
    "Origin_Terminal",
    "Destination_Terminal",
    "Weight_Min",
    "Weight_Max",
    "Rate_Type",
    "Rate_Value",
    "Min_Charge",
    "Fuel_Surcharge",
    "Transit_Days",
];

pub const SKID_HEADER: &[&str] = &[
    "Skid_Count",
    "Rate",
    "Fuel_Surcharge",
    "Transit_Days",
    "Max_Weight_Per_Skid",
    "Notes",
];

pub const ZONE_HEADER: &[&str] = &[
    "Origin_Zone",
    "Destination_Zone",
    "Base_Rate",
    "Fuel_Surcharge",
    "Transit_Days",
    "Max_Weight",
];

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

pub fn table(header: &[&str], rows: &[&[&str]]) -> Vec<Vec<String>> {
    std::iter::once(row(header))
        .chain(rows.iter().map(|r| row(r)))
        .collect()
}

pub fn mapping_table() -> Vec<Vec<String>> {
    table(
        MAPPING_HEADER,
        &[
            &["Kitchener", "ON", "KIT", "Kitchener Terminal", "Waterloo Region"],
            &["Toronto", "ON", "TOR", "Toronto Terminal", "GTA"],
            &["Montreal", "QC", "MTL", "Montreal Terminal", ""],
        ],
    )
}

pub fn rates_table() -> Vec<Vec<String>> {
    table(
        RATES_HEADER,
        &[
            &["KIT", "TOR", "0", "500", "PER_100LBS", "78.11", "125", "0", "1"],
            &["KIT", "TOR", "501", "1000", "PER_100LBS", "42.05", "275", "0", "1"],
        ],
    )
}

pub fn skid_table() -> Vec<Vec<String>> {
    table(
        SKID_HEADER,
        &[
            &["1", "185", "20", "2", "1500", ""],
            &["2", "330", "20", "2", "1500", ""],
            &["4", "590", "20", "", "", "Call ahead"],
            &["5", "700", "20", "3", "", ""],
        ],
    )
}

pub fn zone_table() -> Vec<Vec<String>> {
    table(
        ZONE_HEADER,
        &[
            &["ON", "ON", "95", "10", "1", "1000"],
            &["ON", "ON", "210", "10", "1", ""],
            &["ON", "QC", "260", "10", "2", ""],
        ],
    )
}

pub fn tables(parts: Vec<(&str, Vec<Vec<String>>)>) -> RateTables {
    parts
        .into_iter()
        .map(|(key, rows)| (key.to_string(), rows))
        .collect()
}

pub fn terminal_tables() -> RateTables {
    tables(vec![
        ("terminal_mapping", mapping_table()),
        ("terminal_rates", rates_table()),
    ])
}

pub fn hybrid_tables() -> RateTables {
    tables(vec![
        ("terminal_mapping", mapping_table()),
        ("terminal_rates", rates_table()),
        ("zone_matrix", zone_table()),
    ])
}

pub fn metadata() -> ImportMetadata {
    ImportMetadata::new(
        String::from("CARRIER-1"),
        String::from("2026 Tariff"),
        String::from("cad"),
        String::from("rates-admin"),
    )
}
