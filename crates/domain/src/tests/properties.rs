// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::fixtures::{RATES_HEADER, SKID_HEADER, mapping_table, row, tables};
use crate::{PricingFormat, RateTables, ValidationReport, validate_rate_tables};
use proptest::prelude::*;

fn rate_row(min: u32, max: u32) -> Vec<String> {
    let min: String = min.to_string();
    let max: String = max.to_string();
    row(&[
        "KIT",
        "TOR",
        min.as_str(),
        max.as_str(),
        "FLAT_RATE",
        "100",
        "0",
        "0",
        "",
    ])
}

fn two_break_tables(first: (u32, u32), second: (u32, u32)) -> RateTables {
    let rates: Vec<Vec<String>> = vec![
        row(RATES_HEADER),
        rate_row(first.0, first.1),
        rate_row(second.0, second.1),
    ];
    tables(vec![("terminal_mapping", mapping_table()), ("terminal_rates", rates)])
}

fn weight_range() -> impl Strategy<Value = (u32, u32)> {
    (0u32..2000, 1u32..1000).prop_map(|(min, len)| (min, min + len))
}

proptest! {
    #[test]
    fn prop_overlap_detection_is_symmetric(a in weight_range(), b in weight_range()) {
        let forward: ValidationReport =
            validate_rate_tables(PricingFormat::TerminalWeightBased, &two_break_tables(a, b));
        let backward: ValidationReport =
            validate_rate_tables(PricingFormat::TerminalWeightBased, &two_break_tables(b, a));

        let overlaps: bool = !(b.1 <= a.0 || b.0 >= a.1);
        let expected: usize = usize::from(overlaps);
        prop_assert_eq!(forward.issues.len(), expected);
        prop_assert_eq!(backward.issues.len(), expected);
    }

    #[test]
    fn prop_contiguous_breaks_are_accepted(start in 0u32..5000, widths in prop::collection::vec(1u32..500, 1..8)) {
        let mut rates: Vec<Vec<String>> = vec![row(RATES_HEADER)];
        let mut min: u32 = start;
        for width in widths {
            rates.push(rate_row(min, min + width));
            min += width;
        }
        let tables: RateTables =
            tables(vec![("terminal_mapping", mapping_table()), ("terminal_rates", rates)]);
        let report: ValidationReport =
            validate_rate_tables(PricingFormat::TerminalWeightBased, &tables);
        prop_assert!(report.is_valid(), "{:?}", report.errors());
    }

    #[test]
    fn prop_validation_is_idempotent(cells in prop::collection::vec(prop::collection::vec(".{0,6}", 6), 0..6)) {
        let mut rows: Vec<Vec<String>> = vec![row(SKID_HEADER)];
        rows.extend(cells);
        let tables: RateTables = tables(vec![("skid_rates", rows)]);
        let first: ValidationReport = validate_rate_tables(PricingFormat::SkidBased, &tables);
        let second: ValidationReport = validate_rate_tables(PricingFormat::SkidBased, &tables);
        prop_assert_eq!(first, second);
    }
}
