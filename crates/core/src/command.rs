// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ratebook_domain::{PricingFormat, RateTables};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to change a carrier's rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the carrier's rate configuration with freshly uploaded tables.
    ImportRates {
        /// The pricing format the tables follow.
        format: PricingFormat,
        /// Display name for the configuration.
        config_name: String,
        /// ISO 4217 currency code.
        currency: String,
        /// Raw tables keyed by template part.
        tables: RateTables,
    },
    /// Drop the carrier's rate configuration and return it to manual rating.
    RemoveRates,
}
