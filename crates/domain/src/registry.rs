// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static registry of supported pricing formats and their template parts.

use crate::error::DomainError;
use crate::types::{PricingFormat, TemplatePartKind};
use serde::{Deserialize, Serialize};

/// How much work a carrier's rate sheet takes to set up in a given format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// The expected shape of one CSV file within a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplatePart {
    pub kind: TemplatePartKind,
    /// Column headers in template order.
    pub headers: &'static [&'static str],
    /// Columns that may be left out of an upload entirely.
    pub optional_headers: &'static [&'static str],
    /// Whether an import of this format must include the part.
    pub required: bool,
}

impl TemplatePart {
    /// Whether the named column must be present in the header row.
    #[must_use]
    pub fn is_required_column(&self, header: &str) -> bool {
        !self.optional_headers.contains(&header)
    }
}

/// Human-readable metadata and template parts for one pricing format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub format: PricingFormat,
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: Complexity,
    pub parts: &'static [TemplatePart],
}

impl FormatDescriptor {
    /// Returns the part of the given kind, if this format uses it.
    #[must_use]
    pub fn part(&self, kind: TemplatePartKind) -> Option<&'static TemplatePart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Looks up a part by its key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTemplatePart` if the key does not name a
    /// part of this format.
    pub fn part_by_key(&self, key: &str) -> Result<&'static TemplatePart, DomainError> {
        TemplatePartKind::from_key(key)
            .and_then(|kind| self.part(kind))
            .ok_or_else(|| DomainError::UnknownTemplatePart {
                format: self.format,
                part: key.to_string(),
            })
    }
}

const TERMINAL_MAPPING_PART: TemplatePart = TemplatePart {
    kind: TemplatePartKind::TerminalMapping,
    headers: &[
        "City",
        "Province",
        "Terminal_Code",
        "Terminal_Name",
        "Service_Area",
    ],
    optional_headers: &["Service_Area"],
    required: true,
};

const TERMINAL_RATES_PART: TemplatePart = TemplatePart {
    kind: TemplatePartKind::TerminalRates,
    headers: &[
        "Origin_Terminal",
        "Destination_Terminal",
        "Weight_Min",
        "Weight_Max",
        "Rate_Type",
        "Rate_Value",
        "Min_Charge",
        "Fuel_Surcharge",
        "Transit_Days",
    ],
    optional_headers: &["Transit_Days"],
    required: true,
};

const SKID_RATES_PART: TemplatePart = TemplatePart {
    kind: TemplatePartKind::SkidRates,
    headers: &[
        "Skid_Count",
        "Rate",
        "Fuel_Surcharge",
        "Transit_Days",
        "Max_Weight_Per_Skid",
        "Notes",
    ],
    optional_headers: &["Transit_Days", "Max_Weight_Per_Skid", "Notes"],
    required: true,
};

const ZONE_MATRIX_PART: TemplatePart = TemplatePart {
    kind: TemplatePartKind::ZoneMatrix,
    headers: &[
        "Origin_Zone",
        "Destination_Zone",
        "Base_Rate",
        "Fuel_Surcharge",
        "Transit_Days",
        "Max_Weight",
    ],
    optional_headers: &["Transit_Days", "Max_Weight"],
    required: true,
};

const TERMINAL_WEIGHT_BASED: FormatDescriptor = FormatDescriptor {
    format: PricingFormat::TerminalWeightBased,
    name: "Terminal + Weight Based",
    description: "Cities map to carrier terminals; each terminal pair publishes weight breaks priced per 100 lbs, per lb, or flat.",
    complexity: Complexity::Moderate,
    parts: &[TERMINAL_MAPPING_PART, TERMINAL_RATES_PART],
};

const SKID_BASED: FormatDescriptor = FormatDescriptor {
    format: PricingFormat::SkidBased,
    name: "Skid Based",
    description: "One price per number of skids (1 to 26), independent of origin and destination.",
    complexity: Complexity::Simple,
    parts: &[SKID_RATES_PART],
};

const ZONE_MATRIX: FormatDescriptor = FormatDescriptor {
    format: PricingFormat::ZoneMatrix,
    name: "Zone Matrix",
    description: "Origin zone to destination zone base rates, optionally tiered by maximum weight.",
    complexity: Complexity::Simple,
    parts: &[ZONE_MATRIX_PART],
};

const HYBRID_TERMINAL_ZONE: FormatDescriptor = FormatDescriptor {
    format: PricingFormat::HybridTerminalZone,
    name: "Hybrid Terminal + Zone",
    description: "Terminal weight breaks where the carrier has terminals, with a zone matrix covering everything else.",
    complexity: Complexity::Complex,
    parts: &[TERMINAL_MAPPING_PART, TERMINAL_RATES_PART, ZONE_MATRIX_PART],
};

static DESCRIPTORS: [FormatDescriptor; 4] = [
    TERMINAL_WEIGHT_BASED,
    SKID_BASED,
    ZONE_MATRIX,
    HYBRID_TERMINAL_ZONE,
];

impl PricingFormat {
    /// Returns the static descriptor for this format.
    #[must_use]
    pub fn descriptor(&self) -> &'static FormatDescriptor {
        match self {
            Self::TerminalWeightBased => &DESCRIPTORS[0],
            Self::SkidBased => &DESCRIPTORS[1],
            Self::ZoneMatrix => &DESCRIPTORS[2],
            Self::HybridTerminalZone => &DESCRIPTORS[3],
        }
    }
}

/// Looks up a format descriptor by registry key.
///
/// # Errors
///
/// Returns `DomainError::UnknownFormat` if the key is not registered.
pub fn get_format_descriptor(key: &str) -> Result<&'static FormatDescriptor, DomainError> {
    let format: PricingFormat = key.parse()?;
    Ok(format.descriptor())
}

/// Returns every registered format descriptor, in registry order.
#[must_use]
pub fn all_format_descriptors() -> &'static [FormatDescriptor] {
    &DESCRIPTORS
}
