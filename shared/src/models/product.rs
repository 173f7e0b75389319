//! Product catalog models and product-code generation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a product enters the catalog.
///
/// The mode also selects the prefix of generated product codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    Manufactured,
    Purchased,
}

impl AcquisitionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionMode::Manufactured => "manufactured",
            AcquisitionMode::Purchased => "purchased",
        }
    }

    /// Prefix of every generated code in this mode.
    pub fn code_prefix(&self) -> &'static str {
        match self {
            AcquisitionMode::Manufactured => "F1",
            AcquisitionMode::Purchased => "M1",
        }
    }

    /// Case-insensitive parse of the canonical mode names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "manufactured" => Some(AcquisitionMode::Manufactured),
            "purchased" => Some(AcquisitionMode::Purchased),
            _ => None,
        }
    }
}

/// Fixed unit-of-measure vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Und,
    Caja,
    Paquete,
    Par,
    Docena,
    Kg,
    #[serde(rename = "g")]
    G,
    Ton,
    L,
    #[serde(rename = "mL")]
    Ml,
    Gal,
    #[serde(rename = "m")]
    M,
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "mm")]
    Mm,
    Rollo,
    Pliego,
    Set,
    Kit,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Und => "Und",
            Unit::Caja => "Caja",
            Unit::Paquete => "Paquete",
            Unit::Par => "Par",
            Unit::Docena => "Docena",
            Unit::Kg => "Kg",
            Unit::G => "g",
            Unit::Ton => "Ton",
            Unit::L => "L",
            Unit::Ml => "mL",
            Unit::Gal => "Gal",
            Unit::M => "m",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Rollo => "Rollo",
            Unit::Pliego => "Pliego",
            Unit::Set => "Set",
            Unit::Kit => "Kit",
        }
    }

    /// Case-insensitive parse against the vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [
            Unit::Und,
            Unit::Caja,
            Unit::Paquete,
            Unit::Par,
            Unit::Docena,
            Unit::Kg,
            Unit::G,
            Unit::Ton,
            Unit::L,
            Unit::Ml,
            Unit::Gal,
            Unit::M,
            Unit::Cm,
            Unit::Mm,
            Unit::Rollo,
            Unit::Pliego,
            Unit::Set,
            Unit::Kit,
        ]
        .into_iter()
        .find(|u| u.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Input for creating a product.
///
/// The code is always generated server-side; it is never accepted here.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub unit: Option<String>,
    pub acquisition_mode: String,
    pub price: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub supplier_id: i64,
}

/// Input for editing a product. Every field is required; the code may be
/// changed but stays subject to the uniqueness check.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductInput {
    pub name: String,
    pub code: String,
    pub unit: String,
    pub acquisition_mode: String,
    pub price: Decimal,
    pub weight: Decimal,
    pub supplier_id: i64,
}

// ============================================================================
// Code generation
// ============================================================================

/// First three characters of the uppercased name, right-padded with `X`
/// to exactly three. An empty name yields `XXX`.
pub fn name_abbreviation(name: &str) -> String {
    let mut abbrev: String = name.to_uppercase().chars().take(3).collect();
    while abbrev.chars().count() < 3 {
        abbrev.push('X');
    }
    abbrev
}

/// `prefix + abbreviation`: the stem shared by every code in a series.
pub fn code_stem(mode: AcquisitionMode, name: &str) -> String {
    format!("{}{}", mode.code_prefix(), name_abbreviation(name))
}

/// Appends the zero-padded sequence number to the stem, e.g. `F1TOR003`.
pub fn format_product_code(stem: &str, sequence: i64) -> String {
    format!("{}{:03}", stem, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_uppercases_and_truncates() {
        assert_eq!(name_abbreviation("Tornillo"), "TOR");
        assert_eq!(name_abbreviation("tuerca"), "TUE");
    }

    #[test]
    fn abbreviation_pads_short_names() {
        assert_eq!(name_abbreviation("ab"), "ABX");
        assert_eq!(name_abbreviation(""), "XXX");
    }

    #[test]
    fn abbreviation_counts_characters_not_bytes() {
        assert_eq!(name_abbreviation("ñandú"), "ÑAN");
    }

    #[test]
    fn stem_uses_mode_prefix() {
        assert_eq!(code_stem(AcquisitionMode::Manufactured, "Tornillo"), "F1TOR");
        assert_eq!(code_stem(AcquisitionMode::Purchased, "Tornillo"), "M1TOR");
    }

    #[test]
    fn unit_parse_round_trips() {
        assert_eq!(Unit::parse("mL"), Some(Unit::Ml));
        assert_eq!(Unit::parse("KG"), Some(Unit::Kg));
        assert_eq!(Unit::parse("furlong"), None);
    }
}
