//! Product code generation tests
//!
//! Tests for the generated code format:
//! - prefix selected by acquisition mode (F1 manufactured, M1 purchased)
//! - three-character uppercased name abbreviation, padded with X
//! - zero-padded sequence number appended to the stem

use proptest::prelude::*;

use shared::models::product::{
    code_stem, format_product_code, name_abbreviation, AcquisitionMode, Unit,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// First code in a fresh series
    #[test]
    fn test_first_code_in_series() {
        let stem = code_stem(AcquisitionMode::Purchased, "Tornillo");
        assert_eq!(format_product_code(&stem, 1), "M1TOR001");
    }

    /// Third code when two products already share the stem
    #[test]
    fn test_code_continues_series() {
        let stem = code_stem(AcquisitionMode::Manufactured, "Tornillo");
        // two existing codes in the series, so the next sequence is 3
        assert_eq!(format_product_code(&stem, 2 + 1), "F1TOR003");
    }

    /// Short and empty names are padded with X
    #[test]
    fn test_short_names_padded() {
        assert_eq!(code_stem(AcquisitionMode::Purchased, "ab"), "M1ABX");
        assert_eq!(
            format_product_code(&code_stem(AcquisitionMode::Purchased, ""), 1),
            "M1XXX001"
        );
    }

    /// Abbreviation works on characters, not bytes
    #[test]
    fn test_multibyte_names() {
        assert_eq!(name_abbreviation("ñandú"), "ÑAN");
    }

    /// Sequence numbers past 999 widen instead of wrapping
    #[test]
    fn test_large_sequence_numbers() {
        assert_eq!(format_product_code("F1TOR", 1000), "F1TOR1000");
    }

    /// Mode prefixes are fixed
    #[test]
    fn test_mode_prefixes() {
        assert_eq!(AcquisitionMode::Manufactured.code_prefix(), "F1");
        assert_eq!(AcquisitionMode::Purchased.code_prefix(), "M1");
    }

    /// Mode parsing is case-insensitive and rejects unknown values
    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            AcquisitionMode::parse("Manufactured"),
            Some(AcquisitionMode::Manufactured)
        );
        assert_eq!(
            AcquisitionMode::parse(" purchased "),
            Some(AcquisitionMode::Purchased)
        );
        assert_eq!(AcquisitionMode::parse("stolen"), None);
    }

    /// The default unit is Und
    #[test]
    fn test_default_unit() {
        assert_eq!(Unit::default(), Unit::Und);
        assert_eq!(Unit::default().as_str(), "Und");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn mode_strategy() -> impl Strategy<Value = AcquisitionMode> {
        prop_oneof![
            Just(AcquisitionMode::Manufactured),
            Just(AcquisitionMode::Purchased),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The abbreviation is always exactly three characters
        #[test]
        fn prop_abbreviation_is_three_chars(name in ".{0,40}") {
            let abbrev = name_abbreviation(&name);
            prop_assert_eq!(abbrev.chars().count(), 3);
        }

        /// Codes always start with the mode prefix followed by the abbreviation
        #[test]
        fn prop_code_starts_with_stem(
            mode in mode_strategy(),
            name in "[a-zA-Z]{1,20}",
            sequence in 1i64..=999,
        ) {
            let stem = code_stem(mode, &name);
            let code = format_product_code(&stem, sequence);

            prop_assert!(code.starts_with(mode.code_prefix()));
            prop_assert!(code.starts_with(&stem));
            // stem is ASCII here, so the suffix is the last three bytes
            prop_assert_eq!(code.len(), stem.len() + 3);
        }

        /// The numeric suffix round-trips for the padded range
        #[test]
        fn prop_sequence_round_trips(sequence in 1i64..=999) {
            let code = format_product_code("F1TOR", sequence);
            let suffix: i64 = code["F1TOR".len()..].parse().unwrap();
            prop_assert_eq!(suffix, sequence);
        }
    }
}
