//! Derived stock tests
//!
//! Stock is never stored: every read recomputes the signed sum of note
//! items. These tests pin down the fold the SQL aggregate mirrors.

use proptest::prelude::*;

use shared::models::note::{stock_from_movements, MovementType};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Inbound adds, outbound subtracts
    #[test]
    fn test_signed_fold() {
        let movements = [
            (MovementType::Inbound, 100),
            (MovementType::Outbound, 30),
            (MovementType::Inbound, 5),
        ];
        assert_eq!(stock_from_movements(movements), 75);
    }

    /// A product with no movements has zero stock
    #[test]
    fn test_empty_ledger() {
        assert_eq!(stock_from_movements([]), 0);
    }

    /// Stock may go negative; the ledger records what happened, it does
    /// not refuse outbound notes that overdraw
    #[test]
    fn test_overdrawn_stock() {
        let movements = [
            (MovementType::Inbound, 10),
            (MovementType::Outbound, 25),
        ];
        assert_eq!(stock_from_movements(movements), -15);
    }

    /// Deleting a note is the same as never having recorded it
    #[test]
    fn test_deletion_restores_previous_stock() {
        let before = [(MovementType::Inbound, 40), (MovementType::Outbound, 15)];
        let with_note = [
            (MovementType::Inbound, 40),
            (MovementType::Outbound, 15),
            (MovementType::Outbound, 10),
        ];

        assert_eq!(stock_from_movements(before), 25);
        assert_eq!(stock_from_movements(with_note), 15);
        // removing the last movement recovers the earlier balance
        assert_eq!(
            stock_from_movements(with_note.into_iter().take(2)),
            stock_from_movements(before)
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn movement_strategy() -> impl Strategy<Value = (MovementType, i64)> {
        (
            prop_oneof![Just(MovementType::Inbound), Just(MovementType::Outbound)],
            1i64..=10_000,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock equals total inbound minus total outbound
        #[test]
        fn prop_stock_is_in_minus_out(
            movements in prop::collection::vec(movement_strategy(), 0..50)
        ) {
            let total_in: i64 = movements
                .iter()
                .filter(|(m, _)| *m == MovementType::Inbound)
                .map(|(_, q)| q)
                .sum();
            let total_out: i64 = movements
                .iter()
                .filter(|(m, _)| *m == MovementType::Outbound)
                .map(|(_, q)| q)
                .sum();

            prop_assert_eq!(stock_from_movements(movements), total_in - total_out);
        }

        /// The fold is order-independent
        #[test]
        fn prop_stock_is_order_independent(
            movements in prop::collection::vec(movement_strategy(), 0..50)
        ) {
            let mut reversed = movements.clone();
            reversed.reverse();

            prop_assert_eq!(
                stock_from_movements(movements),
                stock_from_movements(reversed)
            );
        }

        /// Recomputing never changes the answer
        #[test]
        fn prop_stock_is_idempotent(
            movements in prop::collection::vec(movement_strategy(), 0..50)
        ) {
            let first = stock_from_movements(movements.clone());
            let second = stock_from_movements(movements);
            prop_assert_eq!(first, second);
        }
    }
}
