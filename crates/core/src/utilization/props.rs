//! Property-based tests for utilization arithmetic and classification.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::UtilizationCategory;
use super::{display_width, utilization_percent};

/// Strategy for non-negative decimal amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// The percentage is defined for every pair of amounts, including a
    /// zero budget, and a zero budget always yields zero.
    #[test]
    fn prop_percent_total(utilized in arb_amount(), budgeted in arb_amount()) {
        let percent = utilization_percent(utilized, budgeted);
        if budgeted.is_zero() {
            prop_assert_eq!(percent, Decimal::ZERO);
        } else {
            prop_assert!(percent >= Decimal::ZERO);
        }
    }

    /// Classification is total: every percentage falls in exactly one
    /// bucket, and bucket membership agrees with the boundary rules.
    #[test]
    fn prop_classification_partitions(utilized in arb_amount(), budgeted in arb_amount()) {
        let percent = utilization_percent(utilized, budgeted);
        let category = UtilizationCategory::classify(percent);

        let fifty = Decimal::new(50, 0);
        let eighty = Decimal::new(80, 0);
        let expected = if percent < fifty {
            UtilizationCategory::UnderUtilized
        } else if percent < eighty {
            UtilizationCategory::Moderate
        } else if percent <= Decimal::ONE_HUNDRED {
            UtilizationCategory::WellUtilized
        } else {
            UtilizationCategory::OverUtilized
        };
        prop_assert_eq!(category, expected);
    }

    /// Utilization at or below budget never classifies as over-utilized.
    #[test]
    fn prop_within_budget_never_over(budgeted in arb_amount(), utilized in arb_amount()) {
        prop_assume!(!budgeted.is_zero());
        prop_assume!(utilized <= budgeted);

        let percent = utilization_percent(utilized, budgeted);
        prop_assert_ne!(
            UtilizationCategory::classify(percent),
            UtilizationCategory::OverUtilized
        );
    }

    /// The display width is always within [0, 100] and only differs from
    /// the raw value when the raw value lies outside that band.
    #[test]
    fn prop_display_width_clamps(utilized in arb_amount(), budgeted in arb_amount()) {
        let percent = utilization_percent(utilized, budgeted);
        let width = display_width(percent);
        prop_assert!(width >= Decimal::ZERO);
        prop_assert!(width <= Decimal::ONE_HUNDRED);
        if percent <= Decimal::ONE_HUNDRED {
            prop_assert_eq!(width, percent);
        }
    }
}
