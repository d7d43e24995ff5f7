//! Property-based tests for the change engine.

use proptest::prelude::*;
use vend_eng::Won;
use vend_eng::change::{DENOMINATIONS, Denomination, decompose, format, total_value};

proptest! {
    #[test]
    fn non_positive_amounts_give_no_change(amount in -1_000_000i64..=0) {
        let change = decompose(Won::new(amount));
        prop_assert!(change.is_empty());
        prop_assert_eq!(format(&change), "No change");
    }

    #[test]
    fn loss_is_below_smallest_denomination(amount in 1i64..=i64::MAX) {
        let total = total_value(&decompose(Won::new(amount)));
        prop_assert!(total <= Won::new(amount));
        prop_assert!((Won::new(amount) - total) < Denomination::smallest().value);
    }

    #[test]
    fn entries_follow_catalog_order(amount in 1i64..=i64::MAX) {
        let change = decompose(Won::new(amount));
        let positions: Vec<_> = change
            .iter()
            .map(|e| DENOMINATIONS.iter().position(|d| *d == e.denomination).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(change.iter().all(|e| e.count >= 1));
    }

    #[test]
    fn smaller_denominations_never_add_up_to_a_larger_one(amount in 1i64..=i64::MAX) {
        // greedy: the value held in denominations below each entry is less than that entry
        let change = decompose(Won::new(amount));
        for (idx, entry) in change.iter().enumerate() {
            let rest: Won = change.entries()[idx + 1..].iter().map(|e| e.value()).sum();
            prop_assert!(rest < entry.denomination.value);
        }
    }

    #[test]
    fn decompose_is_deterministic(amount in any::<i32>()) {
        let amount = Won::new(i64::from(amount));
        prop_assert_eq!(decompose(amount), decompose(amount));
    }
}

#[test]
fn six_thousand_prefers_bills() {
    assert_eq!(format(&decompose(Won::new(6000))), "1 × 5,000₩ bill, 1 × 1,000₩ bill");
}
