//! Change-making over the fixed denomination catalog.
//!
//! Amounts are decomposed greedily, largest denomination first. Whatever is
//! left below the smallest denomination is dropped: the machine has no coin
//! small enough to return it.

use std::fmt;

use crate::Won;

/// Physical form of a denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenominationKind {
    Bill,
    Coin,
}

/// A unit of currency the machine accepts and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Denomination {
    pub value: Won,
    pub kind: DenominationKind,
    pub name: &'static str,
}

/// Denomination catalog, ordered by descending value.
pub static DENOMINATIONS: &[Denomination] = &[
    Denomination {
        value: Won::new(5000),
        kind: DenominationKind::Bill,
        name: "5,000₩ bill",
    },
    Denomination {
        value: Won::new(1000),
        kind: DenominationKind::Bill,
        name: "1,000₩ bill",
    },
    Denomination {
        value: Won::new(500),
        kind: DenominationKind::Coin,
        name: "500₩ coin",
    },
    Denomination {
        value: Won::new(100),
        kind: DenominationKind::Coin,
        name: "100₩ coin",
    },
];

impl Denomination {
    /// Look up a catalog denomination by its face value.
    pub fn from_value(value: Won) -> Option<&'static Denomination> {
        DENOMINATIONS.iter().find(|d| d.value == value)
    }

    /// The smallest denomination in the catalog.
    pub fn smallest() -> &'static Denomination {
        &DENOMINATIONS[DENOMINATIONS.len() - 1]
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One line of a change breakdown: `count` units of `denomination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEntry {
    pub denomination: Denomination,
    pub count: u64,
}

impl ChangeEntry {
    pub fn value(&self) -> Won {
        self.denomination.value * self.count
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count > 1 { "s" } else { "" };
        write!(f, "{} × {}{plural}", self.count, self.denomination.name)
    }
}

/// Ordered decomposition of an amount, in catalog order.
///
/// Each denomination appears at most once and every count is at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBreakdown(Vec<ChangeEntry>);

impl ChangeBreakdown {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A breakdown holding exactly one unit of `denomination`.
    pub fn single(denomination: Denomination) -> Self {
        Self(vec![ChangeEntry {
            denomination,
            count: 1,
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeEntry> + '_ {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ChangeBreakdown {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Human readable form, e.g. `2 × 5,000₩ bills, 3 × 100₩ coins`.
impl fmt::Display for ChangeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("No change");
        }
        for (idx, entry) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Greedily decompose `amount` into catalog denominations.
///
/// Non-positive amounts yield an empty breakdown. A remainder smaller than
/// the smallest denomination is lost.
pub fn decompose(amount: Won) -> ChangeBreakdown {
    if !amount.is_positive() {
        return ChangeBreakdown::empty();
    }

    let mut entries = Vec::new();
    let mut remaining = amount.value().unsigned_abs();

    for denomination in DENOMINATIONS {
        let value = denomination.value.value().unsigned_abs();
        let count = remaining / value;
        if count > 0 {
            entries.push(ChangeEntry {
                denomination: *denomination,
                count,
            });
            remaining -= count * value;
        }
    }

    ChangeBreakdown(entries)
}

/// Sum of `value × count` over the breakdown.
pub fn total_value(breakdown: &ChangeBreakdown) -> Won {
    breakdown.iter().map(ChangeEntry::value).sum()
}

/// Format a breakdown for display. Same as its `Display` impl.
pub fn format(breakdown: &ChangeBreakdown) -> String {
    breakdown.to_string()
}

/// Whether `amount` can be paid back at all with the catalog.
///
/// No coin inventory is tracked, so only amounts the catalog cannot express
/// (negative, or positive but below the smallest denomination) are rejected.
pub fn can_make_change(amount: Won) -> bool {
    amount == Won::ZERO || !decompose(amount).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: i64, count: u64) -> ChangeEntry {
        ChangeEntry {
            denomination: *Denomination::from_value(Won::new(value)).unwrap(),
            count,
        }
    }

    fn breakdown(entries: &[(i64, u64)]) -> ChangeBreakdown {
        ChangeBreakdown(entries.iter().map(|&(v, c)| entry(v, c)).collect())
    }

    #[test]
    fn catalog_is_descending() {
        assert!(DENOMINATIONS.windows(2).all(|w| w[0].value > w[1].value));
        assert_eq!(Denomination::smallest().value, Won::new(100));
    }

    #[test]
    fn from_value_rejects_unknown() {
        assert!(Denomination::from_value(Won::new(50)).is_none());
        assert!(Denomination::from_value(Won::new(10_000)).is_none());
        assert_eq!(
            Denomination::from_value(Won::new(500)).unwrap().kind,
            DenominationKind::Coin
        );
    }

    #[test]
    fn zero_and_negative_are_empty() {
        assert!(decompose(Won::ZERO).is_empty());
        assert!(decompose(Won::new(-100)).is_empty());
    }

    #[test]
    fn single_bill() {
        assert_eq!(decompose(Won::new(5000)), breakdown(&[(5000, 1)]));
    }

    #[test]
    fn single_coin() {
        assert_eq!(decompose(Won::new(100)), breakdown(&[(100, 1)]));
    }

    #[test]
    fn mixed_denominations() {
        assert_eq!(
            decompose(Won::new(1600)),
            breakdown(&[(1000, 1), (500, 1), (100, 1)])
        );
    }

    #[test]
    fn prefers_larger_denominations() {
        assert_eq!(
            decompose(Won::new(6000)),
            breakdown(&[(5000, 1), (1000, 1)])
        );
    }

    #[test]
    fn sub_coin_remainder_is_lost() {
        let change = decompose(Won::new(1357));
        assert_eq!(change, breakdown(&[(1000, 1), (100, 3)]));
        assert_eq!(total_value(&change), Won::new(1300));
    }

    #[test]
    fn huge_amounts_stay_greedy() {
        let bills = u64::from(u32::MAX) + 1;
        let amount = Won::new(5000 * i64::from(u32::MAX) + 5000);
        let change = decompose(amount);
        assert_eq!(change, breakdown(&[(5000, bills)]));
        assert_eq!(total_value(&change), amount);

        let change = decompose(Won::new(i64::MAX));
        assert_eq!(change.entries()[0].count, i64::MAX.unsigned_abs() / 5000);
        assert!(i64::MAX - total_value(&change).value() < 100);
    }

    #[test]
    fn below_smallest_is_empty() {
        assert!(decompose(Won::new(99)).is_empty());
    }

    #[test]
    fn total_of_empty_is_zero() {
        assert_eq!(total_value(&ChangeBreakdown::empty()), Won::ZERO);
    }

    #[test]
    fn total_sums_entries() {
        let change = breakdown(&[(1000, 1), (500, 1), (100, 2)]);
        assert_eq!(total_value(&change), Won::new(1700));
    }

    #[test]
    fn format_empty() {
        assert_eq!(format(&ChangeBreakdown::empty()), "No change");
    }

    #[test]
    fn format_single() {
        assert_eq!(format(&breakdown(&[(1000, 1)])), "1 × 1,000₩ bill");
    }

    #[test]
    fn format_multiple() {
        let change = breakdown(&[(1000, 1), (500, 1), (100, 2)]);
        assert_eq!(
            format(&change),
            "1 × 1,000₩ bill, 1 × 500₩ coin, 2 × 100₩ coins"
        );
    }

    #[test]
    fn format_plurals() {
        let change = breakdown(&[(5000, 2), (100, 3)]);
        assert_eq!(format(&change), "2 × 5,000₩ bills, 3 × 100₩ coins");
    }

    #[test]
    fn single_holds_one_unit() {
        let denomination = *Denomination::from_value(Won::new(1000)).unwrap();
        let change = ChangeBreakdown::single(denomination);
        assert_eq!(change.len(), 1);
        assert_eq!(total_value(&change), Won::new(1000));
    }

    #[test]
    fn can_make_change_cases() {
        assert!(can_make_change(Won::ZERO));
        assert!(can_make_change(Won::new(100)));
        assert!(can_make_change(Won::new(1357)));
        assert!(!can_make_change(Won::new(50)));
        assert!(!can_make_change(Won::new(-100)));
    }
}
