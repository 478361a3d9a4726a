//! Tax rate table and invoice total computation.

use crate::models::LineItem;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat multi-levy rate table. Every rate applies to the same subtotal;
/// levies are never compounded on each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub vat_rate: Decimal,
    pub levy_a_rate: Decimal,
    pub levy_b_rate: Decimal,
    /// Decimal places kept for currency amounts.
    pub currency_scale: u32,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            vat_rate: Decimal::new(125, 3),
            levy_a_rate: Decimal::new(25, 3),
            levy_b_rate: Decimal::new(25, 3),
            currency_scale: 2,
        }
    }
}

impl RateTable {
    /// Check every rate is a fraction in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, rate) in [
            ("vat_rate", self.vat_rate),
            ("levy_a_rate", self.levy_a_rate),
            ("levy_b_rate", self.levy_b_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(format!("{} must be between 0 and 1, got {}", name, rate));
            }
        }
        if self.currency_scale > 8 {
            return Err(format!(
                "currency_scale must be at most 8, got {}",
                self.currency_scale
            ));
        }
        Ok(())
    }

    /// Sum of all rates; `total = subtotal * (1 + combined_rate)` up to rounding.
    pub fn combined_rate(&self) -> Decimal {
        self.vat_rate + self.levy_a_rate + self.levy_b_rate
    }

    /// Round to currency precision and pin the scale so amounts always
    /// render with the same number of decimals.
    pub fn to_currency(&self, amount: Decimal) -> Decimal {
        let mut rounded = amount
            .round_dp_with_strategy(self.currency_scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.currency_scale);
        rounded
    }
}

/// Derived invoice amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub levy_a: Decimal,
    pub levy_b: Decimal,
    pub total: Decimal,
}

/// An amount left the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountOverflow {
    /// `quantity x unit_rate` of the line item at this index.
    #[error("line item {0} amount is too large")]
    LineItem(usize),
    /// The subtotal, a tax, or the total.
    #[error("invoice total is too large")]
    Total,
}

impl Totals {
    pub fn compute(line_items: &[LineItem], rates: &RateTable) -> Result<Self, AmountOverflow> {
        let mut sum = Decimal::ZERO;
        for (index, item) in line_items.iter().enumerate() {
            let amount = item.amount().ok_or(AmountOverflow::LineItem(index))?;
            sum = sum.checked_add(amount).ok_or(AmountOverflow::Total)?;
        }

        let subtotal = rates.to_currency(sum);
        let tax = |rate: Decimal| {
            subtotal
                .checked_mul(rate)
                .map(|amount| rates.to_currency(amount))
                .ok_or(AmountOverflow::Total)
        };
        let vat = tax(rates.vat_rate)?;
        let levy_a = tax(rates.levy_a_rate)?;
        let levy_b = tax(rates.levy_b_rate)?;

        let total = subtotal
            .checked_add(vat)
            .and_then(|t| t.checked_add(levy_a))
            .and_then(|t| t.checked_add(levy_b))
            .ok_or(AmountOverflow::Total)?;

        Ok(Self {
            subtotal,
            vat,
            levy_a,
            levy_b,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(quantity: u32, unit_rate: &str) -> LineItem {
        LineItem {
            description: "Work".to_string(),
            quantity,
            unit_rate: dec(unit_rate),
        }
    }

    #[test]
    fn logo_scenario_matches_expected_amounts() {
        let totals = Totals::compute(&[item(2, "500.00")], &RateTable::default()).unwrap();

        assert_eq!(totals.subtotal, dec("1000.00"));
        assert_eq!(totals.vat, dec("125.00"));
        assert_eq!(totals.levy_a, dec("25.00"));
        assert_eq!(totals.levy_b, dec("25.00"));
        assert_eq!(totals.total, dec("1175.00"));
        assert_eq!(totals.total.to_string(), "1175.00");
    }

    #[test]
    fn subtotal_is_exact_sum_of_line_amounts() {
        let items = [item(3, "0.10"), item(1, "0.20"), item(7, "19.99")];
        let totals = Totals::compute(&items, &RateTable::default()).unwrap();

        // 0.30 + 0.20 + 139.93, no binary floating point drift.
        assert_eq!(totals.subtotal, dec("140.43"));
    }

    #[test]
    fn total_tracks_combined_rate_within_currency_precision() {
        let rates = RateTable::default();
        assert_eq!(rates.combined_rate(), dec("0.175"));

        for unit_rate in ["0.01", "1.00", "33.33", "99.99", "1234.56", "0.07"] {
            for quantity in [1, 2, 3, 17] {
                let totals = Totals::compute(&[item(quantity, unit_rate)], &rates).unwrap();
                let exact = totals.subtotal * (Decimal::ONE + rates.combined_rate());
                let drift = (totals.total - exact).abs();
                // Three independently rounded taxes can drift by at most 1.5 cents.
                assert!(
                    drift <= dec("0.015"),
                    "qty {} x {}: total {} vs exact {}",
                    quantity,
                    unit_rate,
                    totals.total,
                    exact
                );
            }
        }
    }

    #[test]
    fn round_subtotals_give_exact_total() {
        let totals = Totals::compute(&[item(4, "250.00")], &RateTable::default()).unwrap();
        assert_eq!(totals.total, totals.subtotal * dec("1.175"));
    }

    #[test]
    fn amounts_render_at_currency_scale() {
        let totals = Totals::compute(&[item(1, "10")], &RateTable::default()).unwrap();
        assert_eq!(totals.subtotal.to_string(), "10.00");
        assert_eq!(totals.vat.to_string(), "1.25");
        assert_eq!(totals.levy_a.to_string(), "0.25");
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        // 0.20 * 0.025 = 0.005
        let totals = Totals::compute(&[item(1, "0.20")], &RateTable::default()).unwrap();
        assert_eq!(totals.levy_a, dec("0.01"));
    }

    #[test]
    fn oversized_line_amount_is_reported_not_panicked() {
        let items = [item(1, "1"), item(3, "70000000000000000000000000000")];
        assert_eq!(
            Totals::compute(&items, &RateTable::default()),
            Err(AmountOverflow::LineItem(1))
        );
    }

    #[test]
    fn oversized_sum_or_total_is_reported() {
        let huge = "50000000000000000000000000000";
        assert_eq!(
            Totals::compute(&[item(1, huge), item(1, huge)], &RateTable::default()),
            Err(AmountOverflow::Total)
        );

        // The subtotal fits but adding the taxes does not.
        let near_max = [item(1, "70000000000000000000000000000")];
        assert_eq!(
            Totals::compute(&near_max, &RateTable::default()),
            Err(AmountOverflow::Total)
        );
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let rates = RateTable {
            vat_rate: dec("-0.1"),
            ..RateTable::default()
        };
        assert!(rates.validate().is_err());

        let rates = RateTable {
            levy_b_rate: dec("1.5"),
            ..RateTable::default()
        };
        assert!(rates.validate().unwrap_err().contains("levy_b_rate"));

        assert!(RateTable::default().validate().is_ok());
    }
}
