//! Budget Calculator - line and aggregate cost derivation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;
use crate::domain::project::ServiceItem;

/// Costs of a single service line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineTotals {
    pub material_total: Money,
    pub labor_total: Money,
    pub line_total: Money,
}

/// Costs summed over a service list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetAggregate {
    pub total_material: Money,
    pub total_labor: Money,
    pub total_general: Money,
}

/// Budget calculation functions.
///
/// Accumulation keeps full floating precision; callers round when
/// presenting.
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// Computes material, labor and line totals for one item.
    pub fn line_totals(item: &ServiceItem) -> LineTotals {
        let material_total = item.material_unit_price * item.quantity;
        let labor_total = item.labor_unit_price * item.quantity;
        LineTotals {
            material_total,
            labor_total,
            line_total: material_total + labor_total,
        }
    }

    /// Sums line totals over a list.
    ///
    /// # Edge Cases
    /// - Empty list: all-zero aggregate
    pub fn aggregate(items: &[ServiceItem]) -> BudgetAggregate {
        let mut total_material = Money::ZERO;
        let mut total_labor = Money::ZERO;
        for item in items {
            let line = Self::line_totals(item);
            total_material += line.material_total;
            total_labor += line.labor_total;
        }
        BudgetAggregate {
            total_material,
            total_labor,
            total_general: total_material + total_labor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(quantity: f64, material: f64, labor: f64) -> ServiceItem {
        ServiceItem::new("18.06.142", "Piso", "m²", quantity).with_prices(material, labor)
    }

    #[test]
    fn line_totals_multiply_by_quantity() {
        let totals = BudgetCalculator::line_totals(&item(10.0, 51.0, 34.0));
        assert_eq!(totals.material_total.value(), 510.0);
        assert_eq!(totals.labor_total.value(), 340.0);
        assert_eq!(totals.line_total.value(), 850.0);
    }

    #[test]
    fn empty_list_yields_zero_aggregate() {
        assert_eq!(BudgetCalculator::aggregate(&[]), BudgetAggregate::default());
    }

    #[test]
    fn aggregate_sums_lines() {
        let agg = BudgetCalculator::aggregate(&[item(10.0, 51.0, 34.0), item(2.0, 10.0, 5.0)]);
        assert_eq!(agg.total_material.value(), 530.0);
        assert_eq!(agg.total_labor.value(), 350.0);
        assert_eq!(agg.total_general.value(), 880.0);
    }

    fn line_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
        (0.01f64..10_000.0, 0.0f64..5_000.0, 0.0f64..5_000.0)
    }

    proptest! {
        /// Property: general total is material plus labor.
        #[test]
        fn prop_general_is_material_plus_labor(lines in prop::collection::vec(line_strategy(), 0..40)) {
            let items: Vec<_> = lines.iter().map(|(q, m, l)| item(*q, *m, *l)).collect();
            let agg = BudgetCalculator::aggregate(&items);
            prop_assert_eq!(
                agg.total_general.value(),
                agg.total_material.value() + agg.total_labor.value()
            );
        }

        /// Property: totals equal the per-item sums of unit price × quantity.
        #[test]
        fn prop_totals_match_unit_price_sums(lines in prop::collection::vec(line_strategy(), 0..40)) {
            let items: Vec<_> = lines.iter().map(|(q, m, l)| item(*q, *m, *l)).collect();
            let agg = BudgetCalculator::aggregate(&items);

            let material: f64 = lines.iter().map(|(q, m, _)| m * q).sum();
            let labor: f64 = lines.iter().map(|(q, _, l)| l * q).sum();

            prop_assert!((agg.total_material.value() - material).abs() <= 1e-9 * material.max(1.0));
            prop_assert!((agg.total_labor.value() - labor).abs() <= 1e-9 * labor.max(1.0));
        }
    }
}
