//! Month-over-month spending spike detection

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{CategoryTotal, SpendingAnomaly};

use super::round2;

/// Growth above which a category is flagged (strictly greater, 30%)
pub const SPIKE_THRESHOLD: Decimal = dec!(0.30);

/// Compare current-month category totals against the previous month
///
/// Only categories with positive prior spend can be flagged, so brand-new
/// categories never are. Categories that disappeared this month are ignored.
/// Output follows the order of `current`.
pub fn detect_spikes(
    current: &[CategoryTotal],
    previous: &[CategoryTotal],
) -> Vec<SpendingAnomaly> {
    let previous_totals: HashMap<&str, Decimal> = previous
        .iter()
        .map(|t| (t.category.as_str(), t.total))
        .collect();

    current
        .iter()
        .filter_map(|item| {
            let previous_total = previous_totals
                .get(item.category.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);

            if previous_total <= Decimal::ZERO {
                return None;
            }

            let growth = (item.total - previous_total) / previous_total;
            if growth <= SPIKE_THRESHOLD {
                return None;
            }

            Some(SpendingAnomaly {
                category: item.category.clone(),
                previous_month: previous_total,
                current_month: item.total,
                growth_percentage: round2(growth * Decimal::ONE_HUNDRED),
            })
        })
        .collect()
}
