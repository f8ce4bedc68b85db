//! Monthly income/expense summary with burn-rate projection

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::MonthlySummary;
use crate::period::Period;

use super::round2;

/// Build the summary for the month containing `as_of`
///
/// The burn rate is the average expense per elapsed day (the day-of-month of
/// `as_of`), projected over the full calendar month. Overspending risk compares
/// the unrounded projection with income; only the displayed values are rounded.
pub fn summarize_month(
    as_of: NaiveDate,
    total_income: Decimal,
    total_expense: Decimal,
) -> MonthlySummary {
    let period = Period::containing(as_of);
    let days_passed = as_of.day();
    let total_days = period.days_in_month();

    let daily_burn_rate = if days_passed > 0 {
        total_expense / Decimal::from(days_passed)
    } else {
        Decimal::ZERO
    };
    let predicted = daily_burn_rate * Decimal::from(total_days);

    MonthlySummary {
        month: period.month(),
        year: period.year(),
        total_income,
        total_expense,
        net_savings: total_income - total_expense,
        days_passed,
        total_days_in_month: total_days,
        daily_burn_rate: round2(daily_burn_rate),
        predicted_month_end_expense: round2(predicted),
        overspending_risk: predicted > total_income,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use rust_decimal_macros::dec;

    #[test]
    fn test_burn_rate_projection() {
        let summary = summarize_month(date(2024, 6, 10), dec!(1000), dec!(300));

        assert_eq!(summary.days_passed, 10);
        assert_eq!(summary.total_days_in_month, 30);
        assert_eq!(summary.daily_burn_rate, dec!(30.00));
        assert_eq!(summary.predicted_month_end_expense, dec!(900.00));
        assert_eq!(summary.net_savings, dec!(700));
        assert!(!summary.overspending_risk);
    }

    #[test]
    fn test_empty_month_is_all_zero() {
        let summary = summarize_month(date(2024, 6, 1), Decimal::ZERO, Decimal::ZERO);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.net_savings, Decimal::ZERO);
        assert_eq!(summary.daily_burn_rate, Decimal::ZERO);
        assert_eq!(summary.predicted_month_end_expense, Decimal::ZERO);
        // 0 > 0 is false
        assert!(!summary.overspending_risk);
    }

    #[test]
    fn test_first_of_month_counts_one_day() {
        let summary = summarize_month(date(2024, 1, 1), Decimal::ZERO, dec!(50));

        assert_eq!(summary.days_passed, 1);
        assert_eq!(summary.daily_burn_rate, dec!(50));
        assert_eq!(summary.predicted_month_end_expense, dec!(1550));
        assert!(summary.overspending_risk);
    }

    #[test]
    fn test_leap_february_projection() {
        let summary = summarize_month(date(2024, 2, 29), dec!(5000), dec!(290));

        assert_eq!(summary.total_days_in_month, 29);
        assert_eq!(summary.daily_burn_rate, dec!(10));
        assert_eq!(summary.predicted_month_end_expense, dec!(290));
    }

    #[test]
    fn test_display_values_rounded_but_risk_uses_full_precision() {
        // 100 / 3 = 33.333.. per day, projected over 31 days = 1033.33..
        let summary = summarize_month(date(2024, 1, 3), dec!(1033.33), dec!(100));

        assert_eq!(summary.daily_burn_rate, dec!(33.33));
        assert_eq!(summary.predicted_month_end_expense, dec!(1033.33));
        // The unrounded projection is slightly above income
        assert!(summary.overspending_risk);
    }

    #[test]
    fn test_net_savings_is_exact_and_may_be_negative() {
        let summary = summarize_month(date(2024, 5, 20), dec!(0.10), dec!(0.30));
        assert_eq!(summary.net_savings, dec!(-0.20));
    }
}
