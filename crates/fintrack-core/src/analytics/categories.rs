//! Category breakdown and budget health score

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{CategoryAnalysis, CategoryTotal};
use crate::period::Period;

use super::round2;

const STARTING_SCORE: i32 = 100;

const LOW_SAVINGS_RATIO: Decimal = dec!(0.20);
const LOW_SAVINGS_PENALTY: i32 = 30;

const MODEST_SAVINGS_RATIO: Decimal = dec!(0.30);
const MODEST_SAVINGS_PENALTY: i32 = 15;

/// Share of total expense above which one category "dominates"
const DOMINANCE_RATIO: Decimal = dec!(0.50);
const DOMINANCE_PENALTY: i32 = 20;

/// Expense-to-income ratio above which spending "nearly equals" income
const EXPENSE_RATIO: Decimal = dec!(0.90);
const EXPENSE_RATIO_PENALTY: i32 = 20;

/// Fraction of income retained; zero when there is no positive income
pub fn savings_ratio(total_income: Decimal, total_expense: Decimal) -> Decimal {
    if total_income > Decimal::ZERO {
        (total_income - total_expense) / total_income
    } else {
        Decimal::ZERO
    }
}

/// Heuristic 0-100 score
///
/// Deductions are independent and subtract from the same base:
/// low savings (tiered), one category above half of all expense, and expense
/// above 90% of income. `top_category_total` is the largest category sum, if
/// any expense exists.
pub fn health_score(
    savings_ratio: Decimal,
    total_income: Decimal,
    total_expense: Decimal,
    top_category_total: Option<Decimal>,
) -> u8 {
    let mut score = STARTING_SCORE;

    if savings_ratio < LOW_SAVINGS_RATIO {
        score -= LOW_SAVINGS_PENALTY;
    } else if savings_ratio < MODEST_SAVINGS_RATIO {
        score -= MODEST_SAVINGS_PENALTY;
    }

    if let Some(top) = top_category_total {
        if total_expense > Decimal::ZERO && top / total_expense > DOMINANCE_RATIO {
            score -= DOMINANCE_PENALTY;
        }
    }

    if total_income > Decimal::ZERO && total_expense / total_income > EXPENSE_RATIO {
        score -= EXPENSE_RATIO_PENALTY;
    }

    score.clamp(0, STARTING_SCORE) as u8
}

/// Build the analysis from monthly totals and the expense breakdown
///
/// `breakdown` must already be ordered by total descending; its first entry is
/// the top spending category.
pub fn analyze_categories(
    period: Period,
    total_income: Decimal,
    total_expense: Decimal,
    breakdown: Vec<CategoryTotal>,
) -> CategoryAnalysis {
    let ratio = savings_ratio(total_income, total_expense);
    let top = breakdown.first();
    let score = health_score(ratio, total_income, total_expense, top.map(|t| t.total));

    CategoryAnalysis {
        month: period.month(),
        year: period.year(),
        total_income,
        total_expense,
        savings_ratio: round2(ratio),
        top_spending_category: top.map(|t| t.category.clone()),
        budget_health_score: score,
        category_breakdown: breakdown,
    }
}
