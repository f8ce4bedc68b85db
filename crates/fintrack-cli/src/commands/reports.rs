//! Report command implementations

use anyhow::{Context, Result};
use fintrack_core::db::Database;
use fintrack_core::ReportEngine;
use serde::Serialize;

use super::{parse_date, truncate};

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

pub fn cmd_report_summary(
    db: &Database,
    user: &str,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let as_of = parse_date(as_of, "--as-of")?;
    let summary = ReportEngine::new(db).monthly_summary(user, as_of)?;

    if json {
        return print_json(&summary);
    }

    println!();
    println!(
        "📊 Monthly Summary - {:04}-{:02}",
        summary.year, summary.month
    );
    println!(
        "   Day {} of {}",
        summary.days_passed, summary.total_days_in_month
    );
    println!("   ─────────────────────────────────────────────");
    println!("   Income:            ${:>12.2}", summary.total_income);
    println!("   Expense:           ${:>12.2}", summary.total_expense);
    println!("   Net savings:       ${:>12.2}", summary.net_savings);
    println!();
    println!("   Daily burn rate:   ${:>12.2}", summary.daily_burn_rate);
    println!(
        "   Month-end expense: ${:>12.2} (projected)",
        summary.predicted_month_end_expense
    );

    if summary.overspending_risk {
        println!();
        println!("   ⚠️  At this pace spending will exceed income this month");
    }

    Ok(())
}

pub fn cmd_report_categories(
    db: &Database,
    user: &str,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let as_of = parse_date(as_of, "--as-of")?;
    let analysis = ReportEngine::new(db).category_analysis(user, as_of)?;

    if json {
        return print_json(&analysis);
    }

    println!();
    println!(
        "📂 Category Analysis - {:04}-{:02}",
        analysis.year, analysis.month
    );
    println!("   ─────────────────────────────────────────────");

    if analysis.category_breakdown.is_empty() {
        println!("   No expenses recorded this month.");
    } else {
        for item in &analysis.category_breakdown {
            println!(
                "   {:<25} ${:>12.2}",
                truncate(&item.category, 25),
                item.total
            );
        }
    }

    println!("   ─────────────────────────────────────────────");
    println!("   Income:        ${:>12.2}", analysis.total_income);
    println!("   Expense:       ${:>12.2}", analysis.total_expense);
    println!("   Savings ratio: {:>13}", analysis.savings_ratio);
    if let Some(top) = &analysis.top_spending_category {
        println!("   Top category:  {}", top);
    }

    let icon = match analysis.budget_health_score {
        80..=100 => "🟢",
        50..=79 => "🟡",
        _ => "🔴",
    };
    println!(
        "   Budget health: {} {}/100",
        icon, analysis.budget_health_score
    );

    Ok(())
}

pub fn cmd_report_anomalies(
    db: &Database,
    user: &str,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let as_of = parse_date(as_of, "--as-of")?;
    let report = ReportEngine::new(db).spending_anomalies(user, as_of)?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("🚨 Spending Anomalies (vs. previous month)");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.anomalies_detected.is_empty() {
        println!("   ✅ No category grew more than 30% over last month.");
        return Ok(());
    }

    for anomaly in &report.anomalies_detected {
        println!(
            "   {:<20} ${:>10.2} → ${:>10.2}  (+{}%)",
            truncate(&anomaly.category, 20),
            anomaly.previous_month,
            anomaly.current_month,
            anomaly.growth_percentage
        );
    }

    Ok(())
}
