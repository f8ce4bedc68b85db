//! Report handlers
//!
//! Each report covers the calendar month containing `as_of` (today, UTC, when
//! omitted) and only sees the caller's transactions.

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::transactions::parse_date_param;
use crate::{get_user, AppError, AppState};
use fintrack_core::models::{AnomalyReport, CategoryAnalysis, MonthlySummary};
use fintrack_core::ReportEngine;

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Reference date (YYYY-MM-DD)
    pub as_of: Option<String>,
}

impl ReportQuery {
    fn reference_date(&self) -> Result<NaiveDate, AppError> {
        match self.as_of.as_deref() {
            Some(d) => parse_date_param("as_of", d),
            None => Ok(Utc::now().date_naive()),
        }
    }
}

/// GET /api/analytics/monthly-summary
pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
    request: Request,
) -> Result<Json<MonthlySummary>, AppError> {
    let user = get_user(request.headers(), &state.config);
    let as_of = params.reference_date()?;

    let summary = ReportEngine::new(&state.db).monthly_summary(&user, as_of)?;

    state.db.log_audit(
        &user,
        "report",
        Some("monthly_summary"),
        None,
        Some(&format!("as_of={}", as_of)),
    )?;

    Ok(Json(summary))
}

/// GET /api/analytics/category-analysis
pub async fn category_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
    request: Request,
) -> Result<Json<CategoryAnalysis>, AppError> {
    let user = get_user(request.headers(), &state.config);
    let as_of = params.reference_date()?;

    let analysis = ReportEngine::new(&state.db).category_analysis(&user, as_of)?;

    state.db.log_audit(
        &user,
        "report",
        Some("category_analysis"),
        None,
        Some(&format!("as_of={}", as_of)),
    )?;

    Ok(Json(analysis))
}

/// GET /api/analytics/spending-anomalies
pub async fn spending_anomalies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
    request: Request,
) -> Result<Json<AnomalyReport>, AppError> {
    let user = get_user(request.headers(), &state.config);
    let as_of = params.reference_date()?;

    let report = ReportEngine::new(&state.db).spending_anomalies(&user, as_of)?;

    state.db.log_audit(
        &user,
        "report",
        Some("spending_anomalies"),
        None,
        Some(&format!(
            "as_of={}, anomalies={}",
            as_of,
            report.anomalies_detected.len()
        )),
    )?;

    Ok(Json(report))
}
