//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::read_json;
use crate::{get_user, AppError, AppState, SuccessResponse};
use fintrack_core::models::{NewTransaction, Transaction, TransactionOrdering, TransactionQuery};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    /// Start date (YYYY-MM-DD), only applied together with `end_date`
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD), only applied together with `start_date`
    pub end_date: Option<String>,
    /// `date`, `-date`, `amount` or `-amount`
    pub ordering: Option<String>,
}

pub(crate) fn parse_date_param(name: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!(
            "Invalid {}: {} (expected YYYY-MM-DD)",
            name, value
        ))
    })
}

/// GET /api/transactions - List the caller's transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionListParams>,
    request: Request,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let user = get_user(request.headers(), &state.config);

    let query = TransactionQuery {
        start_date: params
            .start_date
            .as_deref()
            .map(|d| parse_date_param("start_date", d))
            .transpose()?,
        end_date: params
            .end_date
            .as_deref()
            .map(|d| parse_date_param("end_date", d))
            .transpose()?,
        ordering: match params.ordering.as_deref() {
            Some(o) => o
                .parse::<TransactionOrdering>()
                .map_err(|e| AppError::bad_request(&e))?,
            None => TransactionOrdering::default(),
        },
    };

    let transactions = state.db.list_transactions(&user, &query)?;

    // Audit log - read access
    state.db.log_audit(
        &user,
        "list",
        Some("transaction"),
        None,
        Some(&format!(
            "count={}, ordering={}",
            transactions.len(),
            query.ordering.as_str()
        )),
    )?;

    Ok(Json(transactions))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = get_user(request.headers(), &state.config);
    let req: NewTransaction = read_json(request).await?;

    let transaction = state.db.create_transaction(&user, &req)?;

    state.db.log_audit(
        &user,
        "create",
        Some("transaction"),
        Some(transaction.id),
        Some(&format!(
            "kind={}, amount={}, date={}",
            transaction.kind, transaction.amount, transaction.date
        )),
    )?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = get_user(request.headers(), &state.config);

    if !state.db.delete_transaction(&user, id)? {
        return Err(AppError::not_found(&format!(
            "Transaction {} not found",
            id
        )));
    }

    state
        .db
        .log_audit(&user, "delete", Some("transaction"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
