//! Category handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};

use super::read_json;
use crate::{get_user, AppError, AppState, SuccessResponse};
use fintrack_core::models::{Category, NewCategory};

/// GET /api/categories - List the caller's categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Category>>, AppError> {
    let user = get_user(request.headers(), &state.config);

    let categories = state.db.list_categories(&user)?;

    // Audit log - read access
    state.db.log_audit(
        &user,
        "list",
        Some("category"),
        None,
        Some(&format!("count={}", categories.len())),
    )?;

    Ok(Json(categories))
}

/// POST /api/categories - Create a category
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let user = get_user(request.headers(), &state.config);
    let req: NewCategory = read_json(request).await?;

    let category = state.db.create_category(&user, &req)?;

    state.db.log_audit(
        &user,
        "create",
        Some("category"),
        Some(category.id),
        Some(&format!("name={}, kind={}", category.name, category.kind)),
    )?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/:id - Delete a category and its transactions
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = get_user(request.headers(), &state.config);

    if !state.db.delete_category(&user, id)? {
        return Err(AppError::not_found(&format!("Category {} not found", id)));
    }

    state
        .db
        .log_audit(&user, "delete", Some("category"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
