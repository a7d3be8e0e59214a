//! Budget API endpoints

use api_types::budget::{BudgetNew, BudgetUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{BudgetChanges, BudgetDraft, BudgetStatus, budgets};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<budgets::Model>), ServerError> {
    let budget = state
        .engine
        .budget_new(BudgetDraft {
            user_id: payload.user_id,
            category_id: payload.category_id,
            amount: payload.amount,
            start_date: payload.start_date,
            end_date: payload.end_date,
            alert_threshold: payload.alert_threshold,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<budgets::Model>>, ServerError> {
    Ok(Json(state.engine.budgets().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<budgets::Model>, ServerError> {
    Ok(Json(state.engine.budget(id).await?))
}

pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<budgets::Model>>, ServerError> {
    Ok(Json(state.engine.budgets_by_user(user_id).await?))
}

/// Budgets whose date range contains the server's current date.
pub async fn list_active_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<budgets::Model>>, ServerError> {
    let today = chrono::Local::now().date_naive();

    Ok(Json(
        state.engine.active_budgets_by_user(user_id, today).await?,
    ))
}

pub async fn list_by_user_and_category(
    State(state): State<ServerState>,
    Path((user_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<budgets::Model>>, ServerError> {
    Ok(Json(
        state
            .engine
            .budgets_by_user_and_category(user_id, category_id)
            .await?,
    ))
}

pub async fn status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<BudgetStatus>, ServerError> {
    Ok(Json(state.engine.budget_status(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<budgets::Model>, ServerError> {
    let budget = state
        .engine
        .budget_update(
            id,
            BudgetChanges {
                amount: payload.amount,
                start_date: payload.start_date,
                end_date: payload.end_date,
                alert_threshold: payload.alert_threshold,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok(Json(budget))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ServerError> {
    state.engine.budget_delete(id).await?;

    Ok("Budget deleted successfully")
}
