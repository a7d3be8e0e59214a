//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseUpdate};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::{ExpenseChanges, ExpenseDraft, expenses};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

/// `?startDate=..&endDate=..` pair for the date-range listing.
#[derive(Debug, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<expenses::Model>), ServerError> {
    let expense = state
        .engine
        .expense_new(ExpenseDraft {
            user_id: payload.user_id,
            title: payload.title,
            description: payload.description,
            amount: payload.amount,
            category_id: payload.category_id,
            expense_date: payload.expense_date,
            payment_method: payload.payment_method,
            receipt_url: payload.receipt_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<expenses::Model>>, ServerError> {
    Ok(Json(state.engine.expenses().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<expenses::Model>, ServerError> {
    Ok(Json(state.engine.expense(id).await?))
}

pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<expenses::Model>>, ServerError> {
    Ok(Json(state.engine.expenses_by_user(user_id).await?))
}

pub async fn list_by_user_and_category(
    State(state): State<ServerState>,
    Path((user_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<expenses::Model>>, ServerError> {
    Ok(Json(
        state
            .engine
            .expenses_by_user_and_category(user_id, category_id)
            .await?,
    ))
}

pub async fn list_by_date_range(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<expenses::Model>>, ServerError> {
    Ok(Json(
        state
            .engine
            .expenses_by_user_in_range(user_id, range.start_date, range.end_date)
            .await?,
    ))
}

pub async fn list_by_payment_method(
    State(state): State<ServerState>,
    Path((user_id, method)): Path<(i64, String)>,
) -> Result<Json<Vec<expenses::Model>>, ServerError> {
    Ok(Json(
        state
            .engine
            .expenses_by_user_and_payment_method(user_id, &method)
            .await?,
    ))
}

pub async fn total(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Decimal>, ServerError> {
    Ok(Json(state.engine.total_by_user(user_id).await?))
}

pub async fn total_by_category(
    State(state): State<ServerState>,
    Path((user_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<Decimal>, ServerError> {
    Ok(Json(
        state
            .engine
            .total_by_user_and_category(user_id, category_id)
            .await?,
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<expenses::Model>, ServerError> {
    let expense = state
        .engine
        .expense_update(
            id,
            ExpenseChanges {
                title: payload.title,
                description: payload.description,
                amount: payload.amount,
                expense_date: payload.expense_date,
                payment_method: payload.payment_method,
                receipt_url: payload.receipt_url,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok(Json(expense))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ServerError> {
    state.engine.expense_delete(id).await?;

    Ok("Expense deleted successfully")
}
