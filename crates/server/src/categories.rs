//! Category API endpoints

use api_types::category::CategoryPayload;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::categories;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<categories::Model>), ServerError> {
    let category = state
        .engine
        .category_new(
            &payload.name,
            payload.description,
            payload.icon,
            payload.color,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<categories::Model>>, ServerError> {
    Ok(Json(state.engine.categories().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<categories::Model>, ServerError> {
    Ok(Json(state.engine.category(id).await?))
}

pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<categories::Model>, ServerError> {
    Ok(Json(state.engine.category_by_name(&name).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<categories::Model>, ServerError> {
    let category = state
        .engine
        .category_update(
            id,
            &payload.name,
            payload.description,
            payload.icon,
            payload.color,
        )
        .await?;

    Ok(Json(category))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ServerError> {
    state.engine.category_delete(id).await?;

    Ok("Category deleted successfully")
}
