//! User API endpoints

use api_types::user::UserPayload;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::users;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<users::Model>), ServerError> {
    let user = state
        .engine
        .user_new(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<users::Model>>, ServerError> {
    Ok(Json(state.engine.users().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<users::Model>, ServerError> {
    Ok(Json(state.engine.user(id).await?))
}

pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<users::Model>, ServerError> {
    Ok(Json(state.engine.user_by_email(&email).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<users::Model>, ServerError> {
    let user = state
        .engine
        .user_update(id, &payload.name, &payload.email, &payload.password)
        .await?;

    Ok(Json(user))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ServerError> {
    state.engine.user_delete(id).await?;

    Ok("User deleted successfully")
}
