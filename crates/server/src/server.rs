use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{budgets, categories, expenses, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Builds the resource router. Paths and verbs mirror the public API
/// contract one to one.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/users", post(users::create).get(users::list))
        .route(
            "/api/users/{id}",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route("/api/users/email/{email}", get(users::get_by_email))
        .route(
            "/api/categories",
            post(categories::create).get(categories::list),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/api/categories/name/{name}", get(categories::get_by_name))
        .route("/api/expenses", post(expenses::create).get(expenses::list))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/api/expenses/user/{user_id}", get(expenses::list_by_user))
        .route(
            "/api/expenses/user/{user_id}/category/{category_id}",
            get(expenses::list_by_user_and_category),
        )
        .route(
            "/api/expenses/user/{user_id}/date-range",
            get(expenses::list_by_date_range),
        )
        .route(
            "/api/expenses/user/{user_id}/payment-method/{method}",
            get(expenses::list_by_payment_method),
        )
        .route("/api/expenses/user/{user_id}/total", get(expenses::total))
        .route(
            "/api/expenses/user/{user_id}/category/{category_id}/total",
            get(expenses::total_by_category),
        )
        .route("/api/budgets", post(budgets::create).get(budgets::list))
        .route(
            "/api/budgets/{id}",
            get(budgets::get).put(budgets::update).delete(budgets::remove),
        )
        .route("/api/budgets/user/{user_id}", get(budgets::list_by_user))
        .route(
            "/api/budgets/user/{user_id}/active",
            get(budgets::list_active_by_user),
        )
        .route(
            "/api/budgets/user/{user_id}/category/{category_id}",
            get(budgets::list_by_user_and_category),
        )
        .route("/api/budgets/{id}/status", get(budgets::status))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
