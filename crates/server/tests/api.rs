use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();

    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a user and a category, returning their ids.
async fn seed_user_and_category(app: &Router) -> (i64, i64) {
    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/users",
            json!({"name": "Alice", "email": "alice@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let user = body_json(res).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/categories",
            json!({"name": "Food", "description": "meals", "icon": null, "color": null}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category = body_json(res).await;

    (
        user["id"].as_i64().unwrap(),
        category["id"].as_i64().unwrap(),
    )
}

fn expense_body(user_id: i64, category_id: i64, amount: &str, day: &str) -> Value {
    json!({
        "userId": user_id,
        "title": "expense",
        "description": null,
        "amount": amount,
        "categoryId": category_id,
        "expenseDate": day,
        "paymentMethod": "card",
        "receiptUrl": null,
    })
}

#[tokio::test]
async fn create_user_returns_201_with_assigned_id() {
    let app = test_router().await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/users",
            json!({"name": "Alice", "email": "alice@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["email"], json!("alice@example.com"));
}

#[tokio::test]
async fn duplicate_email_returns_409() {
    let app = test_router().await;
    seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/users",
            json!({"name": "Impostor", "email": "alice@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_update_colliding_with_a_taken_email_returns_500() {
    let app = test_router().await;
    seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/users",
            json!({"name": "Bob", "email": "bob@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let bob_id = body_json(res).await["id"].as_i64().unwrap();

    // Email uniqueness is only pre-checked on create; the unique index
    // catches the update collision and surfaces as a sanitized 500.
    let res = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/users/{bob_id}"),
            json!({"name": "Bob", "email": "alice@example.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(res).await;
    assert_eq!(body["error"], json!("internal server error"));
}

#[tokio::test]
async fn missing_user_returns_404() {
    let app = test_router().await;

    let res = app.clone().oneshot(get("/api/users/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_lookup_by_email() {
    let app = test_router().await;
    seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(get("/api/users/email/alice@example.com"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["name"], json!("Alice"));
}

#[tokio::test]
async fn duplicate_category_name_returns_409() {
    let app = test_router().await;
    seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/categories",
            json!({"name": "Food", "description": null, "icon": null, "color": null}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn category_lookup_by_name() {
    let app = test_router().await;
    seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(get("/api/categories/name/Food"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["description"], json!("meals"));
}

#[tokio::test]
async fn expense_with_unknown_category_returns_404() {
    let app = test_router().await;
    let (user_id, _) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/expenses",
            expense_body(user_id, 999, "10", "2024-01-10"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.clone().oneshot(get("/api/expenses")).await.unwrap();
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn date_range_listing_uses_the_query_parameters() {
    let app = test_router().await;
    let (user_id, category_id) = seed_user_and_category(&app).await;

    for day in ["2023-12-31", "2024-01-01", "2024-01-31", "2024-02-01"] {
        let res = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/expenses",
                expense_body(user_id, category_id, "10", day),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .clone()
        .oneshot(get(&format!(
            "/api/expenses/user/{user_id}/date-range?startDate=2024-01-01&endDate=2024-01-31"
        )))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn total_is_zero_for_a_user_without_expenses() {
    let app = test_router().await;
    let (user_id, _) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(get(&format!("/api/expenses/user/{user_id}/total")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!("0"));
}

#[tokio::test]
async fn budget_status_reports_the_utilization() {
    let app = test_router().await;
    let (user_id, category_id) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/budgets",
            json!({
                "userId": user_id,
                "categoryId": category_id,
                "amount": "500",
                "startDate": "2024-01-01",
                "endDate": "2024-01-31",
                "alertThreshold": "80",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let budget = body_json(res).await;
    let budget_id = budget["id"].as_i64().unwrap();

    for (amount, day) in [("150", "2024-01-10"), ("270", "2024-01-20")] {
        let res = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/expenses",
                expense_body(user_id, category_id, amount, day),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .clone()
        .oneshot(get(&format!("/api/budgets/{budget_id}/status")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["percentageUsed"], json!("84.0000"));
    assert_eq!(body["isOverBudget"], json!(false));
    assert_eq!(body["alertThresholdReached"], json!(true));
    assert_eq!(body["budget"]["id"].as_i64().unwrap(), budget_id);
}

#[tokio::test]
async fn budgets_by_user_and_category_lists_only_that_pair() {
    let app = test_router().await;
    let (user_id, category_id) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/categories",
            json!({"name": "Travel", "description": null, "icon": null, "color": null}),
        ))
        .await
        .unwrap();
    let other_category_id = body_json(res).await["id"].as_i64().unwrap();

    for cat in [category_id, other_category_id] {
        let res = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/budgets",
                json!({
                    "userId": user_id,
                    "categoryId": cat,
                    "amount": "500",
                    "startDate": "2024-01-01",
                    "endDate": "2024-01-31",
                    "alertThreshold": "80",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .clone()
        .oneshot(get(&format!(
            "/api/budgets/user/{user_id}/category/{category_id}"
        )))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["categoryId"].as_i64().unwrap(), category_id);
}

#[tokio::test]
async fn expense_update_keeps_category_on_unresolvable_id() {
    let app = test_router().await;
    let (user_id, category_id) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/expenses",
            expense_body(user_id, category_id, "10", "2024-01-10"),
        ))
        .await
        .unwrap();
    let expense = body_json(res).await;
    let expense_id = expense["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/expenses/{expense_id}"),
            json!({
                "title": "groceries",
                "description": null,
                "amount": "42",
                "expenseDate": "2024-01-12",
                "paymentMethod": "cash",
                "receiptUrl": null,
                "categoryId": 999,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["categoryId"].as_i64().unwrap(), category_id);
    assert_eq!(body["title"], json!("groceries"));
}

#[tokio::test]
async fn delete_is_not_repeatable() {
    let app = test_router().await;
    let (user_id, category_id) = seed_user_and_category(&app).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/budgets",
            json!({
                "userId": user_id,
                "categoryId": category_id,
                "amount": "500",
                "startDate": "2024-01-01",
                "endDate": "2024-01-31",
                "alertThreshold": "80",
            }),
        ))
        .await
        .unwrap();
    let budget = body_json(res).await;
    let budget_id = budget["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/budgets/{budget_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/budgets/{budget_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
