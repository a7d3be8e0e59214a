//! Request payloads shared between the server and its clients.
//!
//! Field names follow the wire format (camelCase); dates are ISO-8601
//! calendar dates and monetary amounts are exact decimals, serialized as
//! strings so no precision is lost through floating point.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Body for `POST /api/users` and `PUT /api/users/{id}`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserPayload {
        pub name: String,
        pub email: String,
        pub password: String,
    }
}

pub mod category {
    use super::*;

    /// Body for `POST /api/categories` and `PUT /api/categories/{id}`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryPayload {
        pub name: String,
        pub description: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }
}

pub mod expense {
    use super::*;

    /// Body for `POST /api/expenses`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub user_id: i64,
        pub title: String,
        pub description: Option<String>,
        pub amount: Decimal,
        pub category_id: i64,
        pub expense_date: NaiveDate,
        pub payment_method: String,
        pub receipt_url: Option<String>,
    }

    /// Body for `PUT /api/expenses/{id}`.
    ///
    /// All scalar fields replace the stored ones. `categoryId` is optional:
    /// absent means "keep the current category".
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub title: String,
        pub description: Option<String>,
        pub amount: Decimal,
        pub expense_date: NaiveDate,
        pub payment_method: String,
        pub receipt_url: Option<String>,
        pub category_id: Option<i64>,
    }
}

pub mod budget {
    use super::*;

    /// Body for `POST /api/budgets`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub user_id: i64,
        pub category_id: i64,
        pub amount: Decimal,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub alert_threshold: Decimal,
    }

    /// Body for `PUT /api/budgets/{id}`. Same `categoryId` rule as
    /// [`ExpenseUpdate`](super::expense::ExpenseUpdate).
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub amount: Decimal,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub alert_threshold: Decimal,
        pub category_id: Option<i64>,
    }
}
