use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::{Engine, with_tx};

/// Input for creating an expense. `description` and `receipt_url` are the
/// only optional fields.
#[derive(Clone, Debug)]
pub struct ExpenseDraft {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub category_id: i64,
    pub expense_date: NaiveDate,
    pub payment_method: String,
    pub receipt_url: Option<String>,
}

/// Full replacement payload for an expense update.
///
/// Every scalar field is overwritten unconditionally. The category is only
/// re-pointed when `category_id` is supplied and resolves; a supplied id
/// that resolves to nothing leaves the current category untouched.
#[derive(Clone, Debug)]
pub struct ExpenseChanges {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub payment_method: String,
    pub receipt_url: Option<String>,
    pub category_id: Option<i64>,
}

impl Engine {
    /// Records a new expense. The referenced user and category must exist.
    pub async fn expense_new(&self, draft: ExpenseDraft) -> ResultEngine<expenses::Model> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, draft.user_id).await?;
            self.require_category(&db_tx, draft.category_id).await?;

            let active = expenses::ActiveModel {
                user_id: ActiveValue::Set(draft.user_id),
                title: ActiveValue::Set(draft.title),
                description: ActiveValue::Set(draft.description),
                amount: ActiveValue::Set(draft.amount),
                category_id: ActiveValue::Set(draft.category_id),
                expense_date: ActiveValue::Set(draft.expense_date),
                payment_method: ActiveValue::Set(draft.payment_method),
                receipt_url: ActiveValue::Set(draft.receipt_url),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn expenses(&self) -> ResultEngine<Vec<expenses::Model>> {
        Ok(expenses::Entity::find().all(&self.database).await?)
    }

    pub async fn expense(&self, expense_id: i64) -> ResultEngine<expenses::Model> {
        expenses::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))
    }

    /// All expenses of a user, most recent first. Ties on the date fall back
    /// to the id so the order is stable for a fixed dataset.
    pub async fn expenses_by_user(&self, user_id: i64) -> ResultEngine<Vec<expenses::Model>> {
        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?)
    }

    pub async fn expenses_by_user_and_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> ResultEngine<Vec<expenses::Model>> {
        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::CategoryId.eq(category_id))
            .all(&self.database)
            .await?)
    }

    /// Expenses of a user within `[start, end]`, inclusive on both ends.
    pub async fn expenses_by_user_in_range(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<expenses::Model>> {
        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::ExpenseDate.gte(start))
            .filter(expenses::Column::ExpenseDate.lte(end))
            .all(&self.database)
            .await?)
    }

    pub async fn expenses_by_user_and_payment_method(
        &self,
        user_id: i64,
        payment_method: &str,
    ) -> ResultEngine<Vec<expenses::Model>> {
        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::PaymentMethod.eq(payment_method))
            .all(&self.database)
            .await?)
    }

    /// Sum of all expense amounts of a user. Zero when nothing matches.
    pub async fn total_by_user(&self, user_id: i64) -> ResultEngine<Decimal> {
        let total: Option<Option<Decimal>> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .filter(expenses::Column::UserId.eq(user_id))
            .into_tuple()
            .one(&self.database)
            .await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Sum of a user's expense amounts in one category. Zero when nothing
    /// matches.
    pub async fn total_by_user_and_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> ResultEngine<Decimal> {
        let total: Option<Option<Decimal>> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::CategoryId.eq(category_id))
            .into_tuple()
            .one(&self.database)
            .await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Sum of a user's expense amounts with dates in `[start, end]`
    /// inclusive. Zero when nothing matches, never an absent value.
    pub async fn total_by_user_in_range(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Decimal> {
        let total: Option<Option<Decimal>> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::ExpenseDate.gte(start))
            .filter(expenses::Column::ExpenseDate.lte(end))
            .into_tuple()
            .one(&self.database)
            .await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Overwrites an existing expense with `changes`. The owning user is
    /// never re-pointed.
    pub async fn expense_update(
        &self,
        expense_id: i64,
        changes: ExpenseChanges,
    ) -> ResultEngine<expenses::Model> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;

            let mut active: expenses::ActiveModel = model.into();
            active.title = ActiveValue::Set(changes.title);
            active.description = ActiveValue::Set(changes.description);
            active.amount = ActiveValue::Set(changes.amount);
            active.expense_date = ActiveValue::Set(changes.expense_date);
            active.payment_method = ActiveValue::Set(changes.payment_method);
            active.receipt_url = ActiveValue::Set(changes.receipt_url);

            if let Some(category_id) = changes.category_id {
                // An id that resolves to nothing is dropped silently.
                if categories::Entity::find_by_id(category_id)
                    .one(&db_tx)
                    .await?
                    .is_some()
                {
                    active.category_id = ActiveValue::Set(category_id);
                }
            }

            let model = active.update(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn expense_delete(&self, expense_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
