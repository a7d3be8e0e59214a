use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, budgets, categories,
    status::{self, BudgetStatus},
};

use super::{Engine, with_tx};

/// Input for creating a budget.
#[derive(Clone, Debug)]
pub struct BudgetDraft {
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub alert_threshold: Decimal,
}

/// Full replacement payload for a budget update. Same category rule as
/// [`ExpenseChanges`](super::ExpenseChanges).
#[derive(Clone, Debug)]
pub struct BudgetChanges {
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub alert_threshold: Decimal,
    pub category_id: Option<i64>,
}

impl Engine {
    /// Creates a new budget. The referenced user and category must exist.
    pub async fn budget_new(&self, draft: BudgetDraft) -> ResultEngine<budgets::Model> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, draft.user_id).await?;
            self.require_category(&db_tx, draft.category_id).await?;

            let active = budgets::ActiveModel {
                user_id: ActiveValue::Set(draft.user_id),
                category_id: ActiveValue::Set(draft.category_id),
                amount: ActiveValue::Set(draft.amount),
                start_date: ActiveValue::Set(draft.start_date),
                end_date: ActiveValue::Set(draft.end_date),
                alert_threshold: ActiveValue::Set(draft.alert_threshold),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn budgets(&self) -> ResultEngine<Vec<budgets::Model>> {
        Ok(budgets::Entity::find().all(&self.database).await?)
    }

    pub async fn budget(&self, budget_id: i64) -> ResultEngine<budgets::Model> {
        budgets::Entity::find_by_id(budget_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }

    pub async fn budgets_by_user(&self, user_id: i64) -> ResultEngine<Vec<budgets::Model>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?)
    }

    pub async fn budgets_by_user_and_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> ResultEngine<Vec<budgets::Model>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::CategoryId.eq(category_id))
            .all(&self.database)
            .await?)
    }

    /// Budgets of a user whose date range contains `today`, inclusive on
    /// both boundary dates.
    pub async fn active_budgets_by_user(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> ResultEngine<Vec<budgets::Model>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::StartDate.lte(today))
            .filter(budgets::Column::EndDate.gte(today))
            .all(&self.database)
            .await?)
    }

    /// The active budget of one category, or `None`. "None" is an ordinary
    /// outcome here, not an error. When several budgets overlap `today` the
    /// one with the lowest id wins.
    pub async fn active_budget_by_user_and_category(
        &self,
        user_id: i64,
        category_id: i64,
        today: NaiveDate,
    ) -> ResultEngine<Option<budgets::Model>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::CategoryId.eq(category_id))
            .filter(budgets::Column::StartDate.lte(today))
            .filter(budgets::Column::EndDate.gte(today))
            .order_by_asc(budgets::Column::Id)
            .one(&self.database)
            .await?)
    }

    /// Utilization report for a budget: the user's expense total over the
    /// budget's own date range fed into [`status::evaluate`].
    ///
    /// The total deliberately spans ALL the user's expenses in the window,
    /// not only the budget's category.
    pub async fn budget_status(&self, budget_id: i64) -> ResultEngine<BudgetStatus> {
        let budget = self.budget(budget_id).await?;
        let spent = self
            .total_by_user_in_range(budget.user_id, budget.start_date, budget.end_date)
            .await?;

        Ok(status::evaluate(budget, spent))
    }

    /// Overwrites an existing budget with `changes`. The owning user is
    /// never re-pointed.
    pub async fn budget_update(
        &self,
        budget_id: i64,
        changes: BudgetChanges,
    ) -> ResultEngine<budgets::Model> {
        with_tx!(self, |db_tx| {
            let model = budgets::Entity::find_by_id(budget_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;

            let mut active: budgets::ActiveModel = model.into();
            active.amount = ActiveValue::Set(changes.amount);
            active.start_date = ActiveValue::Set(changes.start_date);
            active.end_date = ActiveValue::Set(changes.end_date);
            active.alert_threshold = ActiveValue::Set(changes.alert_threshold);

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

    pub async fn budget_delete(&self, budget_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = budgets::Entity::find_by_id(budget_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
