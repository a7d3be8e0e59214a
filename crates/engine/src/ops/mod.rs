use sea_orm::{DatabaseConnection, DatabaseTransaction, prelude::*};

use crate::{EngineError, ResultEngine};

mod budgets;
mod categories;
mod expenses;
mod users;

pub use budgets::{BudgetChanges, BudgetDraft};
pub use expenses::{ExpenseChanges, ExpenseDraft};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_user(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<crate::users::Model> {
        crate::users::Entity::find_by_id(user_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    async fn require_category(
        &self,
        db_tx: &DatabaseTransaction,
        category_id: i64,
    ) -> ResultEngine<crate::categories::Model> {
        crate::categories::Entity::find_by_id(category_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
