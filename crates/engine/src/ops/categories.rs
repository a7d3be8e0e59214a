use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories};

use super::{Engine, with_tx};

impl Engine {
    /// Adds a new spending category. The name must not be taken yet.
    pub async fn category_new(
        &self,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
        color: Option<String>,
    ) -> ResultEngine<categories::Model> {
        with_tx!(self, |db_tx| {
            let taken = categories::Entity::find()
                .filter(categories::Column::Name.eq(name))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(name.to_string()));
            }

            let active = categories::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(description),
                icon: ActiveValue::Set(icon),
                color: ActiveValue::Set(color),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn categories(&self) -> ResultEngine<Vec<categories::Model>> {
        Ok(categories::Entity::find().all(&self.database).await?)
    }

    pub async fn category(&self, category_id: i64) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }

    pub async fn category_by_name(&self, name: &str) -> ResultEngine<categories::Model> {
        categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }

    /// Overwrites every mutable field of an existing category.
    pub async fn category_update(
        &self,
        category_id: i64,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
        color: Option<String>,
    ) -> ResultEngine<categories::Model> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

            let mut active: categories::ActiveModel = model.into();
            active.name = ActiveValue::Set(name.to_string());
            active.description = ActiveValue::Set(description);
            active.icon = ActiveValue::Set(icon);
            active.color = ActiveValue::Set(color);
            let model = active.update(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn category_delete(&self, category_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
