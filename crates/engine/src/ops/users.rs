use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, users};

use super::{Engine, with_tx};

impl Engine {
    /// Registers a new user. The email must not be taken yet.
    pub async fn user_new(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(email))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(email.to_string()));
            }

            let active = users::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                email: ActiveValue::Set(email.to_string()),
                password: ActiveValue::Set(password.to_string()),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    /// Returns all users in storage order.
    pub async fn users(&self) -> ResultEngine<Vec<users::Model>> {
        Ok(users::Entity::find().all(&self.database).await?)
    }

    pub async fn user(&self, user_id: i64) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<users::Model> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    /// Overwrites name, email and password of an existing user.
    ///
    /// Email uniqueness is only pre-checked on create; a collision here is
    /// caught by the unique index and surfaces as a database error.
    pub async fn user_update(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(user_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

            let mut active: users::ActiveModel = model.into();
            active.name = ActiveValue::Set(name.to_string());
            active.email = ActiveValue::Set(email.to_string());
            active.password = ActiveValue::Set(password.to_string());
            let model = active.update(&db_tx).await?;
            Ok(model)
        })
    }

    pub async fn user_delete(&self, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(user_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
