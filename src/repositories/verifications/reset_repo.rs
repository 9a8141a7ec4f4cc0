use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::verifications::PasswordReset,
};
use super::token_indexes;

#[repository(name = "reset", collection = "password_resets")]
pub struct ResetRepository {
    db: Arc<Database>,
}

impl ResetRepository {
    pub async fn insert(&self, mut reset: PasswordReset) -> Result<PasswordReset, AppError> {
        let result = self.collection::<PasswordReset>()
            .insert_one(&reset)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        reset.id = result.inserted_id.as_object_id();
        Ok(reset)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<PasswordReset>, AppError> {
        self.collection::<PasswordReset>()
            .find_one(doc! { "token": token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn mark_used(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<PasswordReset>()
            .update_one(
                doc! { "_id": id, "is_used": false },
                doc! { "$set": { "is_used": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    /// 새 재설정 토큰을 발급하기 전에 같은 사용자의 이전 토큰을 모두 무효화합니다.
    pub async fn invalidate_for_user(&self, user_id: ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<PasswordReset>()
            .update_many(
                doc! { "user_id": user_id, "is_used": false },
                doc! { "$set": { "is_used": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        self.collection::<PasswordReset>()
            .create_indexes(token_indexes())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
