use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::verifications::EmailVerification,
};
use super::token_indexes;

#[repository(name = "verification", collection = "email_verifications")]
pub struct VerificationRepository {
    db: Arc<Database>,
}

impl VerificationRepository {
    pub async fn insert(&self, mut verification: EmailVerification) -> Result<EmailVerification, AppError> {
        let result = self.collection::<EmailVerification>()
            .insert_one(&verification)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        verification.id = result.inserted_id.as_object_id();
        Ok(verification)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<EmailVerification>, AppError> {
        self.collection::<EmailVerification>()
            .find_one(doc! { "token": token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 아직 사용되지 않은 경우에만 사용 처리합니다. 처리했으면 true.
    pub async fn mark_used(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<EmailVerification>()
            .update_one(
                doc! { "_id": id, "is_used": false },
                doc! { "$set": { "is_used": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        self.collection::<EmailVerification>()
            .create_indexes(token_indexes())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
