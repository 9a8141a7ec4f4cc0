use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::verifications::{CodePurpose, EmailVerificationCode},
};

#[repository(name = "code", collection = "email_verification_codes")]
pub struct CodeRepository {
    db: Arc<Database>,
}

impl CodeRepository {
    pub async fn insert(&self, mut code: EmailVerificationCode) -> Result<EmailVerificationCode, AppError> {
        let result = self.collection::<EmailVerificationCode>()
            .insert_one(&code)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        code.id = result.inserted_id.as_object_id();
        Ok(code)
    }

    /// 가장 최근에 발급된 코드 (사용 여부 무관). 재발송 대기 시간 판정에 씁니다.
    pub async fn find_latest(&self, email: &str, purpose: CodePurpose) -> Result<Option<EmailVerificationCode>, AppError> {
        self.collection::<EmailVerificationCode>()
            .find_one(doc! { "email": email, "purpose": purpose.as_str() })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 만료되지 않은 미사용 코드 중 가장 최근 것
    pub async fn find_active(&self, email: &str, purpose: CodePurpose) -> Result<Option<EmailVerificationCode>, AppError> {
        self.collection::<EmailVerificationCode>()
            .find_one(doc! {
                "email": email,
                "purpose": purpose.as_str(),
                "is_used": false,
                "expires_at": { "$gt": DateTime::now() },
            })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 같은 이메일/용도의 미사용 코드를 모두 무효화합니다.
    pub async fn invalidate_unused(&self, email: &str, purpose: CodePurpose) -> Result<u64, AppError> {
        let result = self.collection::<EmailVerificationCode>()
            .update_many(
                doc! { "email": email, "purpose": purpose.as_str(), "is_used": false },
                doc! { "$set": { "is_used": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    /// 시도 하나를 선점합니다.
    ///
    /// 미사용이고 `attempts < max_attempts`인 경우에만 1 올리고 올린 뒤의 문서를 반환합니다.
    /// 조건에 맞지 않으면 `None`. 동시에 들어온 요청도 합쳐서 한도를 넘지 못합니다.
    pub async fn claim_attempt(&self, id: ObjectId, max_attempts: i32) -> Result<Option<EmailVerificationCode>, AppError> {
        self.collection::<EmailVerificationCode>()
            .find_one_and_update(
                doc! { "_id": id, "is_used": false, "attempts": { "$lt": max_attempts } },
                doc! { "$inc": { "attempts": 1 } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn mark_used(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<EmailVerificationCode>()
            .update_one(
                doc! { "_id": id, "is_used": false },
                doc! { "$set": { "is_used": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let lookup_index = IndexModel::builder()
            .keys(doc! { "email": 1, "purpose": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("email_purpose_created".to_string())
                .build())
            .build();

        let ttl_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(IndexOptions::builder()
                .expire_after(std::time::Duration::from_secs(24 * 60 * 60))
                .name("expires_at_ttl".to_string())
                .build())
            .build();

        self.collection::<EmailVerificationCode>()
            .create_indexes([lookup_index, ttl_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
