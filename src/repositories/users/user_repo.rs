use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::{is_duplicate_key_error, AppError},
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};

const USER_CACHE_TTL_SECS: usize = 600;

fn id_cache_key(id: &str) -> String {
    format!("user:id:{}", id)
}

fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 캐시 → DB 순으로 조회하고 DB에서 찾은 값은 캐시에 남깁니다.
    async fn find_cached(&self, cache_key: &str, filter: Document) -> Result<Option<User>, AppError> {
        if let Ok(Some(cached)) = self.redis.get::<User>(cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(cache_key, user, USER_CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    async fn evict(&self, user: &User) {
        let mut keys = vec![email_cache_key(&user.email)];
        if let Some(id) = user.id_string() {
            keys.push(id_cache_key(&id));
        }
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("사용자 캐시 삭제 실패: {}", e);
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_cached(&email_cache_key(email), doc! { "email": email }).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        self.find_cached(&id_cache_key(id), doc! { "_id": object_id }).await
    }

    /// 새 사용자를 저장합니다.
    ///
    /// 같은 이메일이 이미 있으면 `ConflictError`. 동시에 들어온 가입 요청은
    /// 유니크 인덱스 위반으로 걸러집니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 가입된 이메일입니다".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 가입된 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 사용자 ID를 읽을 수 없습니다".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    /// `$set` 문서를 적용하고 갱신된 사용자를 반환합니다. `updated_at`은 자동으로 갱신됩니다.
    pub async fn update(&self, id: &str, mut set_doc: Document) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        set_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<User>()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated {
            self.evict(user).await;
        }

        Ok(updated)
    }

    pub async fn mark_email_verified(&self, id: &str) -> Result<Option<User>, AppError> {
        self.update(id, doc! { "is_email_verified": true }).await
    }

    pub async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<Option<User>, AppError> {
        self.update(id, doc! { "password_hash": password_hash }).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(id_cache_key("abc"), "user:id:abc");
        assert_eq!(email_cache_key("a@b.com"), "user:email:a@b.com");
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("not-an-id"), Err(AppError::ValidationError(_))));
    }
}
