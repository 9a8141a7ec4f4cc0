use std::sync::Arc;
use sha2::{Digest, Sha256};
use singleton_macro::repository;
use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::Repository;

const BLACKLIST_PREFIX: &str = "blacklist_token";

/// 원본 토큰 대신 SHA-256 해시를 키로 씁니다.
fn blacklist_key(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{}:{:x}", BLACKLIST_PREFIX, digest)
}

#[repository(name = "token", collection = "tokens")]
pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    /// 토큰을 남은 수명 동안 블랙리스트에 올립니다.
    pub async fn blacklist(&self, token: &str, ttl_secs: u64) -> Result<(), AppError> {
        self.redis
            .setex(&blacklist_key(token), "1", ttl_secs)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    pub async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        self.redis
            .exists(&blacklist_key(token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}
