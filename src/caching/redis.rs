//! Redis 클라이언트 래퍼
//!
//! 값은 JSON 문자열로 저장합니다. 사용자 조회 캐시와 로그아웃 토큰 블랙리스트가
//! 이 클라이언트를 사용합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::RedisConfig;

fn serialization_error(e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, "JSON conversion failed", e.to_string()))
}

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`로 접속하고 PING으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(RedisConfig::url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let raw = self.get_string(key).await?;
        raw.map(|json| serde_json::from_str(&json).map_err(serialization_error))
            .transpose()
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.get(key).await
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let json = serde_json::to_string(value).map_err(serialization_error)?;
        self.setex(key, &json, seconds as u64).await
    }

    /// 문자열 값을 TTL과 함께 저장합니다. TTL 0은 1초로 올립니다.
    pub async fn setex(&self, key: &str, value: &str, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.set_ex(key, value, seconds.max(1)).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.exists(key).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.del(key).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.keys(pattern).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.del(keys).await
    }
}
