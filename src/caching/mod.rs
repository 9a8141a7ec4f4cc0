//! 캐싱 계층 모듈
//!
//! Redis 기반 캐시와 토큰 블랙리스트 저장소를 제공합니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user:123", &user, 600).await?;
//! let cached: Option<User> = cache.get("user:123").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://127.0.0.1:6379  # 기본값
//! ```

pub mod redis;
