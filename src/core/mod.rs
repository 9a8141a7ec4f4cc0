//! # Core Module
//!
//! 애플리케이션 전역에서 쓰는 뼈대입니다.
//!
//! - [`registry`]: `#[service]` / `#[repository]` 싱글톤을 관리하는 서비스 로케이터
//! - [`errors`]: `AppError`와 HTTP 에러 응답 변환
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(Arc::new(database));
//! ServiceLocator::set(Arc::new(redis_client));
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod registry;
pub mod errors;

pub use errors::{AppError, AppResult};
