//! 데이터 접근 계층
//!
//! `#[repository]` 매크로로 싱글톤 등록되며 `Arc<Database>` / `Arc<RedisClient>`를 주입받습니다.
//!
//! - [`users`] - 사용자 (`users`, Redis 캐시)
//! - [`verifications`] - 인증 토큰/코드/재설정 토큰
//! - [`tokens`] - 로그아웃 토큰 블랙리스트 (Redis)

pub mod users;
pub mod verifications;
pub mod tokens;
