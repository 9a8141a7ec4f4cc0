//! 비즈니스 로직 계층
//!
//! `#[service]` 매크로로 싱글톤 등록되며 리포지토리와 다른 서비스를 `Arc`로 주입받습니다.

pub mod auth;
pub mod mail;
pub mod users;
