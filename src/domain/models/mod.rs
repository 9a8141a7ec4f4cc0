//! 도메인 모델
//!
//! 저장되지 않고 요청 처리 중에만 쓰이는 값들입니다.
//!
//! - [`auth`] - 인증된 사용자 컨텍스트와 인증 요구 수준
//! - [`token`] - JWT 클레임

pub mod auth;
pub mod token;
