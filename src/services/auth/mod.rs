//! 인증 서비스
//!
//! - [`auth_service`] - 가입/로그인/로그아웃
//! - [`token_service`] - JWT 발급/검증, 토큰 폐기
//! - [`verification_service`] - 이메일 인증 링크, 로그인 코드, 비밀번호 재설정

pub mod auth_service;
pub mod token_service;
pub mod verification_service;

pub use auth_service::AuthService;
pub use token_service::TokenService;
pub use verification_service::VerificationService;
