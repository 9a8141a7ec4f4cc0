//! 로그아웃된 액세스 토큰 블랙리스트 (Redis 전용)

pub mod token_repository;

pub use token_repository::TokenRepository;
