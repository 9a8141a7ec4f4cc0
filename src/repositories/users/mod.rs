//! 사용자 리포지토리. 조회 결과를 Redis에 10분간 캐시합니다.

pub mod user_repo;

pub use user_repo::UserRepository;
