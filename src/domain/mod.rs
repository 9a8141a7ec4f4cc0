//! 도메인 계층
//!
//! - [`entities`] - MongoDB 문서
//! - [`dto`] - HTTP 요청/응답
//! - [`models`] - 요청 처리 중에만 쓰는 값

pub mod entities;
pub mod dto;
pub mod models;
