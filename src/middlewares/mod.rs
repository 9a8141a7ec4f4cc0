//! HTTP 미들웨어
//!
//! - [`auth_middleware`] - bearer JWT 인증 (`AuthMiddleware::required()` / `verified_email()`)

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
