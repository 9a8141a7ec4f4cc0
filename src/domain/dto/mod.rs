//! 요청/응답 DTO
//!
//! 요청 DTO는 `validator`로 검증하고, 응답 DTO는 camelCase JSON으로 직렬화합니다.

pub mod api_response;
pub mod users;

pub use api_response::ApiResponse;
pub use users::*;
