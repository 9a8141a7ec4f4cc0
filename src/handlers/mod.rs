//! HTTP 핸들러
//!
//! 핸들러는 요청 검증과 응답 조립만 하고 실제 처리는 서비스에 맡깁니다.
//! 모두 `Result<HttpResponse, AppError>`를 반환해 에러 응답 형식을 통일합니다.

pub mod auth;
pub mod health;

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use crate::core::errors::AppError;

/// 등록되지 않은 경로
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "요청한 API를 찾을 수 없습니다"
    }))
}

/// JSON 본문 파싱 실패를 400 봉투 응답으로 바꿉니다.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type은 application/json 이어야 합니다".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "요청 본문이 너무 큽니다".to_string()
        }
        _ => "요청 본문 JSON 형식이 올바르지 않습니다".to_string(),
    };
    log::debug!("JSON 파싱 실패: {}", err);
    AppError::ValidationError(message).into()
}
