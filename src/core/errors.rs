//! # Application Error Handling
//!
//! 러닝 트래커 백엔드 전역에서 사용하는 에러 타입입니다.
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하고,
//! `actix_web::ResponseError` 구현이 에러를 일관된 JSON 응답으로 바꿉니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "success": false, "message": "이미 가입된 이메일입니다" }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 만료/사용된 인증 토큰 |
//! | `ConflictError` | 400 Bad Request | 이메일 중복 등 유니크 제약 위반 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, JWT 검증 실패 |
//! | `AuthorizationError` | 403 Forbidden | 이메일 미인증 사용자 |
//! | `NotFound` | 404 Not Found | 사용자 없음 |
//! | `TooManyRequests` | 429 Too Many Requests | 인증 코드 재발송 대기 시간 |
//! | `DatabaseError` / `RedisError` / `ExternalServiceError` / `InternalError` | 500 | 인프라 오류 |
//!
//! 5xx 응답은 개발 환경에서만 실제 메시지를 노출합니다.

use actix_web::http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;
use crate::config::Environment;

/// 5xx 응답에서 운영 환경에 노출되는 고정 메시지
pub const GENERIC_SERVER_ERROR: &str = "서버 내부 오류가 발생했습니다";

/// 애플리케이션 전역 에러 타입
///
/// 인프라 계층(`DatabaseError`, `RedisError`, `ExternalServiceError`),
/// 비즈니스 계층(`ValidationError`, `ConflictError`, `NotFound`, `TooManyRequests`),
/// 보안 계층(`AuthenticationError`, `AuthorizationError`)으로 나뉩니다.
///
/// ```rust,ignore
/// let user = user_repo.find_by_email(&email).await?
///     .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 연산 실패 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패 (400)
    ///
    /// 클라이언트에게는 접두사 없이 메시지만 전달됩니다.
    #[error("{0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("{0}")]
    NotFound(String),

    /// 유니크 제약 위반 (400)
    ///
    /// 같은 이메일로 두 번 가입하는 경우처럼 저장소의 유니크 제약과
    /// 충돌하는 요청입니다.
    #[error("{0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("{0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("{0}")]
    AuthorizationError(String),

    /// 요청 빈도 제한 (429)
    #[error("{0}")]
    TooManyRequests(String),

    /// SMTP 등 외부 서비스 실패 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 전달할 메시지
    ///
    /// 5xx 계열은 `include_detail`이 false면 고정 메시지로 대체됩니다.
    pub fn client_message(&self, include_detail: bool) -> String {
        if self.status().is_server_error() && !include_detail {
            return GENERIC_SERVER_ERROR.to_string();
        }
        self.to_string()
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    /// 에러를 `{"success": false, "message": ...}` 응답으로 변환합니다.
    ///
    /// 서버 오류는 로그에 원본 메시지를 남기고, 운영 환경에서는
    /// 클라이언트에게 내부 정보를 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            log::error!("❌ 요청 처리 실패: {}", self);
        }

        let include_detail = Environment::current() == Environment::Development;

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "success": false,
                "message": self.client_message(include_detail)
            }))
    }
}

/// `validator` 검증 실패를 첫 번째 필드 메시지로 변환합니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(first_validation_message(&errors))
    }
}

/// 검증 에러 중 첫 번째 메시지를 꺼냅니다.
///
/// 필드 순서는 이름순으로 고정해 같은 입력에 항상 같은 메시지가 나오도록 합니다.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .into_iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "입력값이 올바르지 않습니다".to_string())
}

/// MongoDB 유니크 인덱스 위반(E11000) 여부
pub fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => error.to_string().contains("E11000"),
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let bytes = std::fs::read(path).context("템플릿 파일 읽기 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use validator::Validate;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("이메일은 필수입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let error = AppError::ConflictError("이미 가입된 이메일입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("토큰이 만료되었습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("이메일 인증이 필요합니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_found_and_rate_limit_responses() {
        assert_eq!(
            AppError::NotFound("x".to_string()).error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::TooManyRequests("x".to_string()).error_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::DatabaseError("connection reset".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_error_message_is_hidden_without_detail() {
        let error = AppError::DatabaseError("connection reset".to_string());
        assert_eq!(error.client_message(false), GENERIC_SERVER_ERROR);
        assert!(error.client_message(true).contains("connection reset"));
    }

    #[test]
    fn test_client_error_message_is_always_shown() {
        let error = AppError::ValidationError("비밀번호는 최소 6자 이상이어야 합니다".to_string());
        assert_eq!(error.client_message(false), "비밀번호는 최소 6자 이상이어야 합니다");
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_conversion_uses_field_message() {
        let probe = Probe { email: "not-an-email".to_string() };
        let error: AppError = probe.validate().unwrap_err().into();

        match error {
            AppError::ValidationError(msg) => assert_eq!(msg, "유효한 이메일 주소를 입력해주세요"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
