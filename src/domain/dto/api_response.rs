//! 공통 성공 응답 봉투
//!
//! ```json
//! { "success": true, "message": "로그인되었습니다", "data": { ... } }
//! ```
//!
//! 실패 응답은 `AppError::error_response`가 같은 모양으로 만듭니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, message: None, data: Some(data) }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), data: Some(data) }
    }
}

impl ApiResponse<()> {
    /// 데이터 없이 메시지만 담은 성공 응답
    pub fn message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("로그아웃되었습니다")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "message": "로그아웃되었습니다" }));
    }

    #[test]
    fn test_data_response_omits_message() {
        let json = serde_json::to_value(ApiResponse::success(serde_json::json!({ "n": 1 }))).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": { "n": 1 } }));
    }
}
