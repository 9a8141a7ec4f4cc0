//! 이메일 인증 관련 요청

use serde::Deserialize;
use validator::Validate;

/// `POST /api/auth/send-verification-code`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SendCodeRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// `POST /api/auth/verify-email`
///
/// 토큰 존재 여부는 서비스에서 확인해 전용 메시지로 응답합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyEmailRequest {
    pub token: Option<String>,
}

/// `POST /api/auth/resend-verification`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    pub email: Option<String>,
}
