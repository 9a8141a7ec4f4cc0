//! 비밀번호 재설정 요청

use serde::Deserialize;
use validator::Validate;

/// `POST /api/auth/forgot-password`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// `POST /api/auth/reset-password`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "재설정 토큰이 필요합니다"))]
    pub token: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: String,
}
