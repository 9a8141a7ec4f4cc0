//! 회원가입 요청

use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/auth/register`
///
/// 빠진 필드는 빈 문자열로 읽어 검증 메시지로 응답합니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: String,

    /// 없으면 이메일 로컬 파트를 씁니다.
    #[serde(deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 2, max = 20, message = "사용자명은 2-20자 사이여야 합니다"))]
    pub username: Option<String>,
}
