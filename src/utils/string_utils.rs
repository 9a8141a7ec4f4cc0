//! 요청 입력 문자열 정리

use serde::Deserialize;
use crate::core::errors::AppError;

/// 앞뒤 공백을 제거하고 비어 있으면 `ValidationError`를 반환합니다.
///
/// `message`는 그대로 클라이언트 응답 메시지가 됩니다.
pub fn validate_required_string(value: Option<&str>, message: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(AppError::ValidationError(message.to_string())),
    }
}

/// 공백뿐인 값은 `None`으로 취급합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 비교용 정규화 (공백 제거 + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `#[serde(deserialize_with = ...)]`용. 빈 문자열과 null을 `None`으로 읽습니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
