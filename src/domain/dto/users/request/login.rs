//! 로그인 요청

use serde::Deserialize;
use validator::Validate;
use crate::core::errors::AppError;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/auth/login`
///
/// 비밀번호와 이메일 인증 코드 중 정확히 하나를 보내야 합니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    pub password: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,
}

/// 로그인 수단
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod {
    Password(String),
    Code(String),
}

impl LoginRequest {
    /// 요청에서 로그인 수단을 하나 골라냅니다.
    pub fn method(&self) -> Result<LoginMethod, AppError> {
        let password = self.password.as_ref().filter(|p| !p.is_empty());

        match (password, &self.code) {
            (Some(password), None) => Ok(LoginMethod::Password(password.clone())),
            (None, Some(code)) => Ok(LoginMethod::Code(code.clone())),
            (Some(_), Some(_)) => Err(AppError::ValidationError(
                "비밀번호와 인증 코드 중 하나만 입력해주세요".to_string(),
            )),
            (None, None) => Err(AppError::ValidationError(
                "비밀번호 또는 인증 코드를 입력해주세요".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LoginRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_password_login() {
        let request = parse(r#"{"email":"runner@example.com","password":"secret1"}"#);
        assert!(request.validate().is_ok());
        assert_eq!(request.method().unwrap(), LoginMethod::Password("secret1".to_string()));
    }

    #[test]
    fn test_code_login() {
        let request = parse(r#"{"email":"runner@example.com","code":" 123456 "}"#);
        assert_eq!(request.method().unwrap(), LoginMethod::Code("123456".to_string()));
    }

    #[test]
    fn test_requires_exactly_one_method() {
        let neither = parse(r#"{"email":"runner@example.com"}"#);
        assert!(matches!(neither.method(), Err(AppError::ValidationError(_))));

        let both = parse(r#"{"email":"runner@example.com","password":"x","code":"123456"}"#);
        assert!(matches!(both.method(), Err(AppError::ValidationError(_))));

        let empty_password = parse(r#"{"email":"runner@example.com","password":""}"#);
        assert!(empty_password.method().is_err());
    }

    #[test]
    fn test_invalid_email() {
        let request = parse(r#"{"email":"nope","password":"secret1"}"#);
        assert!(request.validate().is_err());
    }
}
