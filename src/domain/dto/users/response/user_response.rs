//! 사용자 응답 DTO
//!
//! 엔드포인트마다 노출 필드가 다르므로 용도별로 나눠 둡니다.
//! 모두 camelCase로 직렬화되고 비밀번호 해시는 포함하지 않습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

fn rfc3339(date: DateTime) -> String {
    date.try_to_rfc3339_string().unwrap_or_default()
}

fn hex_id(user: &User) -> String {
    user.id_string().unwrap_or_default()
}

/// 로그인 응답에 담기는 전체 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub is_email_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: hex_id(user),
            email: user.email.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            is_email_verified: user.is_email_verified,
            created_at: rfc3339(user.created_at),
            updated_at: rfc3339(user.updated_at),
        }
    }
}

/// 가입 직후 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_email_verified: bool,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            id: hex_id(user),
            email: user.email.clone(),
            username: user.username.clone(),
            is_email_verified: user.is_email_verified,
        }
    }
}

/// `/me`, `/profile` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub is_email_verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: hex_id(user),
            email: user.email.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            is_email_verified: user.is_email_verified,
        }
    }
}

/// `{"user": ...}` 래퍼
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

impl<T> UserEnvelope<T> {
    pub fn new(user: T) -> Self {
        Self { user }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn user() -> User {
        let mut user = User::new(
            "runner@example.com".to_string(),
            "runner".to_string(),
            "$2b$04$hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_user_response_is_camel_case_without_password() {
        let user = user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["id"], user.id_string().unwrap());
        assert_eq!(json["isEmailVerified"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json["avatar"].is_null());
    }

    #[test]
    fn test_registered_user_fields() {
        let json = serde_json::to_value(UserEnvelope::new(RegisteredUser::from(&user()))).unwrap();
        let fields: Vec<_> = json["user"].as_object().unwrap().keys().cloned().collect();

        assert_eq!(fields.len(), 4);
        assert!(fields.contains(&"isEmailVerified".to_string()));
    }

    #[test]
    fn test_timestamps_are_rfc3339() {
        let response = UserResponse::from(&user());
        assert!(response.created_at.contains('T'));
        assert!(response.created_at.ends_with('Z'));
    }
}
