//! 사용자 엔티티
//!
//! MongoDB `users` 컬렉션의 문서 구조입니다. `email`에는 유니크 인덱스가 걸립니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 러닝 트래커 계정
///
/// 가입 직후에는 `is_email_verified`가 false이며 인증 링크나
/// 로그인 코드로 이메일 소유가 확인되면 true가 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub email: String,

    pub username: String,

    /// bcrypt 해시. 평문 비밀번호는 어디에도 저장하지 않습니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default)]
    pub is_email_verified: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl User {
    /// 이메일/비밀번호 가입으로 만들어지는 미인증 사용자
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username,
            password_hash: Some(password_hash),
            avatar: None,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// 이메일 로컬 파트를 기본 사용자명으로 씁니다.
///
/// `runner@example.com` → `runner`
pub fn default_username(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
