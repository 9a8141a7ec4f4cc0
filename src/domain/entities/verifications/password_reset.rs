//! 비밀번호 재설정 토큰 (`password_resets` 컬렉션)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::utils::random::hex_token;
use super::{expiry_from, SingleUse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub token: String,
    pub user_id: ObjectId,
    pub expires_at: DateTime,
    #[serde(default)]
    pub is_used: bool,
    pub created_at: DateTime,
}

impl PasswordReset {
    pub fn issue(email: &str, user_id: ObjectId, ttl_secs: i64) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            email: email.to_string(),
            token: hex_token(),
            user_id,
            expires_at: expiry_from(now, ttl_secs),
            is_used: false,
            created_at: now,
        }
    }
}

impl SingleUse for PasswordReset {
    fn is_used(&self) -> bool {
        self.is_used
    }

    fn expires_at(&self) -> DateTime {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_tokens_are_unique() {
        let user_id = ObjectId::new();
        let a = PasswordReset::issue("runner@example.com", user_id, 3_600);
        let b = PasswordReset::issue("runner@example.com", user_id, 3_600);

        assert_ne!(a.token, b.token);
        assert_eq!(a.user_id, b.user_id);
    }
}
