//! 이메일 인증 링크 토큰 (`email_verifications` 컬렉션)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::utils::random::hex_token;
use super::{expiry_from, SingleUse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// 32바이트 난수의 hex 표현 (64자)
    pub token: String,
    pub user_id: ObjectId,
    pub expires_at: DateTime,
    #[serde(default)]
    pub is_used: bool,
    pub created_at: DateTime,
}

impl EmailVerification {
    /// 새 토큰을 발급합니다.
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

impl SingleUse for EmailVerification {
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
    use crate::domain::entities::verifications::Unusable;

    #[test]
    fn test_issue_sets_24h_expiry_and_hex_token() {
        let verification = EmailVerification::issue("runner@example.com", ObjectId::new(), 86_400);

        assert_eq!(verification.token.len(), 64);
        assert!(verification.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            verification.expires_at.timestamp_millis() - verification.created_at.timestamp_millis(),
            86_400_000
        );
        assert!(verification.check_usable().is_ok());
    }

    #[test]
    fn test_used_token_is_rejected_before_expiry_check() {
        let mut verification = EmailVerification::issue("runner@example.com", ObjectId::new(), -10);
        verification.is_used = true;

        assert_eq!(verification.check_usable(), Err(Unusable::Used));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verification = EmailVerification::issue("runner@example.com", ObjectId::new(), 60);
        let later = DateTime::from_millis(verification.expires_at.timestamp_millis() + 1);

        assert_eq!(verification.check_usable_at(later), Err(Unusable::Expired));
        assert!(verification.check_usable_at(verification.expires_at).is_ok());
    }
}
