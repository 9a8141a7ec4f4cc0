//! 로그인용 6자리 인증 코드 (`email_verification_codes` 컬렉션)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::utils::random::numeric_code;
use super::{expiry_from, SingleUse};

/// 코드 용도. 현재는 로그인만 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Login,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Login => "login",
        }
    }
}

/// 선점한 시도 하나의 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAttempt {
    Accepted,
    Rejected,
    /// 틀렸고 이번 시도로 한도를 다 썼음
    Locked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerificationCode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub code: String,
    pub purpose: CodePurpose,
    pub expires_at: DateTime,
    #[serde(default)]
    pub is_used: bool,
    /// 확인 시도 횟수. 비교 전에 먼저 올립니다.
    #[serde(default)]
    pub attempts: i32,
    pub created_at: DateTime,
}

impl EmailVerificationCode {
    pub fn issue(email: &str, purpose: CodePurpose, length: usize, ttl_minutes: i64) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            email: email.to_string(),
            code: numeric_code(length),
            purpose,
            expires_at: expiry_from(now, ttl_minutes * 60),
            is_used: false,
            attempts: 0,
            created_at: now,
        }
    }

    /// 시도 한도를 다 썼는지
    pub fn is_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// 시도 횟수를 이미 올린 코드로 입력값을 판정합니다.
    pub fn judge_attempt(&self, candidate: &str, max_attempts: i32) -> CodeAttempt {
        if self.matches(candidate) {
            CodeAttempt::Accepted
        } else if self.is_exhausted(max_attempts) {
            CodeAttempt::Locked
        } else {
            CodeAttempt::Rejected
        }
    }

    /// 재발송 대기 시간이 아직 남았는지
    pub fn is_in_cooldown_at(&self, now: DateTime, cooldown_secs: i64) -> bool {
        now.timestamp_millis() - self.created_at.timestamp_millis() < cooldown_secs * 1000
    }

    /// 입력값과 코드 비교. 앞뒤 공백은 무시합니다.
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        candidate.len() == self.code.len()
            && candidate
                .bytes()
                .zip(self.code.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl SingleUse for EmailVerificationCode {
    fn is_used(&self) -> bool {
        self.is_used
    }

    fn expires_at(&self) -> DateTime {
        self.expires_at
    }
}
