//! 이메일 인증 관련 엔티티
//!
//! 세 문서 모두 "한 번만 쓸 수 있고 기한이 있는 비밀값"이라는 같은 수명 주기를 가집니다.
//! 발급 → (사용 | 만료) 이외의 전이는 없습니다.

pub mod email_verification;
pub mod verification_code;
pub mod password_reset;

pub use email_verification::EmailVerification;
pub use verification_code::{CodeAttempt, CodePurpose, EmailVerificationCode};
pub use password_reset::PasswordReset;

use mongodb::bson::DateTime;

/// 발급 시각으로부터 `ttl_secs` 뒤의 만료 시각
pub(crate) fn expiry_from(issued_at: DateTime, ttl_secs: i64) -> DateTime {
    DateTime::from_millis(issued_at.timestamp_millis() + ttl_secs * 1000)
}

/// 일회용 비밀값을 쓸 수 없는 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unusable {
    Used,
    Expired,
}

/// `is_used` / `expires_at`를 가진 일회용 문서의 공통 판정
pub trait SingleUse {
    fn is_used(&self) -> bool;
    fn expires_at(&self) -> DateTime;

    fn is_expired_at(&self, now: DateTime) -> bool {
        now.timestamp_millis() > self.expires_at().timestamp_millis()
    }

    /// 사용 여부를 먼저, 만료를 그다음에 봅니다.
    fn check_usable_at(&self, now: DateTime) -> Result<(), Unusable> {
        if self.is_used() {
            return Err(Unusable::Used);
        }
        if self.is_expired_at(now) {
            return Err(Unusable::Expired);
        }
        Ok(())
    }

    fn check_usable(&self) -> Result<(), Unusable> {
        self.check_usable_at(DateTime::now())
    }
}
