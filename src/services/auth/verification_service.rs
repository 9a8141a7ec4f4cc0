//! 이메일 인증 흐름
//!
//! - 가입/재발송 시 인증 링크 발급과 소비
//! - 로그인용 6자리 코드 발급과 확인
//! - 비밀번호 재설정 링크 발급과 소비
//!
//! 모든 비밀값은 한 번만 쓸 수 있고 기한이 지나면 거부됩니다.

use std::sync::Arc;
use mongodb::bson::DateTime;
use singleton_macro::service;
use crate::{
    config::{MailConfig, VerificationConfig},
    core::errors::AppError,
    domain::entities::{
        users::user::User,
        verifications::{
            CodeAttempt, CodePurpose, EmailVerification, EmailVerificationCode, PasswordReset, SingleUse, Unusable,
        },
    },
    repositories::verifications::{CodeRepository, ResetRepository, VerificationRepository},
    services::{
        mail::{templates, MailService},
        users::user_service::UserService,
    },
};

/// 코드 로그인 실패 공통 메시지. 이메일 미존재와 코드 불일치를 구분하지 않습니다.
pub const INVALID_CODE_CREDENTIALS: &str = "이메일 또는 인증 코드가 올바르지 않습니다";

fn verification_token_error(reason: Unusable) -> AppError {
    match reason {
        Unusable::Used => AppError::ValidationError("이미 사용된 인증 토큰입니다".to_string()),
        Unusable::Expired => {
            AppError::ValidationError("인증 토큰이 만료되었습니다. 다시 요청해주세요".to_string())
        }
    }
}

fn reset_token_error(reason: Unusable) -> AppError {
    match reason {
        Unusable::Used => AppError::ValidationError("이미 사용된 재설정 토큰입니다".to_string()),
        Unusable::Expired => {
            AppError::ValidationError("재설정 토큰이 만료되었습니다. 다시 요청해주세요".to_string())
        }
    }
}

/// 직전 코드가 재발송 대기 시간 안이면 429
fn check_code_cooldown(
    latest: Option<&EmailVerificationCode>,
    now: DateTime,
    cooldown_secs: i64,
) -> Result<(), AppError> {
    match latest {
        Some(code) if code.is_in_cooldown_at(now, cooldown_secs) => Err(AppError::TooManyRequests(format!(
            "인증 코드는 {}초 후에 다시 요청할 수 있습니다",
            cooldown_secs
        ))),
        _ => Ok(()),
    }
}

fn user_object_id(user: &User) -> Result<mongodb::bson::oid::ObjectId, AppError> {
    user.id
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
}

#[service(name = "verification")]
pub struct VerificationService {
    verification_repo: Arc<VerificationRepository>,
    code_repo: Arc<CodeRepository>,
    reset_repo: Arc<ResetRepository>,
    user_service: Arc<UserService>,
    mail_service: Arc<MailService>,
}

impl VerificationService {
    /// 인증 링크를 발급하고 메일로 보냅니다.
    pub async fn send_email_verification(&self, user: &User) -> Result<(), AppError> {
        let verification = EmailVerification::issue(
            &user.email,
            user_object_id(user)?,
            VerificationConfig::email_token_ttl_secs(),
        );
        let verification = self.verification_repo.insert(verification).await?;

        let mail = templates::email_verification(
            &user.email,
            &MailConfig::frontend_url(),
            &verification.token,
        );
        self.mail_service.send(mail).await
    }

    /// 인증 링크 토큰을 소비하고 사용자를 인증 상태로 바꿉니다.
    pub async fn verify_email(&self, token: &str) -> Result<User, AppError> {
        let verification = self
            .verification_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::ValidationError("유효하지 않은 인증 토큰입니다".to_string()))?;

        verification.check_usable().map_err(verification_token_error)?;

        let verification_id = verification
            .id
            .ok_or_else(|| AppError::InternalError("인증 기록 ID가 없습니다".to_string()))?;

        // 동시에 같은 토큰으로 들어온 요청 중 하나만 통과합니다.
        if !self.verification_repo.mark_used(verification_id).await? {
            return Err(verification_token_error(Unusable::Used));
        }

        let user = self
            .user_service
            .mark_email_verified(&verification.user_id.to_hex())
            .await?;

        log::info!("✅ 이메일 인증 완료: user_id={}", verification.user_id.to_hex());
        Ok(user)
    }

    /// 아직 인증하지 않은 사용자에게 새 인증 링크를 보냅니다.
    pub async fn resend_verification(&self, email: &str) -> Result<(), AppError> {
        let user = self.user_service.get_by_email(email).await?;

        if user.is_email_verified {
            return Err(AppError::ValidationError("이미 인증된 이메일입니다".to_string()));
        }

        self.send_email_verification(&user).await
    }

    /// 로그인 코드를 발급합니다.
    ///
    /// 재발송 대기 시간 안이면 429. 새 코드를 만들기 전에 이전 미사용 코드를 무효화합니다.
    pub async fn send_login_code(&self, email: &str) -> Result<(), AppError> {
        let purpose = CodePurpose::Login;
        self.user_service.get_by_email(email).await?;

        let latest = self.code_repo.find_latest(email, purpose).await?;
        check_code_cooldown(latest.as_ref(), DateTime::now(), VerificationConfig::code_cooldown_secs())?;

        self.code_repo.invalidate_unused(email, purpose).await?;

        let ttl_minutes = VerificationConfig::code_ttl_minutes();
        let code = EmailVerificationCode::issue(email, purpose, VerificationConfig::CODE_LENGTH, ttl_minutes);
        let code = self.code_repo.insert(code).await?;

        self.mail_service
            .send(templates::login_code(email, &code.code, ttl_minutes))
            .await
    }

    /// 로그인 코드를 확인하고 소비합니다.
    ///
    /// 비교 전에 시도 하나를 선점합니다. 한도를 다 쓴 코드는 선점이 실패하고,
    /// 마지막 시도까지 틀리면 코드를 무효화합니다.
    pub async fn consume_login_code(&self, email: &str, candidate: &str) -> Result<(), AppError> {
        let invalid = || AppError::AuthenticationError(INVALID_CODE_CREDENTIALS.to_string());
        let max_attempts = VerificationConfig::MAX_CODE_ATTEMPTS;

        let code = self
            .code_repo
            .find_active(email, CodePurpose::Login)
            .await?
            .ok_or_else(invalid)?;
        code.check_usable().map_err(|_| invalid())?;

        let code_id = code
            .id
            .ok_or_else(|| AppError::InternalError("인증 코드 ID가 없습니다".to_string()))?;

        let Some(claimed) = self.code_repo.claim_attempt(code_id, max_attempts).await? else {
            return Err(invalid());
        };

        match claimed.judge_attempt(candidate, max_attempts) {
            CodeAttempt::Accepted => {
                if !self.code_repo.mark_used(code_id).await? {
                    return Err(invalid());
                }
                Ok(())
            }
            CodeAttempt::Rejected => Err(invalid()),
            CodeAttempt::Locked => {
                self.code_repo.mark_used(code_id).await?;
                log::warn!("⚠️ 인증 코드 시도 한도 초과로 무효화");
                Err(invalid())
            }
        }
    }

    /// 재설정 링크를 보냅니다. 계정이 없으면 아무것도 하지 않습니다.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_service.find_by_email(email).await? else {
            log::info!("비밀번호 재설정 요청: 가입되지 않은 이메일");
            return Ok(());
        };

        let user_id = user_object_id(&user)?;
        self.reset_repo.invalidate_for_user(user_id).await?;

        let reset = PasswordReset::issue(&user.email, user_id, VerificationConfig::password_reset_ttl_secs());
        let reset = self.reset_repo.insert(reset).await?;

        let mail = templates::password_reset(&user.email, &MailConfig::frontend_url(), &reset.token);
        self.mail_service.send(mail).await
    }

    /// 재설정 토큰을 소비하고 비밀번호를 바꿉니다.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let reset = self
            .reset_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::ValidationError("유효하지 않은 재설정 토큰입니다".to_string()))?;

        reset.check_usable().map_err(reset_token_error)?;

        let reset_id = reset
            .id
            .ok_or_else(|| AppError::InternalError("재설정 기록 ID가 없습니다".to_string()))?;

        if !self.reset_repo.mark_used(reset_id).await? {
            return Err(reset_token_error(Unusable::Used));
        }

        self.user_service
            .change_password(&reset.user_id.to_hex(), new_password)
            .await?;

        log::info!("🔒 비밀번호 재설정 완료: user_id={}", reset.user_id.to_hex());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_are_bad_requests() {
        use actix_web::ResponseError;

        for reason in [Unusable::Used, Unusable::Expired] {
            assert_eq!(verification_token_error(reason).status_code(), 400);
            assert_eq!(reset_token_error(reason).status_code(), 400);
        }
    }

    #[test]
    fn test_code_cooldown_returns_too_many_requests() {
        use actix_web::ResponseError;

        let code = EmailVerificationCode::issue("runner@example.com", CodePurpose::Login, 6, 10);
        let soon = DateTime::from_millis(code.created_at.timestamp_millis() + 30_000);
        let later = DateTime::from_millis(code.created_at.timestamp_millis() + 61_000);

        let err = check_code_cooldown(Some(&code), soon, 60).unwrap_err();
        assert_eq!(err.status_code(), 429);
        assert!(err.to_string().contains("60초"));

        assert!(check_code_cooldown(Some(&code), later, 60).is_ok());
        assert!(check_code_cooldown(None, soon, 60).is_ok());
    }

    #[test]
    fn test_token_error_messages_differ() {
        assert_ne!(
            verification_token_error(Unusable::Used).to_string(),
            verification_token_error(Unusable::Expired).to_string()
        );
    }
}
