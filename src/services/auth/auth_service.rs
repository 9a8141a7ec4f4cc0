//! 회원가입, 로그인, 로그아웃

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::users::{
            request::{LoginMethod, LoginRequest, RegisterRequest},
            response::{LoginResponse, UserResponse},
        },
        entities::users::user::User,
    },
    services::{
        auth::{
            token_service::TokenService,
            verification_service::{VerificationService, INVALID_CODE_CREDENTIALS},
        },
        users::user_service::UserService,
    },
    utils::string_utils::normalize_email,
};

#[service(name = "auth")]
pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
    verification_service: Arc<VerificationService>,
}

impl AuthService {
    /// 계정을 만들고 인증 메일을 보냅니다.
    ///
    /// 메일 발송이 실패하면 계정은 남고 요청은 500으로 끝납니다.
    /// 사용자는 재발송으로 다시 인증 메일을 받을 수 있습니다.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&request.email);

        let user = self
            .user_service
            .create_user(&email, &request.password, request.username)
            .await?;

        log::info!("👤 회원가입: user_id={}", user.id_string().unwrap_or_default());

        self.verification_service.send_email_verification(&user).await?;
        Ok(user)
    }

    /// 비밀번호 또는 이메일 코드로 로그인하고 JWT를 발급합니다.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let method = request.method()?;
        let email = normalize_email(&request.email);

        let user = match method {
            LoginMethod::Password(password) => {
                self.user_service.verify_password(&email, &password).await
            }
            LoginMethod::Code(code) => self.login_with_code(&email, &code).await,
        }
        .inspect_err(|e| {
            if matches!(e, AppError::AuthenticationError(_)) {
                log::warn!("🚫 로그인 실패");
            }
        })?;

        let token = self.token_service.generate_access_token(&user)?;
        log::info!("🔓 로그인: user_id={}", user.id_string().unwrap_or_default());

        Ok(LoginResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// 코드 로그인. 성공하면 이메일 소유가 확인된 것이므로 인증 상태로 바꿉니다.
    async fn login_with_code(&self, email: &str, code: &str) -> Result<User, AppError> {
        let user = self
            .user_service
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CODE_CREDENTIALS.to_string()))?;

        self.verification_service.consume_login_code(email, code).await?;

        if user.is_email_verified {
            return Ok(user);
        }

        let id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        self.user_service.mark_email_verified(&id).await
    }

    /// 토큰을 만료 시각까지 폐기합니다.
    pub async fn logout(&self, user_id: &str, token: &str, expires_at: i64) -> Result<(), AppError> {
        self.token_service.revoke(token, expires_at).await?;
        log::info!("👋 로그아웃: user_id={}", user_id);
        Ok(())
    }
}
