//! `/api/auth` 핸들러

use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::{
        dto::{
            api_response::ApiResponse,
            users::{
                request::{
                    EmailRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
                    ResetPasswordRequest, SendCodeRequest, UpdateProfileRequest, VerifyEmailRequest,
                },
                response::{RegisteredUser, UserEnvelope, UserProfile},
            },
        },
        models::auth::{AuthenticatedUser, BearerToken},
    },
    services::{
        auth::{AuthService, VerificationService},
        users::UserService,
    },
    utils::string_utils::{normalize_email, validate_required_string},
};

/// `POST /api/auth/register`
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = AuthService::instance().register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        "회원가입이 완료되었습니다. 인증 메일을 확인해주세요",
        UserEnvelope::new(RegisteredUser::from(&user)),
    )))
}

/// `POST /api/auth/login`
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message("로그인되었습니다", response)))
}

/// `POST /api/auth/send-verification-code`
pub async fn send_verification_code(payload: web::Json<SendCodeRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    VerificationService::instance()
        .send_login_code(&normalize_email(&payload.email))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("인증 코드가 이메일로 발송되었습니다")))
}

/// `POST /api/auth/verify-email`
pub async fn verify_email(payload: web::Json<VerifyEmailRequest>) -> Result<HttpResponse, AppError> {
    let token = validate_required_string(payload.token.as_deref(), "인증 토큰이 필요합니다")?;

    VerificationService::instance().verify_email(&token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("이메일 인증이 완료되었습니다")))
}

/// `POST /api/auth/resend-verification`
pub async fn resend_verification(payload: web::Json<EmailRequest>) -> Result<HttpResponse, AppError> {
    let email = validate_required_string(payload.email.as_deref(), "이메일 주소가 필요합니다")?;

    VerificationService::instance()
        .resend_verification(&normalize_email(&email))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("인증 메일이 다시 발송되었습니다")))
}

/// `POST /api/auth/forgot-password`
///
/// 가입 여부와 관계없이 같은 응답을 돌려줍니다.
pub async fn forgot_password(payload: web::Json<ForgotPasswordRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if let Err(e) = VerificationService::instance()
        .request_password_reset(&normalize_email(&payload.email))
        .await
    {
        log::error!("❌ 비밀번호 재설정 메일 처리 실패: {}", e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "가입된 이메일이라면 비밀번호 재설정 안내가 발송됩니다",
    )))
}

/// `POST /api/auth/reset-password`
pub async fn reset_password(payload: web::Json<ResetPasswordRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    VerificationService::instance()
        .reset_password(payload.token.trim(), &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("비밀번호가 변경되었습니다")))
}

/// `GET /api/auth/me`
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let current = UserService::instance().get_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserEnvelope::new(UserProfile::from(&current)))))
}

/// `PUT /api/auth/profile`
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = UserService::instance()
        .update_profile(&user.user_id, &payload)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "프로필이 수정되었습니다",
        UserEnvelope::new(UserProfile::from(&updated)),
    )))
}

/// `POST /api/auth/logout`
pub async fn logout(user: AuthenticatedUser, bearer: BearerToken) -> Result<HttpResponse, AppError> {
    AuthService::instance()
        .logout(&user.user_id, &bearer.token, bearer.expires_at)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다")))
}
