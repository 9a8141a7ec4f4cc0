//! 인증된 요청의 사용자 컨텍스트
//!
//! 인증 미들웨어가 요청 extensions에 넣고, 핸들러는 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let profile = user_service.get_profile(&user.user_id).await?;
//!     ...
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::entities::users::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub is_email_verified: bool,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            user_id: user.id_string()?,
            email: user.email.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            is_email_verified: user.is_email_verified,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "로그인이 필요합니다".to_string(),
            ))),
        }
    }
}

/// 요청에 실린 원본 bearer 토큰과 만료 시각
///
/// 로그아웃 시 블랙리스트 TTL 계산에 씁니다.
#[derive(Debug, Clone)]
pub struct BearerToken {
    pub token: String,
    pub expires_at: i64,
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<BearerToken>() {
            Some(token) => ready(Ok(token.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "로그인이 필요합니다".to_string(),
            ))),
        }
    }
}
