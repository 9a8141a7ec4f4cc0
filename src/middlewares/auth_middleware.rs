//! JWT 인증 미들웨어
//!
//! 스코프에 `.wrap(AuthMiddleware::required())`로 붙이면 해당 스코프의 모든 라우트가
//! 유효한 bearer 토큰을 요구합니다. 통과한 요청에는 [`AuthenticatedUser`]와
//! [`BearerToken`]이 extensions로 실립니다.
//!
//! 거부 사유별 응답:
//!
//! | 상황 | 상태 |
//! |------|------|
//! | `Authorization` 헤더 없음/형식 오류 | 401 |
//! | 서명 불일치, 만료 | 401 |
//! | 로그아웃된 토큰 | 401 |
//! | 토큰의 사용자가 삭제됨 | 401 |
//! | `verified_email()` 스코프에서 미인증 사용자 | 403 |
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser
//! [`BearerToken`]: crate::domain::models::auth::BearerToken

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use crate::domain::models::auth::AuthRequirement;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    requirement: AuthRequirement,
}

impl AuthMiddleware {
    pub fn new(requirement: AuthRequirement) -> Self {
        Self { requirement }
    }

    /// 유효한 토큰만 요구합니다.
    pub fn required() -> Self {
        Self::new(AuthRequirement::Authenticated)
    }

    /// 이메일 인증을 마친 사용자만 허용합니다.
    pub fn verified_email() -> Self {
        Self::new(AuthRequirement::VerifiedEmail)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            requirement: self.requirement,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_requirement() {
        assert_eq!(AuthMiddleware::required().requirement, AuthRequirement::Authenticated);
        assert!(AuthMiddleware::verified_email().requirement.requires_verified_email());
        assert!(!AuthRequirement::Authenticated.requires_verified_email());
    }
}
