use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AuthRequirement, AuthenticatedUser, BearerToken};
use crate::services::auth::token_service::{decode_token, extract_bearer_token, TokenService};
use crate::services::users::UserService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub requirement: AuthRequirement,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let requirement = self.requirement;

        Box::pin(async move {
            let outcome = authenticate(&req).await.and_then(|(user, bearer)| {
                if requirement.requires_verified_email() && !user.is_email_verified {
                    return Err(AppError::AuthorizationError("이메일 인증이 필요합니다".to_string()));
                }
                Ok((user, bearer))
            });

            match outcome {
                Ok((user, bearer)) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(bearer);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("인증 거부 {} {}: {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

/// 헤더 → 서명/만료 → 블랙리스트 → 사용자 존재 순으로 확인합니다.
///
/// 앞 단계에서 실패하면 Redis와 MongoDB에 접근하지 않습니다.
async fn authenticate(req: &ServiceRequest) -> Result<(AuthenticatedUser, BearerToken), AppError> {
    let auth_header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("로그인이 필요합니다".to_string()))?;

    let token = extract_bearer_token(auth_header)?;
    let claims = decode_token(token, &JwtConfig::secret())?;

    TokenService::instance().ensure_not_revoked(token).await?;

    let user = UserService::instance()
        .find_by_id(&claims.sub)
        .await
        .map_err(|e| match e {
            AppError::ValidationError(_) => {
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
            other => other,
        })?
        .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

    let authenticated = AuthenticatedUser::from_user(&user)
        .ok_or_else(|| AppError::AuthenticationError("사용자가 존재하지 않습니다".to_string()))?;

    Ok((
        authenticated,
        BearerToken { token: token.to_string(), expires_at: claims.exp },
    ))
}
