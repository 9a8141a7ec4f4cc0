//! JWT 발급/검증과 로그아웃 토큰 폐기

use std::sync::Arc;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    core::errors::AppError,
    domain::{entities::users::user::User, models::token::TokenClaims},
    repositories::tokens::token_repository::TokenRepository,
};

/// `sub`에 대한 새 클레임. `jti`는 매번 새 UUID입니다.
pub fn new_claims(user_id: &str, issued_at: i64, ttl_secs: i64) -> TokenClaims {
    TokenClaims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: issued_at,
        exp: issued_at + ttl_secs,
    }
}

pub fn encode_token(claims: &TokenClaims, secret: &str) -> Result<String, AppError> {
    encode(&Header::new(Algorithm::HS256), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

/// 서명과 만료를 검증합니다. 어떤 디코딩 실패든 401입니다.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
        })
}

/// `Authorization` 헤더에서 bearer 토큰을 꺼냅니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let mut parts = auth_header.trim().splitn(2, ' ');
    match (parts.next(), parts.next().map(str::trim)) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() => Ok(token),
        _ => Err(AppError::AuthenticationError(
            "유효하지 않은 인증 헤더 형식입니다".to_string(),
        )),
    }
}

#[service(name = "token")]
pub struct TokenService {
    token_repo: Arc<TokenRepository>,
}

impl TokenService {
    /// 사용자에게 액세스 토큰을 발급합니다.
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let claims = new_claims(&user_id, Utc::now().timestamp(), JwtConfig::expires_in_secs());
        encode_token(&claims, &JwtConfig::secret())
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_token(token, &JwtConfig::secret())
    }

    /// 토큰을 만료 시각까지 사용할 수 없게 합니다.
    pub async fn revoke(&self, token: &str, expires_at: i64) -> Result<(), AppError> {
        let remaining = (expires_at - Utc::now().timestamp()).max(0) as u64;
        if remaining == 0 {
            return Ok(());
        }
        self.token_repo.blacklist(token, remaining).await
    }

    pub async fn ensure_not_revoked(&self, token: &str) -> Result<(), AppError> {
        if self.token_repo.is_blacklisted(token).await? {
            return Err(AppError::AuthenticationError("로그아웃된 토큰입니다".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_encode_then_decode() {
        let now = Utc::now().timestamp();
        let claims = new_claims("64b7f0c2e4b0a1a2b3c4d5e6", now, 3600);
        let token = encode_token(&claims, SECRET).unwrap();

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "64b7f0c2e4b0a1a2b3c4d5e6");
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let now = Utc::now().timestamp();
        let a = encode_token(&new_claims("u", now, 60), SECRET).unwrap();
        let b = encode_token(&new_claims("u", now, 60), SECRET).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let past = Utc::now().timestamp() - 7200;
        let token = encode_token(&new_claims("u", past, 60), SECRET).unwrap();

        match decode_token(&token, SECRET) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "토큰이 만료되었습니다"),
            other => panic!("Expected AuthenticationError, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_and_garbage_are_unauthorized() {
        let token = encode_token(&new_claims("u", Utc::now().timestamp(), 60), SECRET).unwrap();

        assert!(matches!(decode_token(&token, "other"), Err(AppError::AuthenticationError(_))));
        assert!(matches!(decode_token("garbage", SECRET), Err(AppError::AuthenticationError(_))));
        assert!(matches!(decode_token("", SECRET), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(extract_bearer_token("bearer   abc").unwrap(), "abc");
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("abc").is_err());
    }
}
