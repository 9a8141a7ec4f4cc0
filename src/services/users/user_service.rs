//! 사용자 계정 비즈니스 로직
//!
//! 비밀번호 해싱/검증과 프로필 갱신을 담당합니다. bcrypt는 CPU를 오래 쓰므로
//! actix 블로킹 스레드 풀에서 실행합니다.

use std::sync::Arc;
use actix_web::web;
use mongodb::bson::{doc, Document};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::errors::{AppError, ErrorContext},
    domain::{
        dto::users::request::UpdateProfileRequest,
        entities::users::user::{default_username, User},
    },
    repositories::users::user_repo::UserRepository,
};

/// 이메일 미존재와 비밀번호 불일치에 똑같이 쓰는 메시지
pub const INVALID_PASSWORD_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다";

pub(crate) fn not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

/// 블로킹 풀에서 bcrypt 해시를 만듭니다.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    let cost = PasswordConfig::bcrypt_cost();

    web::block(move || bcrypt::hash(password, cost))
        .await
        .context("비밀번호 해싱 작업 실패")?
        .context("비밀번호 해싱 실패")
}

/// 블로킹 풀에서 bcrypt 해시를 검증합니다.
pub async fn verify_password_hash(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    web::block(move || bcrypt::verify(password, &password_hash))
        .await
        .context("비밀번호 검증 작업 실패")?
        .context("비밀번호 검증 실패")
}

/// 프로필 요청을 `$set` 문서로 바꿉니다. 바꿀 값이 없으면 빈 문서입니다.
fn profile_update_document(request: &UpdateProfileRequest) -> Document {
    let mut set_doc = doc! {};
    if let Some(username) = &request.username {
        set_doc.insert("username", username.as_str());
    }
    if let Some(avatar) = &request.avatar {
        set_doc.insert("avatar", avatar.as_str());
    }
    set_doc
}

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 미인증 상태의 새 사용자를 만듭니다. 사용자명이 없으면 이메일 로컬 파트를 씁니다.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        username: Option<String>,
    ) -> Result<User, AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::ConflictError("이미 가입된 이메일입니다".to_string()));
        }

        let started = std::time::Instant::now();
        let password_hash = hash_password(password).await?;
        log::debug!("Password hashing took: {:?}", started.elapsed());

        let username = username.unwrap_or_else(|| default_username(email));
        let user = User::new(email.to_string(), username, password_hash);

        self.user_repo.create(user).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_email(email).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(id).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, AppError> {
        self.user_repo.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        self.user_repo.find_by_email(email).await?.ok_or_else(not_found)
    }

    /// 이메일/비밀번호를 확인합니다.
    ///
    /// 계정 존재 여부가 드러나지 않도록 모든 실패를 같은 401 메시지로 돌려줍니다.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::AuthenticationError(INVALID_PASSWORD_CREDENTIALS.to_string());

        let user = self.user_repo.find_by_email(email).await?.ok_or_else(invalid)?;
        let password_hash = user.password_hash.as_deref().ok_or_else(invalid)?;

        if !verify_password_hash(password, password_hash).await? {
            return Err(invalid());
        }

        Ok(user)
    }

    pub async fn mark_email_verified(&self, id: &str) -> Result<User, AppError> {
        self.user_repo.mark_email_verified(id).await?.ok_or_else(not_found)
    }

    pub async fn change_password(&self, id: &str, new_password: &str) -> Result<User, AppError> {
        let password_hash = hash_password(new_password).await?;
        self.user_repo
            .update_password_hash(id, &password_hash)
            .await?
            .ok_or_else(not_found)
    }

    /// 보낸 값만 갱신합니다. 바꿀 값이 없으면 현재 사용자를 그대로 반환합니다.
    pub async fn update_profile(&self, id: &str, request: &UpdateProfileRequest) -> Result<User, AppError> {
        let set_doc = profile_update_document(request);
        if set_doc.is_empty() {
            return self.get_user(id).await;
        }

        self.user_repo.update(id, set_doc).await?.ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_document() {
        let request = UpdateProfileRequest {
            username: Some("새러너".to_string()),
            avatar: None,
        };
        let set_doc = profile_update_document(&request);
        assert_eq!(set_doc.get_str("username").unwrap(), "새러너");
        assert!(!set_doc.contains_key("avatar"));

        assert!(profile_update_document(&UpdateProfileRequest::default()).is_empty());
    }

    #[actix_web::test]
    async fn test_hash_and_verify_password() {
        let hash = hash_password("secret1").await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password_hash("secret1", &hash).await.unwrap());
        assert!(!verify_password_hash("secret2", &hash).await.unwrap());
    }
}
