//! 프로필 수정 요청

use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `PUT /api/auth/profile`
///
/// 비어 있는 값은 무시되어 기존 값이 유지됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[serde(deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 2, max = 20, message = "사용자명은 2-20자 사이여야 합니다"))]
    pub username: Option<String>,

    #[serde(deserialize_with = "deserialize_optional_string")]
    pub avatar: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none()
    }
}
