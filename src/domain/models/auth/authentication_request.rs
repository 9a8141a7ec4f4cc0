//! 인증 미들웨어의 요구 수준

/// 스코프별 인증 요구 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// 유효한 토큰만 있으면 됩니다.
    Authenticated,
    /// 이메일 인증까지 마친 사용자만 허용합니다. 미인증이면 403.
    VerifiedEmail,
}

impl AuthRequirement {
    pub fn requires_verified_email(&self) -> bool {
        matches!(self, AuthRequirement::VerifiedEmail)
    }
}
