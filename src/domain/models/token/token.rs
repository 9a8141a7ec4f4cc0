//! JWT 클레임

use serde::{Deserialize, Serialize};

/// HS256으로 서명되는 액세스 토큰 클레임
///
/// `jti`는 매 발급마다 새 UUID v4라서 같은 초에 발급된 토큰도 서로 다릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ObjectId (hex)
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// 남은 유효 시간(초). 이미 지났으면 0.
    pub fn remaining_secs(&self, now: i64) -> u64 {
        (self.exp - now).max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_secs() {
        let claims = TokenClaims {
            sub: "u".to_string(),
            jti: "j".to_string(),
            iat: 100,
            exp: 200,
        };
        assert_eq!(claims.remaining_secs(150), 50);
        assert_eq!(claims.remaining_secs(250), 0);
    }
}
