//! JWT 및 이메일 인증 관련 설정

use std::env;

/// JWT 발급 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 기본 만료 기간 (7일)
    pub const DEFAULT_EXPIRES_IN_SECS: i64 = 7 * 24 * 60 * 60;

    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "running-tracker-dev-secret".to_string()
        })
    }

    /// `JWT_EXPIRES_IN`을 초 단위로 반환합니다.
    ///
    /// `7d`, `24h`, `30m`, `45s`, `3600` 형식을 받습니다.
    /// 해석할 수 없으면 경고를 남기고 7일을 씁니다.
    pub fn expires_in_secs() -> i64 {
        match env::var("JWT_EXPIRES_IN") {
            Ok(raw) => parse_duration_secs(&raw).unwrap_or_else(|| {
                log::warn!("JWT_EXPIRES_IN '{}' 형식 오류, 기본값 7d 사용", raw);
                Self::DEFAULT_EXPIRES_IN_SECS
            }),
            Err(_) => Self::DEFAULT_EXPIRES_IN_SECS,
        }
    }
}

/// `7d` / `24h` / `30m` / `45s` / `3600` 같은 기간 문자열을 초로 바꿉니다.
///
/// 0 이하이거나 단위를 알 수 없으면 `None`입니다.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last()? {
        'd' | 'D' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        'h' | 'H' => (&raw[..raw.len() - 1], 60 * 60),
        'm' | 'M' => (&raw[..raw.len() - 1], 60),
        's' | 'S' => (&raw[..raw.len() - 1], 1),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value: i64 = digits.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

/// 이메일 인증 토큰, 로그인 코드, 비밀번호 재설정 토큰의 수명 설정
pub struct VerificationConfig;

impl VerificationConfig {
    /// 인증 코드 자릿수
    pub const CODE_LENGTH: usize = 6;
    /// 코드당 허용되는 최대 실패 횟수
    pub const MAX_CODE_ATTEMPTS: i32 = 5;
    /// 토큰 생성에 쓰는 랜덤 바이트 수 (hex 64자)
    pub const TOKEN_BYTES: usize = 32;

    /// 이메일 인증 링크 유효 기간 (24시간)
    pub fn email_token_ttl_secs() -> i64 {
        24 * 60 * 60
    }

    /// 비밀번호 재설정 링크 유효 기간 (1시간)
    pub fn password_reset_ttl_secs() -> i64 {
        60 * 60
    }

    /// 로그인 코드 유효 기간 (기본 10분)
    pub fn code_ttl_minutes() -> i64 {
        env::var("VERIFICATION_CODE_TTL_MINUTES")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(10)
    }

    /// 같은 이메일로 코드를 다시 요청할 수 있을 때까지의 대기 시간 (기본 60초)
    pub fn code_cooldown_secs() -> i64 {
        env::var("VERIFICATION_CODE_COOLDOWN_SECONDS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|s: &i64| *s >= 0)
            .unwrap_or(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_secs("7d"), Some(604_800));
        assert_eq!(parse_duration_secs("24h"), Some(86_400));
        assert_eq!(parse_duration_secs("30m"), Some(1_800));
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("3600"), Some(3_600));
        assert_eq!(parse_duration_secs(" 2D "), Some(172_800));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("d"), None);
        assert_eq!(parse_duration_secs("7w"), None);
        assert_eq!(parse_duration_secs("-5m"), None);
        assert_eq!(parse_duration_secs("0h"), None);
        assert_eq!(parse_duration_secs("abc"), None);
    }

    #[test]
    fn test_verification_defaults() {
        assert_eq!(VerificationConfig::email_token_ttl_secs(), 86_400);
        assert_eq!(VerificationConfig::password_reset_ttl_secs(), 3_600);
        assert_eq!(VerificationConfig::CODE_LENGTH, 6);
        assert_eq!(VerificationConfig::MAX_CODE_ATTEMPTS, 5);

        if env::var("VERIFICATION_CODE_TTL_MINUTES").is_err() {
            assert_eq!(VerificationConfig::code_ttl_minutes(), 10);
        }
        if env::var("VERIFICATION_CODE_COOLDOWN_SECONDS").is_err() {
            assert_eq!(VerificationConfig::code_cooldown_secs(), 60);
        }
    }
}
