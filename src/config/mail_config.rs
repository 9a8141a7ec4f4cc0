//! SMTP 발송 설정

use std::env;

/// SMTP 연결 및 발신자 설정
///
/// `EMAIL_HOST`가 없으면 메일 발송이 비활성화되고 [`MailConfig::from_env`]는 `None`을 반환합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// `true`면 암묵적 TLS(465), 아니면 STARTTLS
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    pub from_name: String,
}

impl MailConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 만듭니다.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = non_empty("EMAIL_HOST")?;
        let port = non_empty("EMAIL_PORT")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(587);
        let secure = non_empty("EMAIL_SECURE")
            .map(|raw| raw.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let user = non_empty("EMAIL_USER");
        let from_address = non_empty("EMAIL_FROM")
            .or_else(|| user.clone())
            .unwrap_or_else(|| "noreply@localhost".to_string());

        Some(Self {
            host,
            port,
            secure,
            password: non_empty("EMAIL_PASS"),
            user,
            from_address,
            from_name: non_empty("EMAIL_FROM_NAME").unwrap_or_else(|| "Running Tracker".to_string()),
        })
    }

    /// `"이름 <주소>"` 형식의 발신자
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    /// 메일 본문 링크에 쓰는 프론트엔드 주소 (끝의 `/` 제거)
    pub fn frontend_url() -> String {
        env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_mail_disabled_without_host() {
        assert!(MailConfig::from_lookup(lookup(&[("EMAIL_USER", "a@b.com")])).is_none());
        assert!(MailConfig::from_lookup(lookup(&[("EMAIL_HOST", "  ")])).is_none());
    }

    #[test]
    fn test_mail_defaults() {
        let config = MailConfig::from_lookup(lookup(&[
            ("EMAIL_HOST", "smtp.example.com"),
            ("EMAIL_USER", "runner@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert_eq!(config.from_address, "runner@example.com");
        assert_eq!(config.sender(), "Running Tracker <runner@example.com>");
    }

    #[test]
    fn test_mail_explicit_values() {
        let config = MailConfig::from_lookup(lookup(&[
            ("EMAIL_HOST", "smtp.example.com"),
            ("EMAIL_PORT", "465"),
            ("EMAIL_SECURE", "TRUE"),
            ("EMAIL_FROM", "noreply@example.com"),
            ("EMAIL_FROM_NAME", "러닝 트래커"),
            ("EMAIL_PASS", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 465);
        assert!(config.secure);
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.sender(), "러닝 트래커 <noreply@example.com>");
    }
}
