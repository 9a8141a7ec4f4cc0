//! 실행 환경, 서버, 저장소, 요청 제한 설정
//!
//! 모든 값은 환경 변수에서 읽고 없으면 개발용 기본값을 씁니다.

use std::env;
use std::time::Duration;

/// 애플리케이션 실행 환경
///
/// `ENVIRONMENT`를 먼저 보고, 없으면 `NODE_ENV`를 봅니다.
/// 둘 다 없거나 알 수 없는 값이면 가장 안전한 `Production`으로 간주합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// health 응답 등에 노출하는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// bcrypt 해시 비용 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`(4..=15)가 유효하면 그 값을, 아니면 환경별 기본값을 씁니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        env::var("WORKERS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(4)
    }
}

/// MongoDB 접속 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "running_tracker".to_string())
    }
}

/// Redis 접속 설정
pub struct RedisConfig;

impl RedisConfig {
    pub fn url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// 허용 origin. 프론트엔드 주소와 같습니다.
    pub fn allowed_origin() -> String {
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
    }

    pub fn max_age_secs() -> usize {
        3600
    }
}

/// IP 단위 요청 한도
///
/// `window` 동안 `max_requests`회까지 허용합니다.
/// governor의 토큰 버킷으로 옮길 때는 버스트가 `max_requests`,
/// 토큰 보충 주기가 `window / max_requests`가 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimit {
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self { max_requests, window: Duration::from_secs(window_secs) }
    }

    /// 토큰 하나가 보충되는 주기
    pub fn replenish_period(&self) -> Duration {
        let max = self.max_requests.max(1);
        let period = self.window / max;
        if period.is_zero() { Duration::from_millis(1) } else { period }
    }

    pub fn burst_size(&self) -> u32 {
        self.max_requests.max(1)
    }

    fn from_env(prefix: &str, default: RateLimit) -> RateLimit {
        let max_requests = env::var(format!("{}_MAX", prefix))
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default.max_requests);
        let window = env::var(format!("{}_WINDOW_SECONDS", prefix))
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default.window);
        RateLimit { max_requests, window }
    }
}

/// 라우트 그룹별 요청 한도
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// 전체 요청: 15분에 100회
    pub const GLOBAL: RateLimit = RateLimit::new(100, 15 * 60);
    /// 메일 발송 요청: 1시간에 5회
    pub const EMAIL: RateLimit = RateLimit::new(5, 60 * 60);
    /// 로그인 시도: 15분에 10회
    pub const LOGIN: RateLimit = RateLimit::new(10, 15 * 60);

    pub fn global() -> RateLimit {
        RateLimit::from_env("RATE_LIMIT_GLOBAL", Self::GLOBAL)
    }

    pub fn email() -> RateLimit {
        RateLimit::from_env("RATE_LIMIT_EMAIL", Self::EMAIL)
    }

    pub fn login() -> RateLimit {
        RateLimit::from_env("RATE_LIMIT_LOGIN", Self::LOGIN)
    }
}
