//! # Configuration Module
//!
//! 환경 변수 기반 설정을 모아 둔 모듈입니다. 설정 구조체는 상태 없이
//! 정적 메서드로 값을 읽으므로 어디서든 `JwtConfig::secret()`처럼 바로 씁니다.
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB/Redis, CORS, 요청 제한
//! - [`auth_config`] - JWT, 이메일 인증 코드/토큰 수명
//! - [`mail_config`] - SMTP 발송 설정
//!
//! ## 환경 변수
//!
//! ```bash
//! export PORT="3000"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="running_tracker"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRES_IN="7d"
//!
//! export EMAIL_HOST="smtp.gmail.com"
//! export EMAIL_PORT="587"
//! export EMAIL_USER="runner@example.com"
//! export EMAIL_PASS="app-password"
//! export FRONTEND_URL="http://localhost:8080"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod mail_config;

pub use data_config::*;
pub use auth_config::*;
pub use mail_config::*;
