//! 러닝 트래커 백엔드
//!
//! 러닝 트래커 앱의 계정 서비스와 보육기관 REST API 클라이언트를 담은 크레이트입니다.
//!
//! # Features
//!
//! - **계정 관리**: 이메일 회원가입, 프로필 조회/수정
//! - **이메일 인증**: 인증 링크, 6자리 로그인 코드, 비밀번호 재설정 메일
//! - **JWT 인증**: HS256 액세스 토큰, 로그아웃 시 Redis 블랙리스트
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **REST 클라이언트**: 보육기관 API 호출용 타입 기반 JSON 클라이언트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 요청 한도
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 조립 (+ JWT 미들웨어)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 메일 발송
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use running_tracker_backend::services::auth::AuthService;
//!
//! let response = AuthService::instance().login(request).await?;
//! println!("token: {}", response.token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod client;
