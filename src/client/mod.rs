//! 보육기관 REST API 클라이언트
//!
//! 요청 DTO 하나가 URL 템플릿, HTTP 메서드, 응답 타입을 함께 가지는
//! 타입 기반 JSON 클라이언트입니다.
//!
//! ```rust,ignore
//! use running_tracker_backend::client::{JsonServiceClient, dtos::GetGovJiGouDishMenuWeeklys};
//!
//! let client = JsonServiceClient::new("https://api.example.com/");
//! client.token_store().set("token-value".to_string());
//!
//! let menus = client
//!     .send(&GetGovJiGouDishMenuWeeklys {
//!         jigou_id: Some("jg-1".into()),
//!         riqi: vec!["2025-03-03".into(), "2025-03-09".into()],
//!         ..Default::default()
//!     })
//!     .await?;
//! ```
//!
//! - [`url`] - URL 템플릿 치환, 쿼리 문자열, 요청 본문 구성
//! - [`json_service_client`] - HTTP 호출과 응답 디코딩
//! - [`token_store`] - `Authorization` 헤더에 실을 토큰 저장소
//! - [`dtos`] - 공통 응답 타입과 대표 요청 DTO

pub mod error;
pub mod url;
pub mod token_store;
pub mod json_service_client;
pub mod dtos;

pub use error::ClientError;
pub use json_service_client::{ApiRequest, JsonServiceClient, UploadFile, SESSION_EXPIRED_CODE};
pub use token_store::{InMemoryTokenStore, TokenStore};
