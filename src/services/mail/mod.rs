//! 트랜잭션 메일 (인증 링크, 로그인 코드, 비밀번호 재설정)

pub mod mail_service;
pub mod templates;

pub use mail_service::{MailService, OutgoingMail};
