//! SMTP 메일 발송 서비스
//!
//! `lettre`의 tokio 비동기 SMTP 전송을 사용합니다. `EMAIL_HOST`가 없으면
//! 발송 대신 수신자와 제목만 로그로 남기고 성공으로 처리합니다.
//!
//! 설정 구조체를 보관해야 하므로 매크로 대신 직접 싱글톤으로 등록합니다.

use std::sync::Arc;
use lettre::{
    message::{header::ContentType, Mailbox},
    Address,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use once_cell::sync::OnceCell;
use crate::config::MailConfig;
use crate::core::errors::{AppError, ErrorContext};

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub struct MailService {
    sender: Option<Mailbox>,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

static MAIL_SERVICE_INSTANCE: OnceCell<Arc<MailService>> = OnceCell::new();

fn build_transport(config: &MailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
    let builder = if config.secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
    }
    .map_err(|e| AppError::ExternalServiceError(format!("SMTP 설정 오류: {}", e)))?;

    let builder = builder.port(config.port);
    let builder = match (&config.user, &config.password) {
        (Some(user), Some(pass)) => builder.credentials(Credentials::new(user.clone(), pass.clone())),
        _ => builder,
    };

    Ok(builder.build())
}

impl MailService {
    /// 설정으로 서비스를 만듭니다. `None`이면 발송 비활성화 상태입니다.
    pub fn new(config: Option<MailConfig>) -> Self {
        let Some(config) = config else {
            log::warn!("📭 EMAIL_HOST 미설정: 메일은 발송되지 않고 로그로만 남습니다");
            return Self::disabled();
        };

        let sender = match config.from_address.parse::<Address>() {
            Ok(address) => Mailbox::new(Some(config.from_name.clone()), address),
            Err(e) => {
                log::error!("❌ 발신자 주소 오류 ({}): {}", config.sender(), e);
                return Self::disabled();
            }
        };

        match build_transport(&config) {
            Ok(transport) => {
                log::info!("📮 SMTP 메일 발송 활성화: {}:{}", config.host, config.port);
                Self { sender: Some(sender), transport: Some(transport) }
            }
            Err(e) => {
                log::error!("❌ {}", e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sender: None, transport: None }
    }

    pub fn instance() -> Arc<Self> {
        MAIL_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(MailConfig::from_env())))
            .clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    fn build_message(sender: &Mailbox, mail: &OutgoingMail) -> Result<Message, AppError> {
        let recipient = mail
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::ValidationError(format!("유효하지 않은 수신자 주소입니다: {}", e)))?;

        Message::builder()
            .from(sender.clone())
            .to(recipient)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html.clone())
            .with_context(|| format!("메일 생성 실패 ({})", mail.subject))
    }

    /// 메일을 보냅니다. 전송 실패는 `ExternalServiceError`입니다.
    pub async fn send(&self, mail: OutgoingMail) -> Result<(), AppError> {
        let (Some(sender), Some(transport)) = (&self.sender, &self.transport) else {
            log::info!("📭 [메일 발송 생략] to={} subject={}", mail.to, mail.subject);
            return Ok(());
        };

        let message = Self::build_message(sender, &mail)?;

        transport.send(message).await.map_err(|e| {
            log::error!("❌ 메일 발송 실패 to={}: {}", mail.to, e);
            AppError::ExternalServiceError(format!("메일 발송 실패: {}", e))
        })?;

        log::info!("📧 메일 발송 완료 to={} subject={}", mail.to, mail.subject);
        Ok(())
    }
}

fn mail_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(MailService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "mail_service",
        constructor: mail_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: "제목".to_string(),
            html: "<p>본문</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_disabled_service_skips_sending() {
        let service = MailService::disabled();
        assert!(!service.is_enabled());
        assert!(service.send(mail("runner@example.com")).await.is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let sender = Mailbox::new(Some("Running Tracker".to_string()), "noreply@example.com".parse().unwrap());
        let result = MailService::build_message(&sender, &mail("not an address"));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_build_message_ok() {
        let sender = Mailbox::new(Some("러닝 트래커".to_string()), "noreply@example.com".parse().unwrap());
        assert!(MailService::build_message(&sender, &mail("runner@example.com")).is_ok());
    }

    #[test]
    fn test_new_without_config_is_disabled() {
        assert!(!MailService::new(None).is_enabled());
    }
}
