//! 메일 본문 템플릿
//!
//! 최소한의 인라인 스타일 HTML입니다. 링크와 코드 외에 사용자 입력은 넣지 않습니다.

use crate::services::mail::OutgoingMail;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head><meta charset="utf-8"><title>{title}</title></head>
<body style="margin:0;padding:24px;background:#f4f6f8;font-family:Arial,sans-serif;color:#222">
  <div style="max-width:560px;margin:0 auto;background:#fff;border-radius:8px;padding:32px">
    <h2 style="margin-top:0;color:#2e7d32">🏃 러닝 트래커</h2>
    {body}
    <p style="margin-top:32px;font-size:12px;color:#888">본인이 요청하지 않았다면 이 메일을 무시하셔도 됩니다.</p>
  </div>
</body>
</html>"#
    )
}

fn button(href: &str, label: &str) -> String {
    format!(
        r#"<p style="text-align:center;margin:32px 0"><a href="{href}" style="background:#2e7d32;color:#fff;padding:12px 28px;border-radius:6px;text-decoration:none">{label}</a></p>
<p style="font-size:12px;color:#666;word-break:break-all">버튼이 동작하지 않으면 다음 주소를 브라우저에 붙여 넣으세요:<br>{href}</p>"#
    )
}

/// `${frontend}/verify-email?token=...`
pub fn verification_link(frontend_url: &str, token: &str) -> String {
    format!("{}/verify-email?token={}", frontend_url, token)
}

/// `${frontend}/reset-password?token=...`
pub fn reset_link(frontend_url: &str, token: &str) -> String {
    format!("{}/reset-password?token={}", frontend_url, token)
}

pub fn email_verification(to: &str, frontend_url: &str, token: &str) -> OutgoingMail {
    let link = verification_link(frontend_url, token);
    let body = format!(
        "<p>러닝 트래커에 가입해 주셔서 감사합니다!</p>\
         <p>아래 버튼을 눌러 이메일 주소를 인증해 주세요. 링크는 24시간 동안 유효합니다.</p>{}",
        button(&link, "이메일 인증하기")
    );

    OutgoingMail {
        to: to.to_string(),
        subject: "🏃 러닝 트래커 - 이메일 주소를 인증해 주세요".to_string(),
        html: layout("이메일 인증", &body),
    }
}

pub fn login_code(to: &str, code: &str, ttl_minutes: i64) -> OutgoingMail {
    let body = format!(
        "<p>로그인 인증 코드입니다.</p>\
         <p style=\"font-size:32px;letter-spacing:8px;font-weight:bold;text-align:center\">{}</p>\
         <p>코드는 {}분 동안 유효합니다. 다른 사람에게 알려주지 마세요.</p>",
        code, ttl_minutes
    );

    OutgoingMail {
        to: to.to_string(),
        subject: format!("🔑 러닝 트래커 로그인 코드: {}", code),
        html: layout("로그인 인증 코드", &body),
    }
}

pub fn password_reset(to: &str, frontend_url: &str, token: &str) -> OutgoingMail {
    let link = reset_link(frontend_url, token);
    let body = format!(
        "<p>비밀번호 재설정 요청을 받았습니다.</p>\
         <p>아래 버튼을 눌러 새 비밀번호를 설정해 주세요. 링크는 1시간 동안 유효합니다.</p>{}",
        button(&link, "비밀번호 재설정")
    );

    OutgoingMail {
        to: to.to_string(),
        subject: "🔒 러닝 트래커 - 비밀번호 재설정".to_string(),
        html: layout("비밀번호 재설정", &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(
            verification_link("http://localhost:8080", "abc"),
            "http://localhost:8080/verify-email?token=abc"
        );
        assert_eq!(
            reset_link("https://run.example.com", "def"),
            "https://run.example.com/reset-password?token=def"
        );
    }

    #[test]
    fn test_verification_mail_contains_link() {
        let mail = email_verification("runner@example.com", "http://localhost:8080", "tok123");
        assert_eq!(mail.to, "runner@example.com");
        assert!(mail.html.contains("http://localhost:8080/verify-email?token=tok123"));
    }

    #[test]
    fn test_login_code_mail_contains_code_and_ttl() {
        let mail = login_code("runner@example.com", "042917", 10);
        assert!(mail.subject.contains("042917"));
        assert!(mail.html.contains("042917"));
        assert!(mail.html.contains("10분"));
    }

    #[test]
    fn test_reset_mail_contains_link() {
        let mail = password_reset("runner@example.com", "http://localhost:8080", "r1");
        assert!(mail.html.contains("/reset-password?token=r1"));
    }
}
