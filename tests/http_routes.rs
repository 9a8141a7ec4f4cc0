//! 데이터베이스 없이 확인할 수 있는 라우트 동작
//!
//! 헬스 체크, 404 응답, 토큰 검증 단계에서 끝나는 인증 거부, 입력 검증 실패와
//! 요청 한도 응답만 다룹니다.

use actix_web::{http::StatusCode, test, App};
use running_tracker_backend::config::RateLimitConfig;
use running_tracker_backend::routes::{configure_all_routes, security_headers, RateLimiters, JSON_BODY_LIMIT};
use serde_json::{json, Value};

fn limiters() -> RateLimiters {
    RateLimiters::from_env().expect("default rate limits are valid")
}

macro_rules! app {
    () => {{
        let limiters = limiters();
        test::init_service(App::new().configure(move |cfg| configure_all_routes(cfg, &limiters))).await
    }};
}

macro_rules! hardened_app {
    () => {{
        let limiters = limiters();
        test::init_service(
            App::new()
                .wrap(security_headers())
                .configure(move |cfg| configure_all_routes(cfg, &limiters)),
        )
        .await
    }};
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["port"].is_number());
    assert!(body["env"].is_string());
}

#[actix_web::test]
async fn unknown_route_returns_json_404() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/unknown/route").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[actix_web::test]
async fn protected_routes_require_bearer_token() {
    let app = app!();

    for (method, uri) in [("GET", "/api/auth/me"), ("PUT", "/api/auth/profile"), ("POST", "/api/auth/logout")] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            "PUT" => test::TestRequest::put(),
            _ => test::TestRequest::post(),
        }
        .uri(uri)
        .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}

#[actix_web::test]
async fn garbled_or_forged_tokens_are_rejected() {
    let app = app!();

    for header in ["Token abc", "Bearer ", "Bearer not.a.jwt", "Basic dXNlcjpwYXNz"] {
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", header))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", header);
    }
}

#[actix_web::test]
async fn register_validation_fails_before_storage() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .peer_addr("127.0.0.1:40000".parse().unwrap())
        .set_json(json!({"email": "not-an-email", "password": "secret1"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "유효한 이메일 주소를 입력해주세요");
}

#[actix_web::test]
async fn malformed_json_body_is_bad_request() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn verify_email_requires_token() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .set_json(json!({"token": "   "}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "인증 토큰이 필요합니다");
}

#[actix_web::test]
async fn login_limit_answers_with_json_envelope() {
    let limiters = RateLimiters::new(RateLimitConfig::EMAIL, RateLimitConfig::LOGIN).unwrap();
    let app = test::init_service(App::new().configure(move |cfg| configure_all_routes(cfg, &limiters))).await;

    let login = || {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr("10.0.0.7:50000".parse().unwrap())
            .set_json(json!({"email": "not-an-email", "password": "secret1"}))
            .to_request()
    };

    // 검증 실패 요청도 한도를 소모합니다.
    for attempt in 1..=RateLimitConfig::LOGIN.max_requests {
        let resp = test::call_service(&app, login()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "attempt {}", attempt);
    }

    let resp = test::call_service(&app, login()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().is_some_and(|m| m.starts_with("요청이 너무 많습니다")));
}

#[actix_web::test]
async fn login_limit_is_per_client_ip() {
    let limiters = RateLimiters::new(RateLimitConfig::EMAIL, RateLimitConfig::LOGIN).unwrap();
    let app = test::init_service(App::new().configure(move |cfg| configure_all_routes(cfg, &limiters))).await;

    let login_from = |peer: &str| {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer.parse().unwrap())
            .set_json(json!({"email": "not-an-email", "password": "secret1"}))
            .to_request()
    };

    for _ in 0..=RateLimitConfig::LOGIN.max_requests {
        test::call_service(&app, login_from("10.0.0.8:50000")).await;
    }

    let resp = test::call_service(&app, login_from("10.0.0.9:50000")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn responses_carry_security_headers() {
    let app = hardened_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
    assert!(headers.contains_key("strict-transport-security"));
}

#[actix_web::test]
async fn oversized_json_body_is_rejected() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(vec![b' '; JSON_BODY_LIMIT + 1])
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "요청 본문이 너무 큽니다");
}
