//! 러닝 트래커 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 JWT 인증 기반의 계정 API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use running_tracker_backend::caching::redis::RedisClient;
use running_tracker_backend::config::{CorsConfig, Environment, MailConfig, RateLimitConfig, ServerConfig};
use running_tracker_backend::core::registry::ServiceLocator;
use running_tracker_backend::db::Database;
use running_tracker_backend::repositories::users::UserRepository;
use running_tracker_backend::repositories::verifications::{CodeRepository, ResetRepository, VerificationRepository};
use running_tracker_backend::routes::{configure_all_routes, security_headers, ClientIpKey, RateLimiters};
use running_tracker_backend::utils::display_terminal::print_server_banner;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 러닝 트래커 백엔드 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    ensure_indexes().await;

    if MailConfig::from_env().is_none() {
        warn!("⚠️ EMAIL_HOST가 설정되지 않아 메일 발송이 비활성화됩니다");
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 전역 요청 한도, 보안 헤더, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 요청 한도 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let host = ServerConfig::host();
    let port = ServerConfig::port();

    let global = RateLimitConfig::global();
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKey)
        .period(global.replenish_period())
        .burst_size(global.burst_size())
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("전역 요청 한도 설정이 올바르지 않습니다"))?;

    let limiters = RateLimiters::from_env()
        .ok_or_else(|| io::Error::other("라우트 요청 한도 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 전체 {}회/{}초, 메일 {}회, 로그인 {}회",
        global.max_requests,
        global.window.as_secs(),
        RateLimitConfig::email().max_requests,
        RateLimitConfig::login().max_requests,
    );

    let server = HttpServer::new(move || {
        let limiters = limiters.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(security_headers())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| configure_all_routes(cfg, &limiters))
    })
        .bind((host.as_str(), port))?
        .workers(ServerConfig::workers());

    print_server_banner(&host, port, Environment::current().as_str(), &CorsConfig::allowed_origin());
    info!("📍 Health check: http://{}:{}/health", host, port);

    server.run().await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 프로필 파일이 없으면 기본 .env로 넘어갑니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let filename = match profile.as_str() {
        "prod" => Some(".env.prod"),
        "dev" => Some(".env.dev"),
        _ => None,
    };

    match filename.map(dotenv::from_filename) {
        Some(Ok(_)) => {}
        Some(Err(_)) | None => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=running_tracker_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 어느 한쪽이라도 실패하면 서버를 띄우지 않습니다.
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("❌ MongoDB 연결 실패: {}", e);
        io::Error::other(format!("데이터베이스 연결 실패: {}", e))
    })?;

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("❌ Redis 연결 실패: {}", e);
        io::Error::other(format!("Redis 연결 실패: {}", e))
    })?;

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 컬렉션 인덱스를 만듭니다. 실패는 경고만 남기고 계속 진행합니다.
async fn ensure_indexes() {
    let results = [
        ("users", UserRepository::instance().create_indexes().await),
        ("email_verifications", VerificationRepository::instance().create_indexes().await),
        ("email_verification_codes", CodeRepository::instance().create_indexes().await),
        ("password_resets", ResetRepository::instance().create_indexes().await),
    ];

    for (collection, result) in results {
        match result {
            Ok(()) => info!("📇 인덱스 확인 완료: {}", collection),
            Err(e) => warn!("⚠️ 인덱스 생성 실패 ({}): {}", collection, e),
        }
    }
}

/// CORS 설정을 구성합니다
///
/// `FRONTEND_URL` 하나만 허용하고 자격 증명을 지원합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&CorsConfig::allowed_origin())
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(CorsConfig::max_age_secs())
}
