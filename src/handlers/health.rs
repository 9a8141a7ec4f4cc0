use actix_web::{get, HttpResponse};
use serde_json::json;
use crate::config::{Environment, ServerConfig};

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "running-tracker-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "port": ServerConfig::port(),
        "env": Environment::current().as_str(),
    }))
}
