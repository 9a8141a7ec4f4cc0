//! MongoDB 연결 관리
//!
//! 시작 시 한 번 연결하고 `ServiceLocator`에 등록해 리포지토리들이 공유합니다.

use mongodb::{Client, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI` / `DATABASE_NAME`으로 연결하고 ping으로 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(DatabaseConfig::uri()).await?;
        client_options.app_name = Some("running_tracker_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self { client, database_name })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
