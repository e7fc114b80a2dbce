use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::domain::common::DatabaseConfig;

pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let url = format!(
        "postgres://{}:{}@{}:{}/{}",
        config.username, config.password, config.host, config.port, config.name
    );

    info!("Connecting to database at {}:{}", config.host, config.port);
    Database::connect(url).await
}
