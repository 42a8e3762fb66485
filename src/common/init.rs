use crate::adapters::push_service::ExpoPushService;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;

pub static MIGRATOR: Migrator = sqlx::migrate!();

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    MIGRATOR.run(&db).await?;
    let push = Arc::new(ExpoPushService::from_settings(settings));
    Ok(AppState { db, push })
}

pub async fn initialize_db(settings: &AppSettings) -> anyhow::Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections as _)
        .connect_with(options)
        .await?;
    Ok(db)
}
