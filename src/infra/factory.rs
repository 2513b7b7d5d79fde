use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::infra::cache::memory_cache::MemoryCache;
use crate::infra::email::http_email_service::HttpEmailService;

pub const CONFIRMATION_TEMPLATE: &str = "conference_confirmation.html";

pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(CONFIRMATION_TEMPLATE, include_str!("../templates/conference_confirmation.html"))
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to load confirmation template: {:?}", e)))?;
    Ok(tera)
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));
    let templates = Arc::new(load_templates()?);

    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| AppError::Config(format!("Invalid SQLite connection string: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    run_sqlite_migrations(&pool).await?;

    Ok(AppState::new(
        config.clone(),
        pool,
        Arc::new(MemoryCache::new()),
        email_service,
        templates,
    ))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    info!("SQLite migrations applied");
    Ok(())
}
