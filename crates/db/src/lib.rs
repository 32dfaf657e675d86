//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the trial balance store
//! - [`TrialBalanceRepository`], the database-backed report source
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::TrialBalanceRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use trialview_shared::DatabaseConfig;

/// Establishes a connection pool sized from `config`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to database"
    );
    Database::connect(options).await
}
