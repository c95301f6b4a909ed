//! Persistence boundary for daily logs and per-user cycle settings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{ConfigError, CycleConfig, DailyLog};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type SharedStore = Arc<dyn LogStore>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("stored profile is invalid: {0}")]
    InvalidProfile(#[from] ConfigError),
    #[error("{field} of {value} days does not fit the profile column")]
    LengthOutOfRange { field: &'static str, value: i64 },
}

/// At most one log is kept per (user, date); writing a date again replaces it.
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<DailyLog>, StoreError>;

    async fn upsert_entry(&self, user_id: Uuid, log: DailyLog) -> Result<DailyLog, StoreError>;

    /// Returns whether a log existed for that date.
    async fn delete_entry(&self, user_id: Uuid, date: NaiveDate) -> Result<bool, StoreError>;

    /// Defaults apply when the user never saved settings.
    async fn cycle_config(&self, user_id: Uuid) -> Result<CycleConfig, StoreError>;

    async fn update_config(&self, user_id: Uuid, config: CycleConfig) -> Result<(), StoreError>;
}
