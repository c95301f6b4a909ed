use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LogStore, StoreError};
use crate::models::{CycleConfig, DailyLog};

#[derive(Default)]
struct UserRecord {
    entries: BTreeMap<NaiveDate, DailyLog>,
    config: Option<CycleConfig>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<DailyLog>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .get(&user_id)
            .map(|user| user.entries.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert_entry(&self, user_id: Uuid, log: DailyLog) -> Result<DailyLog, StoreError> {
        let mut users = self.users.write().await;
        users
            .entry(user_id)
            .or_default()
            .entries
            .insert(log.date, log.clone());
        Ok(log)
    }

    async fn delete_entry(&self, user_id: Uuid, date: NaiveDate) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(&user_id)
            .and_then(|user| user.entries.remove(&date))
            .is_some())
    }

    async fn cycle_config(&self, user_id: Uuid) -> Result<CycleConfig, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .get(&user_id)
            .and_then(|user| user.config)
            .unwrap_or_default())
    }

    async fn update_config(&self, user_id: Uuid, config: CycleConfig) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        users.entry(user_id).or_default().config = Some(config);
        Ok(())
    }
}
