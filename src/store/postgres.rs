use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{LogStore, StoreError};
use crate::models::{CycleConfig, DailyLog};

pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct EntryRow {
    logged_on: NaiveDate,
    blood_level: i16,
    pain_level: i16,
    mood_level: i16,
    sex_activity: i16,
    notes: String,
}

impl From<EntryRow> for DailyLog {
    fn from(row: EntryRow) -> Self {
        // column CHECK constraints keep these inside 0..=4
        let level = |v: i16| v.clamp(0, i16::from(u8::MAX)) as u8;
        DailyLog {
            date: row.logged_on,
            blood_level: level(row.blood_level),
            pain_level: level(row.pain_level),
            mood_level: level(row.mood_level),
            sex_activity: level(row.sex_activity),
            notes: row.notes,
        }
    }
}

#[derive(FromRow)]
struct ProfileRow {
    cycle_length_days: i32,
    period_length_days: i32,
}

impl PgStore {
    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("🗄️ Database schema up to date");

        Ok(Self { pool })
    }
}

/// Lengths narrowed to the `INTEGER` profile columns.
fn profile_columns(config: &CycleConfig) -> Result<(i32, i32), StoreError> {
    let column = |field: &'static str, value: i64| {
        i32::try_from(value).map_err(|_| StoreError::LengthOutOfRange { field, value })
    };
    Ok((
        column("cycle_length_days", config.cycle_length_days())?,
        column("period_length_days", config.period_length_days())?,
    ))
}

fn log_write_failure(e: &sqlx::Error) {
    if let Some(db_err) = e.as_database_error() {
        tracing::error!("❌ DB write failed: {}", db_err.message());

        if let Some(code) = db_err.code() {
            tracing::info!("ℹ️ SQLSTATE code: {}", code);
        }

        if let Some(constraint) = db_err.constraint() {
            tracing::info!("🔒 Constraint violated: {}", constraint);
        }
    } else {
        tracing::error!("❌ Unknown DB error: {}", e);
    }
}

#[async_trait]
impl LogStore for PgStore {
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<DailyLog>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT logged_on, blood_level, pain_level, mood_level, sex_activity, notes
            FROM daily_logs
            WHERE user_id = $1
            ORDER BY logged_on ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyLog::from).collect())
    }

    async fn upsert_entry(&self, user_id: Uuid, log: DailyLog) -> Result<DailyLog, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO daily_logs
                (user_id, logged_on, blood_level, pain_level, mood_level, sex_activity, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, logged_on) DO UPDATE SET
                blood_level = EXCLUDED.blood_level,
                pain_level = EXCLUDED.pain_level,
                mood_level = EXCLUDED.mood_level,
                sex_activity = EXCLUDED.sex_activity,
                notes = EXCLUDED.notes,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(log.date)
        .bind(i16::from(log.blood_level))
        .bind(i16::from(log.pain_level))
        .bind(i16::from(log.mood_level))
        .bind(i16::from(log.sex_activity))
        .bind(&log.notes)
        .execute(&self.pool)
        .await
        .inspect_err(log_write_failure)?;

        Ok(log)
    }

    async fn delete_entry(&self, user_id: Uuid, date: NaiveDate) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM daily_logs WHERE user_id = $1 AND logged_on = $2")
            .bind(user_id)
            .bind(date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn cycle_config(&self, user_id: Uuid) -> Result<CycleConfig, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT cycle_length_days, period_length_days FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(CycleConfig::default());
        };

        Ok(CycleConfig::new(
            i64::from(row.cycle_length_days),
            i64::from(row.period_length_days),
        )?)
    }

    async fn update_config(&self, user_id: Uuid, config: CycleConfig) -> Result<(), StoreError> {
        let (cycle, period) = profile_columns(&config)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, cycle_length_days, period_length_days)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                cycle_length_days = EXCLUDED.cycle_length_days,
                period_length_days = EXCLUDED.period_length_days,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(cycle)
        .bind(period)
        .execute(&self.pool)
        .await
        .inspect_err(log_write_failure)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_columns_pass_through_lengths() {
        let config = CycleConfig::new(28, 4).unwrap();
        assert_eq!(profile_columns(&config).unwrap(), (28, 4));
    }

    #[test]
    fn profile_columns_refuse_lengths_beyond_i32() {
        let too_long = i64::from(i32::MAX) + 1;
        let config = CycleConfig::new(too_long, 5).unwrap();
        let err = profile_columns(&config).unwrap_err();
        assert!(matches!(
            err,
            StoreError::LengthOutOfRange { field: "cycle_length_days", value } if value == too_long
        ));
    }
}
