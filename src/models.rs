use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const MAX_BLOOD_LEVEL: u8 = 4;
pub const MAX_PAIN_LEVEL: u8 = 4;
pub const MAX_MOOD_LEVEL: u8 = 4;
pub const MAX_SEX_ACTIVITY: u8 = 2;

/// One user-submitted record for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub blood_level: u8,
    pub pain_level: u8,
    pub mood_level: u8,
    pub sex_activity: u8,
    #[serde(default)]
    pub notes: String,
}

impl DailyLog {
    /// A log carrying only a bleeding level, the rest left at zero.
    pub fn bleeding(date: NaiveDate, blood_level: u8) -> Self {
        Self {
            date,
            blood_level,
            pain_level: 0,
            mood_level: 0,
            sex_activity: 0,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cycle length must be a positive number of days, got {0}")]
    CycleLength(i64),
    #[error("period length must not be negative, got {0}")]
    PeriodLength(i64),
}

/// Per-user cycle settings. Always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfig")]
pub struct CycleConfig {
    cycle_length_days: i64,
    period_length_days: i64,
}

#[derive(Deserialize)]
struct RawCycleConfig {
    cycle_length_days: i64,
    period_length_days: i64,
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCycleConfig) -> Result<Self, Self::Error> {
        Self::new(raw.cycle_length_days, raw.period_length_days)
    }
}

impl CycleConfig {
    pub const DEFAULT_CYCLE_LENGTH: i64 = 30;
    pub const DEFAULT_PERIOD_LENGTH: i64 = 5;

    pub fn new(cycle_length_days: i64, period_length_days: i64) -> Result<Self, ConfigError> {
        if cycle_length_days <= 0 {
            return Err(ConfigError::CycleLength(cycle_length_days));
        }
        if period_length_days < 0 {
            return Err(ConfigError::PeriodLength(period_length_days));
        }
        Ok(Self {
            cycle_length_days,
            period_length_days,
        })
    }

    pub fn cycle_length_days(&self) -> i64 {
        self.cycle_length_days
    }

    pub fn period_length_days(&self) -> i64 {
        self.period_length_days
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cycle_length_days: Self::DEFAULT_CYCLE_LENGTH,
            period_length_days: Self::DEFAULT_PERIOD_LENGTH,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

/// Upsert body for `POST /entries`. Field aliases accept the short names
/// older clients send (`blood`, `pain`, `mood`, `sex`).
///
/// Levels are read as wide integers so that negative or oversized values
/// reach the range check instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct NewEntry {
    pub user_id: Uuid,
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    #[serde(default, alias = "blood")]
    pub blood_level: i64,
    #[serde(default, alias = "pain")]
    pub pain_level: i64,
    #[serde(default, alias = "mood")]
    pub mood_level: i64,
    #[serde(default, alias = "sex")]
    pub sex_activity: i64,
    #[serde(default)]
    pub notes: String,
}

impl NewEntry {
    /// Range-check the levels and turn the request into a storable log.
    pub fn into_log(self) -> Result<DailyLog, String> {
        Ok(DailyLog {
            date: self.date,
            blood_level: level("blood_level", self.blood_level, MAX_BLOOD_LEVEL)?,
            pain_level: level("pain_level", self.pain_level, MAX_PAIN_LEVEL)?,
            mood_level: level("mood_level", self.mood_level, MAX_MOOD_LEVEL)?,
            sex_activity: level("sex_activity", self.sex_activity, MAX_SEX_ACTIVITY)?,
            notes: self.notes,
        })
    }
}

/// Narrow a submitted level to `0..=max`.
pub fn level(name: &str, value: i64, max: u8) -> Result<u8, String> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| format!("{name} must be between 0 and {max}, got {value}"))
}

#[derive(Debug, Deserialize)]
pub struct DeleteEntryRequest {
    pub user_id: Uuid,
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<DailyLog>,
    pub settings: CycleConfig,
}

#[derive(Debug, Serialize)]
pub struct SavedEntry {
    pub ok: bool,
    pub entry: DailyLog,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub user_id: Uuid,
    pub cycle_length_days: Option<i64>,
    pub period_length_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BleedingRun {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<BleedingDay>,
}

#[derive(Debug, Serialize)]
pub struct BleedingDay {
    pub date: NaiveDate,
    pub level: u8,
}

/// Parse a calendar day from either `YYYY-MM-DD` or an RFC 3339 timestamp.
/// Any time-of-day component is dropped.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date `{raw}` (expected YYYY-MM-DD or an RFC 3339 timestamp)"
        ))
    })
}
