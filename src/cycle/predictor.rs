use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{CycleConfig, DailyLog};

/// How a calendar day should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayClass {
    LoggedBleeding { level: u8 },
    PredictedBleeding,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub class: DayClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid calendar month {year}-{month}")]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

/// Most recent day with any logged bleeding. Predictions are projected from
/// this single anchor, not from an average of past cycles.
pub fn last_bleeding_day(logs: &[DailyLog]) -> Option<NaiveDate> {
    logs.iter()
        .filter(|log| log.blood_level > 0)
        .map(|log| log.date)
        .max()
}

/// Classify one day. Logged bleeding always wins over prediction.
pub fn classify_day(date: NaiveDate, logs: &[DailyLog], config: &CycleConfig) -> DayClass {
    classify_from_anchor(date, logs, last_bleeding_day(logs), config)
}

/// Classify every day of `year`-`month`, computing the anchor once.
pub fn classify_month(
    year: i32,
    month: u32,
    logs: &[DailyLog],
    config: &CycleConfig,
) -> Result<Vec<CalendarDay>, InvalidMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(InvalidMonth { year, month })?;
    let anchor = last_bleeding_day(logs);

    Ok(first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|date| CalendarDay {
            date,
            class: classify_from_anchor(date, logs, anchor, config),
        })
        .collect())
}

fn classify_from_anchor(
    date: NaiveDate,
    logs: &[DailyLog],
    anchor: Option<NaiveDate>,
    config: &CycleConfig,
) -> DayClass {
    let logged = logs
        .iter()
        .filter(|log| log.date == date)
        .map(|log| log.blood_level)
        .max()
        .unwrap_or(0);
    if logged > 0 {
        return DayClass::LoggedBleeding { level: logged };
    }

    let Some(last_start) = anchor else {
        return DayClass::Neutral;
    };

    let days_since_start = (date - last_start).num_days();
    if days_since_start < 0 {
        return DayClass::Neutral;
    }

    // cycle_length_days > 0 is guaranteed by CycleConfig::new
    let offset = days_since_start % config.cycle_length_days();
    if offset < config.period_length_days() {
        DayClass::PredictedBleeding
    } else {
        DayClass::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(cycle: i64, period: i64) -> CycleConfig {
        CycleConfig::new(cycle, period).unwrap()
    }

    #[test]
    fn no_bleeding_logs_means_neutral() {
        let logs = vec![DailyLog::bleeding(day(2024, 1, 1), 0)];
        assert_eq!(
            classify_day(day(2024, 1, 2), &logs, &config(30, 5)),
            DayClass::Neutral
        );
        assert_eq!(classify_day(day(2024, 1, 2), &[], &config(30, 5)), DayClass::Neutral);
    }

    #[test]
    fn predicts_inside_period_window_of_single_start() {
        let logs = vec![DailyLog::bleeding(day(2024, 1, 1), 3)];
        let config = config(30, 5);

        assert_eq!(
            classify_day(day(2024, 1, 1), &logs, &config),
            DayClass::LoggedBleeding { level: 3 }
        );
        assert_eq!(
            classify_day(day(2024, 1, 3), &logs, &config),
            DayClass::PredictedBleeding
        );
        assert_eq!(classify_day(day(2024, 1, 10), &logs, &config), DayClass::Neutral);
        // next cycle: 30 and 34 days later
        assert_eq!(
            classify_day(day(2024, 1, 31), &logs, &config),
            DayClass::PredictedBleeding
        );
        assert_eq!(
            classify_day(day(2024, 2, 4), &logs, &config),
            DayClass::PredictedBleeding
        );
        assert_eq!(classify_day(day(2024, 2, 5), &logs, &config), DayClass::Neutral);
    }

    #[test]
    fn days_before_anchor_are_neutral() {
        let logs = vec![DailyLog::bleeding(day(2024, 3, 10), 2)];
        assert_eq!(
            classify_day(day(2024, 3, 9), &logs, &config(28, 5)),
            DayClass::Neutral
        );
        assert_eq!(
            classify_day(day(2024, 2, 11), &logs, &config(28, 5)),
            DayClass::Neutral
        );
    }

    #[test]
    fn logged_bleeding_overrides_prediction() {
        let logs = vec![
            DailyLog::bleeding(day(2024, 1, 1), 1),
            DailyLog::bleeding(day(2024, 1, 20), 4),
        ];
        // 2024-01-20 is far outside the predicted window of 2024-01-01
        assert_eq!(
            classify_day(day(2024, 1, 20), &logs, &config(30, 5)),
            DayClass::LoggedBleeding { level: 4 }
        );
    }

    #[test]
    fn anchor_is_latest_bleeding_day() {
        let logs = vec![
            DailyLog::bleeding(day(2024, 1, 1), 2),
            DailyLog::bleeding(day(2024, 1, 2), 3),
            DailyLog::bleeding(day(2024, 1, 3), 1),
            DailyLog::bleeding(day(2024, 1, 9), 0),
        ];
        assert_eq!(last_bleeding_day(&logs), Some(day(2024, 1, 3)));
        // projected from 2024-01-03, not from 2024-01-01
        assert_eq!(
            classify_day(day(2024, 2, 6), &logs, &config(30, 5)),
            DayClass::PredictedBleeding
        );
        assert_eq!(
            classify_day(day(2024, 1, 31), &logs, &config(30, 5)),
            DayClass::Neutral
        );
    }

    #[test]
    fn zero_period_length_never_predicts() {
        let logs = vec![DailyLog::bleeding(day(2024, 1, 1), 2)];
        assert_eq!(
            classify_day(day(2024, 1, 31), &logs, &config(30, 0)),
            DayClass::Neutral
        );
    }

    #[test]
    fn classification_is_repeatable() {
        let logs = vec![DailyLog::bleeding(day(2024, 1, 1), 2)];
        let config = config(30, 5);
        let first = classify_day(day(2024, 3, 2), &logs, &config);
        let second = classify_day(day(2024, 3, 2), &logs, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn month_covers_every_day() {
        let logs = vec![DailyLog::bleeding(day(2024, 1, 30), 2)];
        let days = classify_month(2024, 2, &logs, &config(30, 5)).unwrap();

        assert_eq!(days.len(), 29);
        assert_eq!(days[0].date, day(2024, 2, 1));
        assert_eq!(days[0].class, DayClass::PredictedBleeding);
        assert_eq!(days[3].class, DayClass::Neutral);
        assert_eq!(days[28].date, day(2024, 2, 29));
        assert_eq!(days[28].class, DayClass::PredictedBleeding);
    }

    #[test]
    fn month_rejects_invalid_month() {
        let err = classify_month(2024, 13, &[], &CycleConfig::default()).unwrap_err();
        assert_eq!(err, InvalidMonth { year: 2024, month: 13 });
    }

    #[test]
    fn day_class_wire_shape() {
        let json = serde_json::to_value(DayClass::LoggedBleeding { level: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "logged_bleeding", "level": 2 }));
        let json = serde_json::to_value(DayClass::PredictedBleeding).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "predicted_bleeding" }));
    }
}
