use chrono::NaiveDate;
use serde::Serialize;

use super::history::bleeding_runs;
use crate::models::{CycleConfig, DailyLog};

/// Two consecutive period starts and the number of days between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodInterval {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Early,
    OnTime,
    Late,
}

impl Direction {
    fn from_deviation(deviation: i64) -> Self {
        match deviation.signum() {
            1 => Direction::Late,
            -1 => Direction::Early,
            _ => Direction::OnTime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_deviation(deviation: i64) -> Self {
        match deviation.unsigned_abs() {
            10.. => Severity::Severe,
            6..=9 => Severity::Moderate,
            3..=5 => Severity::Mild,
            _ => Severity::Normal,
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Severity::Severe => {
                "This cycle varied significantly from your usual length. Consider consulting a \
                 clinician, especially if this repeats or you have other concerning symptoms."
            }
            Severity::Moderate => {
                "Some variability is common, but monitor upcoming cycles. If patterns persist or \
                 you have other symptoms, consider medical advice."
            }
            Severity::Mild | Severity::Normal => {
                "Slight variation is common and usually not concerning. Continue tracking."
            }
        }
    }

    /// When to seek care. Only severe deviations carry these.
    pub fn escalation(self) -> &'static [&'static str] {
        match self {
            Severity::Severe => &[
                "Seek care if cycles remain highly irregular for 3+ months.",
                "Seek urgent care for very heavy bleeding, fainting, fever, or severe pain.",
            ],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrregularityReport {
    pub start_days: Vec<NaiveDate>,
    pub expected: i64,
    /// Every interval, oldest first. Only `last` drives the classification.
    pub intervals: Vec<PeriodInterval>,
    pub last: PeriodInterval,
    /// Positive means the cycle ran long.
    pub deviation: i64,
    pub direction: Direction,
    pub severity: Severity,
    pub advice: &'static str,
    pub escalation: &'static [&'static str],
}

/// Days with bleeding whose previous calendar day had none, ascending.
pub fn period_starts(logs: &[DailyLog]) -> Vec<NaiveDate> {
    bleeding_runs(logs)
        .into_iter()
        .map(|run| run.start_date)
        .collect()
}

pub fn intervals(starts: &[NaiveDate]) -> Vec<PeriodInterval> {
    starts
        .windows(2)
        .map(|pair| PeriodInterval {
            from: pair[0],
            to: pair[1],
            days: (pair[1] - pair[0]).num_days(),
        })
        .collect()
}

/// Compare the most recent cycle with the expected length.
///
/// Returns `None` until at least two period starts have been logged.
pub fn analyze(logs: &[DailyLog], config: &CycleConfig) -> Option<IrregularityReport> {
    let start_days = period_starts(logs);
    let intervals = intervals(&start_days);
    let last = *intervals.last()?;

    let expected = config.cycle_length_days();
    let deviation = last.days - expected;
    let severity = Severity::from_deviation(deviation);

    Some(IrregularityReport {
        start_days,
        expected,
        intervals,
        last,
        deviation,
        direction: Direction::from_deviation(deviation),
        severity,
        advice: severity.advice(),
        escalation: severity.escalation(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn starts(days: &[NaiveDate]) -> Vec<DailyLog> {
        days.iter().map(|d| DailyLog::bleeding(*d, 2)).collect()
    }

    fn config(cycle: i64) -> CycleConfig {
        CycleConfig::new(cycle, 5).unwrap()
    }

    #[test]
    fn fewer_than_two_starts_yields_nothing() {
        assert!(analyze(&[], &config(30)).is_none());

        let single = vec![DailyLog::bleeding(day(2024, 1, 1), 3)];
        assert!(analyze(&single, &config(30)).is_none());

        // one continuous period is still a single start
        let one_period = vec![
            DailyLog::bleeding(day(2024, 1, 1), 3),
            DailyLog::bleeding(day(2024, 1, 2), 2),
            DailyLog::bleeding(day(2024, 1, 3), 1),
        ];
        assert!(analyze(&one_period, &config(30)).is_none());
    }

    #[test]
    fn small_deviation_is_normal() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 1, 29), day(2024, 3, 1)]);
        let report = analyze(&logs, &config(30)).unwrap();

        let days: Vec<i64> = report.intervals.iter().map(|i| i.days).collect();
        assert_eq!(days, vec![28, 32]);
        assert_eq!(report.last.days, 32);
        assert_eq!(report.deviation, 2);
        assert_eq!(report.direction, Direction::Late);
        assert_eq!(report.severity, Severity::Normal);
        assert_eq!(report.advice, Severity::Normal.advice());
        assert!(report.escalation.is_empty());
    }

    #[test]
    fn long_cycle_is_severe_and_late() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 2, 15)]);
        let report = analyze(&logs, &config(28)).unwrap();

        assert_eq!(report.last.days, 45);
        assert_eq!(report.deviation, 17);
        assert_eq!(report.direction, Direction::Late);
        assert_eq!(report.severity, Severity::Severe);
        assert!(report.advice.contains("clinician"));
        assert_eq!(report.escalation.len(), 2);
        assert!(report.escalation[1].contains("urgent care"));
    }

    #[test]
    fn short_cycle_is_early() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 1, 23)]);
        let report = analyze(&logs, &config(30)).unwrap();

        assert_eq!(report.deviation, -8);
        assert_eq!(report.direction, Direction::Early);
        assert_eq!(report.severity, Severity::Moderate);
        assert!(report.escalation.is_empty());
    }

    #[test]
    fn exact_cycle_is_on_time() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 1, 29)]);
        let report = analyze(&logs, &config(28)).unwrap();
        assert_eq!(report.deviation, 0);
        assert_eq!(report.direction, Direction::OnTime);
        assert_eq!(report.severity, Severity::Normal);
    }

    #[test]
    fn severity_boundaries() {
        assert_eq!(Severity::from_deviation(2), Severity::Normal);
        assert_eq!(Severity::from_deviation(-3), Severity::Mild);
        assert_eq!(Severity::from_deviation(5), Severity::Mild);
        assert_eq!(Severity::from_deviation(6), Severity::Moderate);
        assert_eq!(Severity::from_deviation(-9), Severity::Moderate);
        assert_eq!(Severity::from_deviation(10), Severity::Severe);
        assert_eq!(Severity::from_deviation(i64::MIN), Severity::Severe);
    }

    #[test]
    fn starts_ignore_continuation_days_and_duplicates() {
        let logs = vec![
            DailyLog::bleeding(day(2024, 3, 5), 1),
            DailyLog::bleeding(day(2024, 2, 1), 2),
            DailyLog::bleeding(day(2024, 2, 2), 3),
            DailyLog::bleeding(day(2024, 2, 2), 1),
            DailyLog::bleeding(day(2024, 3, 4), 4),
            DailyLog::bleeding(day(2024, 3, 20), 0),
        ];
        assert_eq!(period_starts(&logs), vec![day(2024, 2, 1), day(2024, 3, 4)]);
    }

    #[test]
    fn classification_uses_only_the_latest_interval() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 2, 20), day(2024, 3, 21)]);
        let report = analyze(&logs, &config(30)).unwrap();

        assert_eq!(report.intervals.len(), 2);
        assert_eq!(report.intervals[0].days, 50);
        assert_eq!(report.last.days, 30);
        assert_eq!(report.severity, Severity::Normal);
        assert_eq!(report.start_days.len(), 3);
    }

    #[test]
    fn analysis_is_repeatable() {
        let logs = starts(&[day(2024, 1, 1), day(2024, 2, 15)]);
        assert_eq!(analyze(&logs, &config(28)), analyze(&logs, &config(28)));
    }

    #[test]
    fn direction_serializes_with_hyphen() {
        assert_eq!(
            serde_json::to_value(Direction::OnTime).unwrap(),
            serde_json::json!("on-time")
        );
    }
}
