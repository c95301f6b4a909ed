use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::DailyLog;

/// Size of the trailing window used for the index, tips and mood counts.
pub const RECENT_WINDOW_DAYS: i64 = 30;

const PAIN_TIP: &str =
    "Apply heat (15-20 min), try gentle stretches, and consider OTC NSAIDs if safe for you.";
const FLOW_TIP: &str =
    "Track pad/tampon usage; if soaking 1 or more per hour for over 2 hours, seek medical advice.";
const MOOD_TIP: &str =
    "Prioritize sleep, hydration, regular meals; brief daylight walks can help mood.";
const STEADY_TIP: &str = "Great trends! Keep logging daily to personalize insights further.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub period: String,
    pub avg_pain: f64,
    pub avg_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessSummary {
    pub window_days: i64,
    pub recent_entries: usize,
    /// 0-100, higher is better.
    pub wellness_index: u8,
    pub tips: Vec<&'static str>,
    /// Count of recent logs per mood level 0-4.
    pub mood_distribution: [u32; 5],
    pub monthly_trends: Vec<Trend>,
    pub yearly_trends: Vec<Trend>,
}

/// Logs dated on or after `today - 30 days`, oldest first.
pub fn recent(logs: &[DailyLog], today: NaiveDate) -> Vec<&DailyLog> {
    let cutoff = today - Duration::days(RECENT_WINDOW_DAYS);
    let mut recent: Vec<&DailyLog> = logs.iter().filter(|log| log.date >= cutoff).collect();
    recent.sort_by_key(|log| log.date);
    recent
}

#[derive(Debug, Default, Clone, Copy)]
struct Averages {
    pain: f64,
    blood: f64,
    mood: f64,
}

impl Averages {
    fn of(logs: &[&DailyLog]) -> Self {
        if logs.is_empty() {
            return Self::default();
        }
        let n = logs.len() as f64;
        let sum = |f: fn(&DailyLog) -> u8| logs.iter().map(|log| f(log) as f64).sum::<f64>();
        Self {
            pain: sum(|log| log.pain_level) / n,
            blood: sum(|log| log.blood_level) / n,
            mood: sum(|log| log.mood_level) / n,
        }
    }
}

pub fn wellness_index(recent: &[&DailyLog]) -> u8 {
    if recent.is_empty() {
        return 100;
    }
    let avg = Averages::of(recent);
    let penalty = avg.pain * 15.0 + avg.blood * 8.0 + (avg.mood - 2.0).max(0.0) * 10.0;
    (100.0 - penalty).clamp(0.0, 100.0).round() as u8
}

pub fn tips(recent: &[&DailyLog]) -> Vec<&'static str> {
    let avg = Averages::of(recent);
    let mut tips = Vec::new();
    if avg.pain >= 2.0 {
        tips.push(PAIN_TIP);
    }
    if avg.blood >= 3.0 {
        tips.push(FLOW_TIP);
    }
    if avg.mood >= 3.0 {
        tips.push(MOOD_TIP);
    }
    if tips.is_empty() {
        tips.push(STEADY_TIP);
    }
    tips
}

pub fn mood_distribution(recent: &[&DailyLog]) -> [u32; 5] {
    let mut counts = [0u32; 5];
    for log in recent {
        if let Some(count) = counts.get_mut(usize::from(log.mood_level)) {
            *count += 1;
        }
    }
    counts
}

pub fn monthly_trends(logs: &[DailyLog]) -> Vec<Trend> {
    trends(logs, |date| format!("{}-{:02}", date.year(), date.month()))
}

pub fn yearly_trends(logs: &[DailyLog]) -> Vec<Trend> {
    trends(logs, |date| date.year().to_string())
}

fn trends(logs: &[DailyLog], bucket: impl Fn(NaiveDate) -> String) -> Vec<Trend> {
    #[derive(Default)]
    struct Sums {
        pain: u32,
        flow: u32,
        count: u32,
    }

    let mut buckets = BTreeMap::<String, Sums>::new();
    for log in logs {
        let sums = buckets.entry(bucket(log.date)).or_default();
        sums.pain += u32::from(log.pain_level);
        sums.flow += u32::from(log.blood_level);
        sums.count += 1;
    }

    buckets
        .into_iter()
        .map(|(period, sums)| Trend {
            period,
            avg_pain: round_tenths(sums.pain, sums.count),
            avg_flow: round_tenths(sums.flow, sums.count),
        })
        .collect()
}

fn round_tenths(sum: u32, count: u32) -> f64 {
    (f64::from(sum) / f64::from(count) * 10.0).round() / 10.0
}

pub fn summarize(logs: &[DailyLog], today: NaiveDate) -> WellnessSummary {
    let window = recent(logs, today);
    WellnessSummary {
        window_days: RECENT_WINDOW_DAYS,
        recent_entries: window.len(),
        wellness_index: wellness_index(&window),
        tips: tips(&window),
        mood_distribution: mood_distribution(&window),
        monthly_trends: monthly_trends(logs),
        yearly_trends: yearly_trends(logs),
    }
}
