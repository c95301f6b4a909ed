use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{BleedingDay, BleedingRun, DailyLog};

/// Per-day maximum bleeding level, dropping days without bleeding.
/// Duplicate logs for one day are merged by taking the max.
pub fn bleeding_levels(logs: &[DailyLog]) -> BTreeMap<NaiveDate, u8> {
    let mut by_day = BTreeMap::<NaiveDate, u8>::new();
    for log in logs {
        let level = by_day.entry(log.date).or_default();
        *level = (*level).max(log.blood_level);
    }
    by_day.retain(|_, level| *level > 0);
    by_day
}

/// Group bleeding days into runs of consecutive calendar days, oldest first.
pub fn bleeding_runs(logs: &[DailyLog]) -> Vec<BleedingRun> {
    let mut grouped: Vec<BleedingRun> = vec![];
    let mut current: Vec<BleedingDay> = vec![];

    for (date, level) in bleeding_levels(logs) {
        let continues = current
            .last()
            .is_some_and(|prev| (date - prev.date).num_days() == 1);

        if !continues {
            if let Some(run) = close_run(&mut current) {
                grouped.push(run);
            }
        }
        current.push(BleedingDay { date, level });
    }

    if let Some(run) = close_run(&mut current) {
        grouped.push(run);
    }

    grouped
}

fn close_run(days: &mut Vec<BleedingDay>) -> Option<BleedingRun> {
    let start_date = days.first()?.date;
    let end_date = days.last()?.date;
    Some(BleedingRun {
        start_date,
        end_date,
        days: days.drain(..).collect(),
    })
}
