use crate::config::DAY_WINDOW;
use crate::models::{Record, is_valid_day};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    pub week: u32,
    /// Sunday of the week holding the bucket's first record.
    pub start: NaiveDate,
    /// Saturday of that week.
    pub end: NaiveDate,
    pub records: Vec<Record>,
}

/// Maps a tracked day onto the calendar: day 30 is `reference`, day 1 is 29
/// days before it. Days past 30 land after `reference`.
pub fn day_to_date(day: u8, reference: NaiveDate) -> Option<NaiveDate> {
    reference.checked_sub_signed(Duration::days(DAY_WINDOW - i64::from(day)))
}

/// Groups records by the week their mapped date falls in, most recent week
/// first. Records keep their input order inside a bucket.
pub fn group_by_week(records: &[Record], reference: NaiveDate) -> Vec<WeekBucket> {
    let mut buckets: BTreeMap<u32, WeekBucket> = BTreeMap::new();

    for record in records {
        if !is_valid_day(i64::from(record.day)) {
            continue;
        }
        let Some(date) = day_to_date(record.day, reference) else {
            continue;
        };
        let Some(week) = week_number(date) else {
            continue;
        };

        buckets
            .entry(week)
            .or_insert_with(|| {
                let start = week_start(date);
                WeekBucket {
                    week,
                    start,
                    end: start + Duration::days(6),
                    records: Vec::new(),
                }
            })
            .records
            .push(record.clone());
    }

    buckets.into_values().rev().collect()
}

/// Week of year with weeks starting on Sunday; week 1 is the week that
/// contains January 1st. Late December dates can therefore be week 1 of the
/// following year.
pub fn week_number(date: NaiveDate) -> Option<u32> {
    let start = week_start(date);
    let next_year_first = first_week_start(date.year() + 1)?;
    if start >= next_year_first {
        return Some(1);
    }

    let first = first_week_start(date.year())?;
    Some(((start - first).num_days() / 7) as u32 + 1)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn first_week_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(week_start)
}
