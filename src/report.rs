use crate::config::DAY_WINDOW;
use crate::models::{ColorMode, Record, is_valid_day};
use crate::weeks::{WeekBucket, group_by_week};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub tracked_days: usize,
    pub light_days: usize,
    pub dark_days: usize,
    pub notes: usize,
    pub dominant_color: Option<String>,
    /// Share of the 30-day window with an entry, in percent.
    pub window_coverage: f64,
    pub weeks: Vec<WeekBucket>,
}

/// Records with a valid day, sorted by day.
pub fn month_view(records: &[Record]) -> Vec<Record> {
    let mut view: Vec<Record> = records
        .iter()
        .filter(|record| is_valid_day(i64::from(record.day)))
        .cloned()
        .collect();
    view.sort_by_key(|record| record.day);
    view
}

pub fn summarize(records: &[Record], reference: NaiveDate) -> MonthSummary {
    let view = month_view(records);

    let light_days = view
        .iter()
        .filter(|record| record.color_mode == ColorMode::Light)
        .count();
    let notes = view
        .iter()
        .filter(|record| record.note.as_deref().is_some_and(|note| !note.trim().is_empty()))
        .count();

    let window_days: BTreeSet<u8> = view
        .iter()
        .map(|record| record.day)
        .filter(|day| i64::from(*day) <= DAY_WINDOW)
        .collect();
    let window_coverage = window_days.len() as f64 * 100.0 / DAY_WINDOW as f64;

    MonthSummary {
        tracked_days: view.len(),
        light_days,
        dark_days: view.len() - light_days,
        notes,
        dominant_color: dominant_color(&view),
        window_coverage,
        weeks: group_by_week(&view, reference),
    }
}

/// Most frequent color, compared case-insensitively. Ties go to the color
/// seen on the earliest day.
fn dominant_color(view: &[Record]) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in view {
        let color = record.color.to_ascii_uppercase();
        match counts.iter_mut().find(|(seen, _)| *seen == color) {
            Some((_, count)) => *count += 1,
            None => counts.push((color, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (color, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((color, count));
        }
    }
    best.map(|(color, _)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u8, color: &str, color_mode: ColorMode, note: Option<&str>) -> Record {
        Record {
            day,
            color: color.into(),
            color_mode,
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn month_view_sorts_and_filters() {
        let records = vec![
            record(12, "#000000", ColorMode::Dark, None),
            record(0, "#000000", ColorMode::Dark, None),
            record(3, "#FFFFFF", ColorMode::Light, None),
            record(33, "#FFFFFF", ColorMode::Light, None),
        ];
        let days: Vec<u8> = month_view(&records).iter().map(|r| r.day).collect();
        assert_eq!(days, vec![3, 12]);
    }

    #[test]
    fn summary_counts_modes_notes_and_coverage() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let records = vec![
            record(30, "#3b82f6", ColorMode::Light, Some("calm")),
            record(29, "#EF4444", ColorMode::Dark, Some("  ")),
            record(1, "#3B82F6", ColorMode::Dark, None),
            record(31, "#EF4444", ColorMode::Light, None),
        ];
        let summary = summarize(&records, reference);

        assert_eq!(summary.tracked_days, 4);
        assert_eq!(summary.light_days, 2);
        assert_eq!(summary.dark_days, 2);
        assert_eq!(summary.notes, 1);
        assert_eq!(summary.window_coverage, 10.0);
        assert_eq!(summary.dominant_color.as_deref(), Some("#3B82F6"));
        let bucketed: usize = summary.weeks.iter().map(|w| w.records.len()).sum();
        assert_eq!(bucketed, 4);
    }

    #[test]
    fn dominant_color_ties_go_to_earliest_day() {
        let records = vec![
            record(9, "#EF4444", ColorMode::Light, None),
            record(4, "#22C55E", ColorMode::Light, None),
        ];
        let summary = summarize(&records, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(summary.dominant_color.as_deref(), Some("#22C55E"));
    }

    #[test]
    fn summary_serializes_with_iso_week_bounds() {
        let records = vec![record(30, "#3B82F6", ColorMode::Dark, Some("calm"))];
        let summary = summarize(&records, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["tracked_days"], 1);
        assert_eq!(value["dominant_color"], "#3B82F6");
        assert_eq!(value["weeks"][0]["start"], "2025-06-01");
        assert_eq!(value["weeks"][0]["end"], "2025-06-07");
        assert_eq!(value["weeks"][0]["records"][0]["colorMode"], "dark");
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[], NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(summary.tracked_days, 0);
        assert_eq!(summary.dominant_color, None);
        assert_eq!(summary.window_coverage, 0.0);
        assert!(summary.weeks.is_empty());
    }
}
