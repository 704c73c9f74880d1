use crate::config::DAY_WINDOW;
use crate::models::{Record, is_valid_day};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Point lookups by day, used to decorate individual calendar cells.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    by_day: HashMap<u8, Record>,
}

impl DayIndex {
    /// A later record for the same day replaces an earlier one. Days outside
    /// 1-31 are left out.
    pub fn build(records: &[Record]) -> Self {
        let by_day = records
            .iter()
            .filter(|record| is_valid_day(i64::from(record.day)))
            .map(|record| (record.day, record.clone()))
            .collect();
        Self { by_day }
    }

    pub fn lookup(&self, day: u8) -> Option<&Record> {
        self.by_day.get(&day)
    }

    pub fn lookup_date(&self, date: NaiveDate, reference: NaiveDate) -> Option<&Record> {
        date_to_index(date, reference).and_then(|day| self.lookup(day))
    }

    pub fn len(&self) -> usize {
        self.by_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

/// Inverse of [`crate::weeks::day_to_date`]. Dates outside the 30 days
/// ending at `reference` have no day.
pub fn date_to_index(date: NaiveDate, reference: NaiveDate) -> Option<u8> {
    let delta = (reference - date).num_days();
    if (0..DAY_WINDOW).contains(&delta) {
        u8::try_from(DAY_WINDOW - delta).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorMode;
    use crate::weeks::day_to_date;
    use chrono::Duration;

    fn record(day: u8, color: &str) -> Record {
        Record {
            day,
            color: color.into(),
            color_mode: ColorMode::Dark,
            note: None,
        }
    }

    #[test]
    fn lookup_returns_record_for_day() {
        let index = DayIndex::build(&[record(3, "#111111"), record(9, "#999999")]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(9).map(|r| r.color.as_str()), Some("#999999"));
        assert!(index.lookup(4).is_none());
        assert!(DayIndex::build(&[]).is_empty());
    }

    #[test]
    fn duplicate_days_keep_last() {
        let index = DayIndex::build(&[record(3, "#111111"), record(3, "#333333")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(3).map(|r| r.color.as_str()), Some("#333333"));
    }

    #[test]
    fn out_of_range_days_are_not_indexed() {
        let index = DayIndex::build(&[record(45, "#454545"), record(0, "#000000"), record(31, "#313131")]);
        assert_eq!(index.len(), 1);
        assert!(index.lookup(45).is_none());
        assert!(index.lookup(0).is_none());
        assert!(index.lookup(31).is_some());
    }

    #[test]
    fn date_to_index_inverts_day_mapping() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        for day in 1..=30u8 {
            let date = day_to_date(day, reference).unwrap();
            assert_eq!(date_to_index(date, reference), Some(day));
        }
    }

    #[test]
    fn dates_outside_window_have_no_day() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(date_to_index(reference + Duration::days(1), reference), None);
        assert_eq!(date_to_index(reference - Duration::days(30), reference), None);
        assert_eq!(date_to_index(reference - Duration::days(29), reference), Some(1));
    }

    #[test]
    fn lookup_date_combines_window_and_index() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let index = DayIndex::build(&[record(30, "#ABCDEF")]);
        assert!(index.lookup_date(reference, reference).is_some());
        assert!(index.lookup_date(reference - Duration::days(1), reference).is_none());
        assert!(index.lookup_date(reference - Duration::days(400), reference).is_none());
    }
}
