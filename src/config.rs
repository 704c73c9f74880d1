use std::{env, path::PathBuf};

/// Store key holding the whole journal document.
pub const DOCUMENT_KEY: &str = "userData";

/// Store key holding the display name shown in navigation.
pub const DISPLAY_NAME_KEY: &str = "userName";

/// Number of days tracked back from the reference date. Day 30 is the
/// reference date itself, day 1 is 29 days earlier.
pub const DAY_WINDOW: i64 = 30;

/// Highest accepted day-of-month value.
pub const MAX_DAY: u8 = 31;

pub const MIN_DATASET_NAME_LEN: usize = 2;

pub const DATA_PATH_ENV: &str = "COLOR_JOURNAL_DATA_PATH";
pub const DEFAULT_DATA_PATH: &str = "data/journal.json";

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var(DATA_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}
