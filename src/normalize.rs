use crate::models::{ColorMode, DayEntry, LegacyRecord, Record, StoredRecord, is_valid_day};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Every field optional so that one bad field only drops its element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    day: Option<f64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    color_mode: Option<String>,
    #[serde(default)]
    light_color: Option<String>,
    #[serde(default)]
    dark_color: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

/// Canonical records in input order. Days with no color are omitted.
pub fn normalize(raw: Option<&Value>) -> Vec<Record> {
    normalize_entries(raw)
        .into_iter()
        .filter_map(|entry| match entry {
            DayEntry::Filled(record) => Some(record),
            DayEntry::Empty { .. } => None,
        })
        .collect()
}

/// Like [`normalize`] but keeps placeholder days as [`DayEntry::Empty`].
pub fn normalize_entries(raw: Option<&Value>) -> Vec<DayEntry> {
    stored_records(raw).into_iter().map(migrate).collect()
}

pub fn normalize_str(raw: &str) -> Vec<Record> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => normalize(Some(&value)),
        Err(err) => {
            warn!("stored journal is not valid json: {err}");
            Vec::new()
        }
    }
}

/// Shape detection for each `colorData` element. Elements without a usable
/// day are dropped.
pub fn stored_records(raw: Option<&Value>) -> Vec<StoredRecord> {
    let Some(items) = raw
        .and_then(|document| document.get("colorData"))
        .and_then(Value::as_array)
    else {
        if raw.is_some() {
            debug!("document has no colorData array");
        }
        return Vec::new();
    };

    items.iter().filter_map(classify).collect()
}

fn classify(item: &Value) -> Option<StoredRecord> {
    let raw = match RawRecord::deserialize(item) {
        Ok(raw) => raw,
        Err(err) => {
            debug!("skipping malformed colorData element: {err}");
            return None;
        }
    };

    let day = match raw.day {
        Some(day) if day.fract() == 0.0 && is_valid_day(day as i64) => day as u8,
        other => {
            debug!(?other, "skipping colorData element without a valid day");
            return None;
        }
    };

    let light = raw.light_color.filter(|color| !color.is_empty());
    let dark = raw.dark_color.filter(|color| !color.is_empty());
    if light.is_some() || dark.is_some() {
        return Some(StoredRecord::Legacy(LegacyRecord {
            day,
            light_color: light,
            dark_color: dark,
            note: raw.note,
        }));
    }

    let color = raw.color.filter(|color| !color.is_empty());
    let color_mode = raw.color_mode.as_deref().and_then(ColorMode::parse);
    match (color, color_mode) {
        (Some(color), Some(color_mode)) => Some(StoredRecord::Canonical(Record {
            day,
            color,
            color_mode,
            note: raw.note,
        })),
        _ => Some(StoredRecord::Empty { day }),
    }
}

fn migrate(stored: StoredRecord) -> DayEntry {
    let day = stored.day();
    match stored {
        StoredRecord::Canonical(record) => DayEntry::Filled(record),
        StoredRecord::Legacy(legacy) => legacy
            .into_record()
            .map_or(DayEntry::Empty { day }, DayEntry::Filled),
        StoredRecord::Empty { .. } => DayEntry::Empty { day },
    }
}
