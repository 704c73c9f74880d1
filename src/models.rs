use crate::config::{MAX_DAY, MIN_DATASET_NAME_LEN};
use crate::errors::{JournalError, Result};
use crate::normalize::normalize;
use crate::palette;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ColorMode::Light),
            "dark" => Some(ColorMode::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One day's canonical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub day: u8,
    pub color: String,
    pub color_mode: ColorMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Record {
    /// Validated constructor used on the write path.
    pub fn new(day: u8, color: &str, color_mode: ColorMode, note: Option<String>) -> Result<Self> {
        if !is_valid_day(i64::from(day)) {
            return Err(JournalError::DayOutOfRange(i64::from(day)));
        }
        let color =
            palette::canonical_hex(color).ok_or_else(|| JournalError::InvalidColor(color.to_string()))?;
        let note = note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        Ok(Self {
            day,
            color,
            color_mode,
            note,
        })
    }

    pub fn from_palette(day: u8, name: &str, color_mode: ColorMode, note: Option<String>) -> Result<Self> {
        let entry =
            palette::lookup_name(name).ok_or_else(|| JournalError::UnknownPaletteColor(name.to_string()))?;
        Self::new(day, entry.hex, color_mode, note)
    }
}

/// Pre-migration shape that kept light and dark colors in separate slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRecord {
    pub day: u8,
    pub light_color: Option<String>,
    pub dark_color: Option<String>,
    pub note: Option<String>,
}

impl LegacyRecord {
    /// Picks the populated slot. Light wins when both are set.
    pub fn into_record(self) -> Option<Record> {
        let (color, color_mode) = match (populated(self.light_color), populated(self.dark_color)) {
            (Some(light), _) => (light, ColorMode::Light),
            (None, Some(dark)) => (dark, ColorMode::Dark),
            (None, None) => return None,
        };

        Some(Record {
            day: self.day,
            color,
            color_mode,
            note: self.note,
        })
    }
}

fn populated(slot: Option<String>) -> Option<String> {
    slot.filter(|value| !value.is_empty())
}

/// A persisted `colorData` element after shape detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRecord {
    Canonical(Record),
    Legacy(LegacyRecord),
    /// A day that exists in the document but has no color yet.
    Empty { day: u8 },
}

impl StoredRecord {
    pub fn day(&self) -> u8 {
        match self {
            StoredRecord::Canonical(record) => record.day,
            StoredRecord::Legacy(legacy) => legacy.day,
            StoredRecord::Empty { day } => *day,
        }
    }
}

/// Normalized element that keeps days without data, for views that need
/// every tracked day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayEntry {
    Filled(Record),
    Empty { day: u8 },
}

impl DayEntry {
    pub fn day(&self) -> u8 {
        match self {
            DayEntry::Filled(record) => record.day,
            DayEntry::Empty { day } => *day,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            DayEntry::Filled(record) => Some(record),
            DayEntry::Empty { .. } => None,
        }
    }
}

/// The whole persisted unit. Always written with canonical records only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub dataset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub color_data: Vec<Record>,
}

impl Document {
    pub fn new(dataset_name: &str, description: Option<String>) -> Result<Self> {
        let dataset_name = dataset_name.trim();
        if dataset_name.chars().count() < MIN_DATASET_NAME_LEN {
            return Err(JournalError::InvalidDatasetName(MIN_DATASET_NAME_LEN));
        }

        Ok(Self {
            dataset_name: dataset_name.to_string(),
            description: description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            color_data: Vec::new(),
        })
    }

    /// Builds a document from whatever was persisted, migrating legacy
    /// records on the way. Never fails: missing metadata becomes empty.
    pub fn from_value(raw: &Value) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            dataset_name: text("datasetName").unwrap_or_default(),
            description: text("description"),
            color_data: normalize(Some(raw)),
        }
    }

    pub fn record(&self, day: u8) -> Option<&Record> {
        self.color_data.iter().find(|record| record.day == day)
    }

    /// Replaces the record for the same day, or appends. Returns the
    /// replaced record.
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        match self.color_data.iter_mut().find(|existing| existing.day == record.day) {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                self.color_data.push(record);
                None
            }
        }
    }

    pub fn remove_day(&mut self, day: u8) -> Option<Record> {
        let index = self.color_data.iter().position(|record| record.day == day)?;
        Some(self.color_data.remove(index))
    }
}

pub fn is_valid_day(day: i64) -> bool {
    (1..=i64::from(MAX_DAY)).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_light_wins_over_dark() {
        let legacy = LegacyRecord {
            day: 4,
            light_color: Some("#FFFFFF".into()),
            dark_color: Some("#000000".into()),
            note: None,
        };
        let record = legacy.into_record().expect("record");
        assert_eq!(record.color, "#FFFFFF");
        assert_eq!(record.color_mode, ColorMode::Light);
    }

    #[test]
    fn legacy_with_empty_slots_has_no_record() {
        let legacy = LegacyRecord {
            day: 4,
            light_color: Some(String::new()),
            dark_color: None,
            note: Some("later".into()),
        };
        assert!(legacy.into_record().is_none());
    }

    #[test]
    fn record_new_validates_day_and_color() {
        assert!(matches!(
            Record::new(0, "#FF0000", ColorMode::Light, None),
            Err(JournalError::DayOutOfRange(0))
        ));
        assert!(matches!(
            Record::new(32, "#FF0000", ColorMode::Light, None),
            Err(JournalError::DayOutOfRange(32))
        ));
        assert!(matches!(
            Record::new(3, "red", ColorMode::Light, None),
            Err(JournalError::InvalidColor(_))
        ));

        let record = Record::new(3, "#ff0000", ColorMode::Dark, Some("  ".into())).unwrap();
        assert_eq!(record.color, "#FF0000");
        assert_eq!(record.note, None);
    }

    #[test]
    fn record_from_palette_uses_allow_list() {
        let record = Record::from_palette(9, "green", ColorMode::Light, None).unwrap();
        assert_eq!(record.color, "#22C55E");
        assert!(matches!(
            Record::from_palette(9, "teal", ColorMode::Light, None),
            Err(JournalError::UnknownPaletteColor(_))
        ));
    }

    #[test]
    fn record_serializes_camel_case_without_empty_note() {
        let record = Record::new(10, "#0000FF", ColorMode::Dark, None).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "day": 10, "color": "#0000FF", "colorMode": "dark" }));
    }

    #[test]
    fn document_requires_dataset_name() {
        assert!(matches!(
            Document::new(" a ", None),
            Err(JournalError::InvalidDatasetName(2))
        ));
        let document = Document::new(" April ", Some(String::new())).unwrap();
        assert_eq!(document.dataset_name, "April");
        assert_eq!(document.description, None);
    }

    #[test]
    fn upsert_replaces_same_day() {
        let mut document = Document::new("April", None).unwrap();
        let first = Record::new(5, "#FF0000", ColorMode::Light, None).unwrap();
        let second = Record::new(5, "#00FF00", ColorMode::Dark, None).unwrap();

        assert_eq!(document.upsert(first.clone()), None);
        assert_eq!(document.upsert(second.clone()), Some(first));
        assert_eq!(document.color_data, vec![second.clone()]);
        assert_eq!(document.record(5), Some(&second));

        assert_eq!(document.remove_day(5), Some(second));
        assert_eq!(document.remove_day(5), None);
        assert!(document.color_data.is_empty());
    }

    #[test]
    fn document_from_value_migrates_legacy_entries() {
        let raw = json!({
            "datasetName": "April",
            "colorData": [
                { "day": 1, "darkColor": "#111111" },
                { "day": 2, "color": "#222222", "colorMode": "light", "note": "ok" }
            ]
        });
        let document = Document::from_value(&raw);
        assert_eq!(document.dataset_name, "April");
        assert_eq!(document.description, None);
        assert_eq!(document.color_data.len(), 2);
        assert_eq!(document.color_data[0].color_mode, ColorMode::Dark);
        assert_eq!(document.color_data[1].note.as_deref(), Some("ok"));
    }
}
