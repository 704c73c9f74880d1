pub mod config;
pub mod errors;
pub mod gateway;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod report;
pub mod state;
pub mod storage;
pub mod weeks;

pub use errors::{JournalError, Result};
pub use gateway::{Gateway, StoreEvent, Subscription};
pub use lookup::{DayIndex, date_to_index};
pub use models::{ColorMode, DayEntry, Document, LegacyRecord, Record, StoredRecord};
pub use normalize::{normalize, normalize_entries, normalize_str};
pub use report::{MonthSummary, month_view, summarize};
pub use state::{JournalContext, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use weeks::{WeekBucket, day_to_date, group_by_week};
