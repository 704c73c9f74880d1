use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("day {0} is outside 1-31")]
    DayOutOfRange(i64),

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("'{0}' is not a palette color")]
    UnknownPaletteColor(String),

    #[error("dataset name must be at least {0} characters")]
    InvalidDatasetName(usize),

    #[error("display name must not be empty")]
    InvalidDisplayName,
}

pub type Result<T> = std::result::Result<T, JournalError>;
