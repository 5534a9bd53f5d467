use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Malformed grid: expected {expected} cells, found {found}")]
    MalformedGrid { expected: usize, found: usize },

    #[error("Cell ({row}, {col}) is outside the 4x4 grid")]
    CellOutOfBounds { row: usize, col: usize },

    #[error("Cell ({row}, {col}) reported more than once")]
    DuplicateCell { row: usize, col: usize },

    #[error("Row index {0} is outside 0..=3")]
    InvalidRow(usize),

    #[error("Base probability {value} at ({row}, {col}) is not in [0, 1]")]
    InvalidProbability { row: usize, col: usize, value: f64 },

    #[error("Invalid tuning: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tuning file error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
