use thiserror::Error;

/// Errors that can occur while loading tables or computing a tank mass.
#[derive(Error, Debug)]
pub enum TankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// An input field lies outside its supported range.
    #[error("{field} out of supported range: {value} (expected {min}..={max})")]
    Range {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A required exact-match entry is absent from its table.
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Malformed reference table (ragged grid, unsorted axis, empty table).
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

impl TankError {
    /// Name of the offending input field for range failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TankError::Range { field, .. } => Some(field),
            _ => None,
        }
    }
}
