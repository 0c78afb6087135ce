use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KpiError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Table '{table}' row {row}: invalid {column} value {value:?} ({reason})")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Decimal overflow while summing {0}")]
    Overflow(String),

    #[error("Failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KpiError>;
