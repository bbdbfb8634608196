use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid import file: {0}")]
    InvalidFile(String),

    #[error("Product API responded with {status}: {body}")]
    ApiError { status: u16, body: String },

    /// A persistence call failed part-way through a batch. `imported` counts the
    /// rows confirmed before the failing one.
    #[error("Failed to persist row on line {line} after {imported} product(s) were imported: {source}")]
    PersistenceError {
        line: usize,
        imported: usize,
        #[source]
        source: Box<ImporterError>,
    },
}

impl ImporterError {
    /// Number of products that were persisted before this error surfaced.
    pub fn imported_before_failure(&self) -> usize {
        match self {
            Self::PersistenceError { imported, .. } => *imported,
            _ => 0,
        }
    }
}
