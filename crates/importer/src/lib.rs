pub mod csv_import;
pub mod error;
pub mod sinks;
pub mod traits;

pub use csv_import::{
    CsvProductImporter, EXPECTED_HEADER, ImportPolicy, ImportResult, ProductDraft, RowError,
    RowIssue, ValidatedBatch, read_csv_file, validate_csv,
};
pub use error::{ImporterError, Result};
pub use sinks::{ApiProductClient, DatabaseProductSink, StaticToken, TokenProvider};
pub use traits::{PersistedProduct, ProductSink};
