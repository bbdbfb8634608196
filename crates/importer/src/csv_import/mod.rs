//! Bulk product import from CSV text.
//!
//! The flow is a single linear pass: the header gate, per-row validation that
//! collects every failing check, the batch policy, then sequential persistence
//! through a [`ProductSink`](crate::traits::ProductSink).

mod importer;
mod models;
mod parser;
mod source;
mod validator;

pub use importer::CsvProductImporter;
pub use models::{
    AcceptedRow, ImportPolicy, ImportResult, ProductDraft, RowError, RowIssue, ValidatedBatch,
};
pub use parser::{EXPECTED_COLUMNS, EXPECTED_HEADER, HeaderError, RawRow, parse_rows};
pub use source::{DEFAULT_MAX_BYTES, read_csv_file};
pub use validator::{RowValidator, validate_csv};
