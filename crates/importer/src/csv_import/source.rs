use crate::{ImporterError, Result};
use std::path::Path;

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Reads an import file after the checks the importer itself leaves to its
/// caller: `.csv` extension, size cap and UTF-8 content.
pub async fn read_csv_file(path: &Path, max_bytes: u64) -> Result<String> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ImporterError::InvalidFile(format!(
            "{} is not a .csv file",
            path.display()
        )));
    }

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes {
        return Err(ImporterError::InvalidFile(format!(
            "{} is {} bytes, limit is {} bytes",
            path.display(),
            size,
            max_bytes
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    String::from_utf8(bytes).map_err(|_| {
        ImporterError::InvalidFile(format!("{} is not valid UTF-8", path.display()))
    })
}
