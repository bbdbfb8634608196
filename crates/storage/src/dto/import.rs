use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a bulk CSV import as returned by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    /// Number of products persisted
    pub imported: usize,
    /// One entry per rejected data row, in file order
    pub errors: Vec<ImportRowError>,
    /// Set when the whole file was rejected before any row was read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportRowError {
    /// 1-based line number, the header being line 1
    pub line: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejection.is_none() && self.errors.is_empty()
    }
}
