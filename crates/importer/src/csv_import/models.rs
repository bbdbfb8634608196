use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use storage::dto::import::{ImportReport, ImportRowError};
use storage::dto::product::UpsertProductRequest;
use storage::models::ProductStatus;
use uuid::Uuid;

/// A validated row, ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub stock: i32,
    pub featured: bool,
    pub status: ProductStatus,
}

impl ProductDraft {
    pub fn to_upsert_request(&self) -> UpsertProductRequest {
        UpsertProductRequest {
            id: Some(self.id),
            name: self.name.clone(),
            slug: self.slug.clone(),
            price: self.price,
            category: self.category.clone(),
            description: self.description.clone(),
            stock: self.stock,
            featured: self.featured,
            status: self.status,
        }
    }
}

/// Reason a data row was rejected. Serialized as the exact message shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowIssue {
    #[serde(rename = "name required")]
    NameRequired,
    #[serde(rename = "slug required")]
    SlugRequired,
    #[serde(rename = "price invalid")]
    PriceInvalid,
    #[serde(rename = "category required")]
    CategoryRequired,
    #[serde(rename = "description required")]
    DescriptionRequired,
    #[serde(rename = "stock invalid")]
    StockInvalid,
}

impl RowIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameRequired => "name required",
            Self::SlugRequired => "slug required",
            Self::PriceInvalid => "price invalid",
            Self::CategoryRequired => "category required",
            Self::DescriptionRequired => "description required",
            Self::StockInvalid => "stock invalid",
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based, the header is line 1
    pub line: usize,
    pub errors: Vec<RowIssue>,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: ", self.line)?;
        for (idx, issue) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(issue.as_str())?;
        }
        Ok(())
    }
}

/// A draft together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRow {
    pub line: usize,
    pub draft: ProductDraft,
}

/// Output of the parse and validate phase. Nothing has been persisted yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub accepted: Vec<AcceptedRow>,
    pub errors: Vec<RowError>,
    pub rejection: Option<String>,
}

impl ValidatedBatch {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejection.is_none() && self.errors.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.accepted.len() + self.errors.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<RowError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

impl ImportResult {
    pub fn is_success(&self) -> bool {
        self.rejection.is_none() && self.errors.is_empty()
    }
}

impl From<ImportResult> for ImportReport {
    fn from(result: ImportResult) -> Self {
        Self {
            imported: result.imported,
            errors: result
                .errors
                .into_iter()
                .map(|row| ImportRowError {
                    line: row.line,
                    errors: row.errors.iter().map(|e| e.as_str().to_string()).collect(),
                })
                .collect(),
            rejection: result.rejection,
        }
    }
}

/// What to do with the valid rows of a batch that also has invalid rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPolicy {
    /// Persist nothing if any row failed validation.
    #[default]
    AbortOnAnyError,
    /// Persist every valid row and report the failing ones.
    PersistValidRows,
}

impl ImportPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbortOnAnyError => "abort-on-any-error",
            Self::PersistValidRows => "persist-valid-rows",
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "abort-on-any-error" | "abort" => Ok(Self::AbortOnAnyError),
            "persist-valid-rows" | "partial" => Ok(Self::PersistValidRows),
            other => Err(format!(
                "Unknown import policy '{}'. Expected 'abort-on-any-error' or 'persist-valid-rows'",
                other
            )),
        }
    }
}
