use super::models::{AcceptedRow, ProductDraft, RowError, RowIssue, ValidatedBatch};
use super::parser::{RawRow, parse_rows};
use rust_decimal::Decimal;
use std::str::FromStr;
use storage::models::ProductStatus;
use tracing::warn;
use uuid::Uuid;

const NAME: usize = 0;
const SLUG: usize = 1;
const PRICE: usize = 2;
const CATEGORY: usize = 3;
const DESCRIPTION: usize = 4;
const STOCK: usize = 5;

pub struct RowValidator;

impl RowValidator {
    /// Runs every check on the row and returns either a draft or all the
    /// reasons the row was refused, in column order.
    pub fn validate(row: &RawRow) -> Result<ProductDraft, RowError> {
        let mut errors = Vec::new();

        let name = row.field(NAME);
        if name.is_empty() {
            errors.push(RowIssue::NameRequired);
        }

        let slug = row.field(SLUG);
        if slug.is_empty() {
            errors.push(RowIssue::SlugRequired);
        }

        let price = parse_price(row.field(PRICE));
        if price.is_none() {
            errors.push(RowIssue::PriceInvalid);
        }

        let category = row.field(CATEGORY);
        if category.is_empty() {
            errors.push(RowIssue::CategoryRequired);
        }

        let description = row.field(DESCRIPTION);
        if description.is_empty() {
            errors.push(RowIssue::DescriptionRequired);
        }

        let stock = parse_stock(row.field(STOCK));
        if stock.is_none() {
            errors.push(RowIssue::StockInvalid);
        }

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(ProductDraft {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug: slug.to_string(),
                price,
                category: category.to_string(),
                description: description.to_string(),
                stock,
                featured: false,
                status: ProductStatus::Active,
            }),
            _ => Err(RowError {
                line: row.line,
                errors,
            }),
        }
    }
}

/// Plain or scientific decimal notation. Digit separators are refused.
fn parse_price(value: &str) -> Option<Decimal> {
    if value.is_empty() || value.contains('_') {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn parse_stock(value: &str) -> Option<i32> {
    value.parse::<i32>().ok()
}

/// Parse and validate a whole file without side effects.
pub fn validate_csv(content: &str) -> ValidatedBatch {
    let rows = match parse_rows(content) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Rejecting CSV import: {}", e);
            return ValidatedBatch::rejected(e.to_string());
        }
    };

    let mut batch = ValidatedBatch::default();
    for row in &rows {
        match RowValidator::validate(row) {
            Ok(draft) => batch.accepted.push(AcceptedRow {
                line: row.line,
                draft,
            }),
            Err(row_error) => batch.errors.push(row_error),
        }
    }

    batch
}
