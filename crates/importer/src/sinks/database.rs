use crate::csv_import::ProductDraft;
use crate::error::{ImporterError, Result};
use crate::traits::{PersistedProduct, ProductSink};
use sqlx::PgPool;
use storage::ProductRepository;
use storage::dto::product::UpsertProductRequest;
use validator::Validate;

/// Writes drafts straight into the catalog database.
pub struct DatabaseProductSink {
    pool: PgPool,
}

impl DatabaseProductSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Applies the same request rules as the product API before any SQL runs.
fn checked_request(draft: &ProductDraft) -> Result<UpsertProductRequest> {
    let request = draft.to_upsert_request();
    request.validate().map_err(|e| {
        ImporterError::ValidationError(format!("product '{}': {}", draft.slug, e))
    })?;
    Ok(request)
}

#[async_trait::async_trait]
impl ProductSink for DatabaseProductSink {
    fn check(&self, draft: &ProductDraft) -> Result<()> {
        checked_request(draft).map(|_| ())
    }

    async fn create_or_update(&self, draft: &ProductDraft) -> Result<PersistedProduct> {
        let request = checked_request(draft)?;

        let repo = ProductRepository::new(&self.pool);
        let product = repo.upsert(&request).await?;

        Ok(PersistedProduct {
            id: product.product_id,
            slug: product.slug,
        })
    }

    fn name(&self) -> &'static str {
        "database"
    }
}
