use crate::Result;
use crate::csv_import::ProductDraft;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a sink reports back for a stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProduct {
    #[serde(alias = "product_id")]
    pub id: Uuid,
    pub slug: String,
}

/// The create-or-update operation the importer hands accepted drafts to.
#[async_trait::async_trait]
pub trait ProductSink: Send + Sync {
    /// Checks a draft against the sink's own rules without storing it.
    /// Runs for the whole batch before the first write.
    fn check(&self, _draft: &ProductDraft) -> Result<()> {
        Ok(())
    }

    async fn create_or_update(&self, draft: &ProductDraft) -> Result<PersistedProduct>;

    fn name(&self) -> &'static str;
}

#[async_trait::async_trait]
impl<S: ProductSink + ?Sized> ProductSink for &S {
    fn check(&self, draft: &ProductDraft) -> Result<()> {
        (**self).check(draft)
    }

    async fn create_or_update(&self, draft: &ProductDraft) -> Result<PersistedProduct> {
        (**self).create_or_update(draft).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
