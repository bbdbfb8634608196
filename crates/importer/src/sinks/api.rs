use crate::csv_import::ProductDraft;
use crate::error::{ImporterError, Result};
use crate::traits::{PersistedProduct, ProductSink};
use std::sync::Arc;
use std::time::Duration;

/// Supplies the bearer token for admin API calls.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Sends drafts to the catalog's create-or-update endpoint.
pub struct ApiProductClient {
    base_url: String,
    client: reqwest::Client,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl ApiProductClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("nursery-importer/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build()?,
            tokens: None,
        })
    }

    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Some(Arc::new(provider));
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    pub fn build_request(&self, draft: &ProductDraft) -> Result<reqwest::Request> {
        let mut request = self.client.put(self.endpoint()).json(draft);

        if let Some(token) = self.tokens.as_ref().and_then(|p| p.token()) {
            request = request.bearer_auth(token);
        }

        Ok(request.build()?)
    }
}

#[async_trait::async_trait]
impl ProductSink for ApiProductClient {
    async fn create_or_update(&self, draft: &ProductDraft) -> Result<PersistedProduct> {
        let request = self.build_request(draft)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImporterError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<PersistedProduct>().await?)
    }

    fn name(&self) -> &'static str {
        "product API"
    }
}
