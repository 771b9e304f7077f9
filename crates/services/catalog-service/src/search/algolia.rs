//! Algolia REST client.
//!
//! - Base URL: `https://{app_id}.algolia.net`
//! - Authentication: `X-Algolia-Application-Id` and `X-Algolia-API-Key` headers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use common::{AppError, AppResult, SearchConfig};

use super::{SearchDocument, SearchIndex, SearchPatch};

/// Client bound to a single index.
#[derive(Clone)]
pub struct AlgoliaIndex {
    inner: Arc<AlgoliaIndexInner>,
}

struct AlgoliaIndexInner {
    client: reqwest::Client,
    base_url: String,
    index_name: String,
}

impl AlgoliaIndex {
    /// Build a client from configuration. Fails when credentials are missing.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let (Some(app_id), Some(admin_key)) = (&config.app_id, &config.admin_key) else {
            return Err(AppError::internal("Search index credentials are not configured"));
        };
        let base_url = format!("https://{app_id}.algolia.net");
        Self::with_base_url(config, app_id, admin_key, base_url)
    }

    /// Build a client against an explicit host, e.g. a regional or test endpoint.
    pub fn with_base_url(
        config: &SearchConfig,
        app_id: &str,
        admin_key: &str,
        base_url: impl Into<String>,
    ) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Algolia-Application-Id",
            HeaderValue::from_str(app_id)
                .map_err(|e| AppError::internal(format!("Invalid application id: {e}")))?,
        );
        let mut key = HeaderValue::from_str(admin_key)
            .map_err(|e| AppError::internal(format!("Invalid API key format: {e}")))?;
        key.set_sensitive(true);
        headers.insert("X-Algolia-API-Key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(AlgoliaIndexInner {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                index_name: config.index_name.clone(),
            }),
        })
    }

    fn object_url(&self, object_id: &str) -> String {
        format!(
            "{}/1/indexes/{}/{}",
            self.inner.base_url, self.inner.index_name, object_id
        )
    }

    async fn check(&self, response: reqwest::Response) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::search_index(format!(
            "{} {}",
            status.as_u16(),
            body.trim()
        )))
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::search_index("request timed out")
    } else {
        AppError::search_index(err.to_string())
    }
}

#[async_trait]
impl SearchIndex for AlgoliaIndex {
    async fn save_object(&self, document: &SearchDocument) -> AppResult<()> {
        debug!(object_id = %document.object_id, "Saving search object");
        let response = self
            .inner
            .client
            .put(self.object_url(&document.object_id))
            .json(document)
            .send()
            .await
            .map_err(transport_error)?;
        self.check(response).await
    }

    async fn partial_update_object(&self, patch: &SearchPatch) -> AppResult<()> {
        debug!(object_id = %patch.object_id, "Updating search object");
        let url = format!("{}/partial", self.object_url(&patch.object_id));
        let response = self
            .inner
            .client
            .post(url)
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;
        self.check(response).await
    }

    async fn delete_object(&self, object_id: &str) -> AppResult<()> {
        debug!(object_id, "Deleting search object");
        let response = self
            .inner
            .client
            .delete(self.object_url(object_id))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        self.check(response).await
    }
}
