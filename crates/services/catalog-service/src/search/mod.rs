//! Search index boundary.
//!
//! The relational store is the source of truth. Index operations are written
//! to the outbox in the same transaction as the change that caused them and
//! delivered afterwards, so the index converges even when the provider is
//! briefly unreachable.

mod algolia;
mod document;
mod log_only;
mod sync;

use async_trait::async_trait;

use common::AppResult;

pub use algolia::AlgoliaIndex;
pub use document::{object_id, IndexOperation, SearchDocument, SearchPatch};
pub use log_only::LogOnlyIndex;
pub use sync::{DrainReport, SearchSync};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Remote document index keyed by string object id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Create or fully replace a document.
    async fn save_object(&self, document: &SearchDocument) -> AppResult<()>;

    /// Overwrite only the fields present in the patch.
    async fn partial_update_object(&self, patch: &SearchPatch) -> AppResult<()>;

    /// Remove a document. Removing an unknown id succeeds.
    async fn delete_object(&self, object_id: &str) -> AppResult<()>;
}

/// Dispatch one queued operation to the index.
pub async fn apply(index: &dyn SearchIndex, operation: &IndexOperation) -> AppResult<()> {
    match operation {
        IndexOperation::Save { document } => index.save_object(document).await,
        IndexOperation::PartialUpdate { patch } => index.partial_update_object(patch).await,
        IndexOperation::Delete { object_id } => index.delete_object(object_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    #[tokio::test]
    async fn test_apply_routes_delete() {
        let mut index = MockSearchIndex::new();
        index
            .expect_delete_object()
            .withf(|id| id == "12")
            .times(1)
            .returning(|_| Ok(()));
        index.expect_save_object().never();

        let operation = IndexOperation::Delete {
            object_id: object_id(12),
        };
        apply(&index, &operation).await.unwrap();
    }

    #[tokio::test]
    async fn test_apply_surfaces_provider_error() {
        let mut index = MockSearchIndex::new();
        index
            .expect_partial_update_object()
            .withf(|patch| patch.object_id == "4" && patch.variant_images.is_none())
            .returning(|_| Err(AppError::search_index("timeout")));

        let operation = IndexOperation::PartialUpdate {
            patch: SearchPatch {
                object_id: "4".to_string(),
                id: 1,
                product_type: "Green".to_string(),
                variant_images: None,
            },
        };
        let err = apply(&index, &operation).await.unwrap_err();
        assert!(matches!(err, AppError::SearchIndex(_)));
    }
}
