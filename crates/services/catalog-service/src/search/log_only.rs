//! Index stand-in used when no provider credentials are configured.

use async_trait::async_trait;
use tracing::info;

use common::AppResult;

use super::{SearchDocument, SearchIndex, SearchPatch};

/// Logs every operation and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyIndex;

#[async_trait]
impl SearchIndex for LogOnlyIndex {
    async fn save_object(&self, document: &SearchDocument) -> AppResult<()> {
        info!(
            object_id = %document.object_id,
            product_id = document.id,
            "Search index not configured - would save object"
        );
        Ok(())
    }

    async fn partial_update_object(&self, patch: &SearchPatch) -> AppResult<()> {
        info!(
            object_id = %patch.object_id,
            product_id = patch.id,
            "Search index not configured - would update object"
        );
        Ok(())
    }

    async fn delete_object(&self, object_id: &str) -> AppResult<()> {
        info!(object_id, "Search index not configured - would delete object");
        Ok(())
    }
}
