//! Action result envelope.
//!
//! Write actions never let an error escape to the caller. Every outcome is
//! reported as either `{"success": ...}` or `{"error": "..."}`.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Discriminated outcome of a write action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionResult<T> {
    Success(T),
    Error(String),
}

impl<T> ActionResult<T> {
    /// Convert a service result, choosing the user-facing message for failures.
    ///
    /// The underlying error is logged before it is replaced.
    pub fn from_result(result: AppResult<T>, describe: impl FnOnce(&AppError) -> String) -> Self {
        match result {
            Ok(value) => ActionResult::Success(value),
            Err(err) => {
                if err.is_client_error() {
                    tracing::warn!(error = %err, code = err.code(), "Action rejected");
                } else {
                    tracing::error!(error = ?err, code = err.code(), "Action failed");
                }
                ActionResult::Error(describe(&err))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// Success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            ActionResult::Success(value) => Some(value),
            ActionResult::Error(_) => None,
        }
    }

    /// Error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Error(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_format() {
        let ok: ActionResult<String> = ActionResult::Success("Added Red".to_string());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "success": "Added Red" })
        );

        let err: ActionResult<String> = ActionResult::Error("Please sign in".to_string());
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "error": "Please sign in" })
        );
    }

    #[test]
    fn test_from_result_uses_describer_on_failure() {
        let result: AppResult<i32> = Err(AppError::NotFound);
        let envelope = ActionResult::from_result(result, |_| "Failed".to_string());
        assert_eq!(envelope.error(), Some("Failed"));
        assert!(!envelope.is_success());
    }
}
