//! Error types surfaced by the lookup pipeline.
//!
//! Every user-visible failure carries a human-readable message and a context
//! map echoing the offending input. [`QueryError::to_document`] renders the
//! JSON error body; [`QueryError::status`] picks the status code.

use serde_json::{Map, Value};

/// Context attached to a user-visible failure, in insertion order.
pub type ErrorContext = Map<String, Value>;

/// Failure raised by a registry executor.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode registry records: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// A lookup failure. Each variant short-circuits the pipeline before the
/// serializer runs.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Malformed or out-of-range page parameter.
    #[error("{message}")]
    Validation {
        message: String,
        context: ErrorContext,
    },
    /// The block lookup could not extract an integer address number.
    #[error("No valid block number provided.")]
    InvalidBlockNumber { context: ErrorContext },
    /// Filtering left an empty collection.
    #[error("{message}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl QueryError {
    pub fn validation(message: impl Into<String>, context: ErrorContext) -> Self {
        QueryError::Validation {
            message: message.into(),
            context,
        }
    }

    pub fn not_found(message: impl Into<String>, context: ErrorContext) -> Self {
        QueryError::NotFound {
            message: message.into(),
            context,
        }
    }

    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        match self {
            QueryError::Validation { .. } | QueryError::InvalidBlockNumber { .. } => 400,
            QueryError::NotFound { .. } => 404,
            QueryError::Registry(_) => 500,
        }
    }

    /// The machine-readable context, empty for internal failures.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            QueryError::Validation { context, .. }
            | QueryError::InvalidBlockNumber { context }
            | QueryError::NotFound { context, .. } => Some(context),
            QueryError::Registry(_) => None,
        }
    }

    /// Render the error body: `status`, `message`, then the context fields.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("status".into(), Value::from(self.status()));
        doc.insert("message".into(), Value::from(self.to_string()));
        if let Some(context) = self.context() {
            for (key, value) in context {
                doc.insert(key.clone(), value.clone());
            }
        }
        Value::Object(doc)
    }
}

/// Build an [`ErrorContext`] from `(key, value)` pairs, preserving order.
pub fn context<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ErrorContext
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statuses() {
        assert_eq!(QueryError::validation("bad", ErrorContext::new()).status(), 400);
        assert_eq!(
            QueryError::InvalidBlockNumber {
                context: ErrorContext::new()
            }
            .status(),
            400
        );
        assert_eq!(QueryError::not_found("none", ErrorContext::new()).status(), 404);
        assert_eq!(
            QueryError::from(RegistryError::Unavailable("down".into())).status(),
            500
        );
    }

    #[test]
    fn document_puts_context_after_message() {
        let err = QueryError::not_found(
            "Could not find addresses matching query.",
            context([("query", "1 fake st"), ("normalized", "1 FAKE ST")]),
        );
        let doc = err.to_document();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["status", "message", "query", "normalized"]);
        assert_eq!(doc["status"], json!(404));
        assert_eq!(doc["normalized"], json!("1 FAKE ST"));
    }

    #[test]
    fn registry_failure_has_no_context() {
        let err = QueryError::from(RegistryError::Unavailable("down".into()));
        assert!(err.context().is_none());
        assert_eq!(
            err.to_document(),
            json!({"status": 500, "message": "registry unavailable: down"})
        );
    }
}
