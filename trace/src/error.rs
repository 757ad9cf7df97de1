//! Error types for trace construction.

use thiserror::Error;

/// Errors surfaced while building a [`Trace`](crate::Trace) from an
/// exported document.
///
/// All of these are construction-time failures. Once a trace has been
/// built, traversing it never fails.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The input is not valid JSON, or a required field is missing or
    /// has the wrong type.
    #[error("invalid trace document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// The envelope's `data` array must contain exactly one trace.
    #[error("expected exactly one trace in the document, found {found}")]
    WrongTraceCount { found: usize },

    /// No span qualifies as the root of the tree.
    #[error("no root span could be resolved from the span references")]
    UnresolvableRoot,

    /// A chain of CHILD_OF references loops back on itself.
    #[error("span reference cycle detected at span {span_id}")]
    ReferenceCycle { span_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_span() {
        let err = TraceError::ReferenceCycle {
            span_id: "abc123".to_string(),
        };
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn wrong_trace_count_reports_the_count() {
        let err = TraceError::WrongTraceCount { found: 3 };
        assert_eq!(
            err.to_string(),
            "expected exactly one trace in the document, found 3"
        );
    }
}
