//! A fully constructed trace: envelope metadata plus the span tree.

use serde_json::Value;

use crate::document::TraceDocument;
use crate::error::TraceError;
use crate::span::Span;
use crate::tree;

/// One trace, built from an exported document holding exactly one trace.
///
/// Construction validates the envelope and resolves the span tree; after
/// that the trace is immutable and traversal never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    trace_id: String,
    total: i64,
    limit: i64,
    offset: i64,
    errors: Value,
    root: Span,
}

impl Trace {
    /// Parse an exported JSON document and build the trace.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Self::from_document(TraceDocument::from_json(json)?)
    }

    /// Build the trace from an already parsed document.
    pub fn from_document(document: TraceDocument) -> Result<Self, TraceError> {
        if document.data.len() != 1 {
            return Err(TraceError::WrongTraceCount {
                found: document.data.len(),
            });
        }

        let TraceDocument {
            total,
            limit,
            offset,
            errors,
            mut data,
        } = document;
        let trace = data.remove(0);
        let root = tree::build_tree(&trace.spans)?;

        Ok(Self {
            trace_id: trace.trace_id,
            total,
            limit,
            offset,
            errors,
            root,
        })
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Exporter-reported errors, verbatim from the envelope.
    pub fn errors(&self) -> &Value {
        &self.errors
    }

    /// Root of the span tree.
    pub fn root(&self) -> &Span {
        &self.root
    }

    /// Number of spans reachable from the root.
    pub fn span_count(&self) -> usize {
        self.root.subtree_len()
    }
}
