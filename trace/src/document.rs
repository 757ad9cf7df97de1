//! Typed model of an exported trace document.
//!
//! Field names follow the JSON shape produced by Jaeger-style trace
//! exports (`spanID`, `operationName`, `refType`, ...). Envelope fields
//! and span identifiers are required and rejected at parse time when
//! missing; everything else on a span defaults to empty so traversal
//! code never has to distinguish absent from empty.

use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope of a trace dump.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceDocument {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// Error list reported by the exporter, kept verbatim (usually `null`).
    pub errors: Value,
    pub data: Vec<TraceData>,
}

impl TraceDocument {
    /// Parse an exported document without building the span tree.
    pub fn from_json(json: &str) -> Result<Self, crate::TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One trace record inside the envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceData {
    #[serde(rename = "traceID")]
    pub trace_id: String,
    pub spans: Vec<SpanRecord>,
}

/// A single span as exported, before tree construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpanRecord {
    #[serde(rename = "spanID")]
    pub span_id: String,
    #[serde(rename = "traceID", default)]
    pub trace_id: Option<String>,
    #[serde(rename = "operationName", default)]
    pub operation_name: Option<String>,
    /// Span duration in the dump's time unit (microseconds for Jaeger).
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub tags: Vec<TagValue>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// `null` in the dump when the collector attached no warnings.
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    #[serde(default)]
    pub references: Vec<SpanReference>,
}

impl SpanRecord {
    /// Empty record standing in for a span that was referenced but never
    /// exported. Carries only the identifier.
    pub fn placeholder(span_id: impl Into<String>) -> Self {
        Self {
            span_id: span_id.into(),
            trace_id: None,
            operation_name: None,
            duration: 0,
            tags: Vec::new(),
            logs: Vec::new(),
            warnings: None,
            references: Vec::new(),
        }
    }
}

/// A keyed, typed value. Used both for span tags and for log fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagValue {
    pub key: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
    #[serde(default)]
    pub value: Value,
}

/// One timestamped event on a span. Only the fields are consumed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub fields: Vec<TagValue>,
}

/// A reference from one span to another, e.g. `CHILD_OF` its parent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpanReference {
    #[serde(rename = "refType", default)]
    pub ref_type: String,
    #[serde(rename = "spanID", default)]
    pub span_id: String,
}
