//! Issues reported by detectors.

use std::fmt;

use tracesniff_trace::Span;

/// Detector-specific evidence attached to an issue.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// An HTTP span carrying an error tag.
    HttpError,
    /// An exception event recorded on a span's logs.
    Exception { message: String },
    /// A collector warning attached to a span.
    Warning { warning: String },
    /// A cluster of query spans crossing both configured thresholds.
    NPlusOneQuery {
        duration_involved_spans: u64,
        count_involved_spans: u64,
    },
}

/// One detected smell, anchored to the span it was found on.
///
/// Issues carry owned identifiers instead of borrowing from the tree, so
/// they outlive the trace they were found in. Identifiers missing from
/// the dump render as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub detector: String,
    pub span_id: String,
    pub trace_id: String,
    pub operation_name: String,
    pub kind: IssueKind,
}

impl Issue {
    /// Anchor an issue of `kind` on `span` for the detector labeled
    /// `detector`.
    pub fn new(detector: &str, span: &Span, kind: IssueKind) -> Self {
        Self {
            detector: detector.to_string(),
            span_id: span.span_id().to_string(),
            trace_id: span.trace_id().unwrap_or_default().to_string(),
            operation_name: span.operation_name().unwrap_or_default().to_string(),
            kind,
        }
    }

    fn context(&self) -> String {
        format!(
            "span_id: {}, trace_id: {}, operation_name: {}",
            self.span_id, self.trace_id, self.operation_name
        )
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::HttpError => {
                write!(f, "{} found in {}", self.detector, self.context())
            }
            IssueKind::Exception { message } => {
                write!(f, "{} ({}) found in {}", self.detector, message, self.context())
            }
            IssueKind::Warning { warning } => {
                write!(f, "{} ({}) found in {}", self.detector, warning, self.context())
            }
            IssueKind::NPlusOneQuery {
                duration_involved_spans,
                count_involved_spans,
            } => {
                write!(
                    f,
                    "{} found with duration: {}ms and count {} in {}",
                    self.detector,
                    duration_involved_spans,
                    count_involved_spans,
                    self.context()
                )
            }
        }
    }
}
