//! HTTP error detection.

use serde_json::Value;
use tracesniff_trace::{Span, Trace};

use crate::detector::Detector;
use crate::issue::{Issue, IssueKind};

const ERROR_TAG_KEY: &str = "error";
const HTTP_SCHEME_TAG_KEY: &str = "http.scheme";

/// Reports spans whose instrumentation set `error = true`.
///
/// A span qualifies when its first `error` tag is boolean `true` and its
/// leading tag is `http.scheme`, which is where HTTP instrumentation
/// places it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpErrorDetector;

impl HttpErrorDetector {
    fn check_span(&self, span: &Span, issues: &mut Vec<Issue>) {
        if Self::has_http_error(span) {
            issues.push(Issue::new(self.name(), span, IssueKind::HttpError));
        }
        for child in span.children() {
            self.check_span(child, issues);
        }
    }

    fn has_http_error(span: &Span) -> bool {
        span.find_tag_with_key(ERROR_TAG_KEY)
            .is_some_and(|tag| tag.value_type == "bool" && tag.value == Value::Bool(true))
            && span.first_tag_key_equals(HTTP_SCHEME_TAG_KEY)
    }
}

impl Detector for HttpErrorDetector {
    fn name(&self) -> &str {
        "[HTTPERROR]"
    }

    fn check_trace(&self, trace: &Trace) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_span(trace.root(), &mut issues);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trace_with_spans(spans: serde_json::Value) -> Trace {
        Trace::from_json(
            &json!({
                "total": 1,
                "limit": 20,
                "offset": 0,
                "errors": null,
                "data": [{"traceID": "trace-1", "spans": spans}]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn scheme_tag() -> serde_json::Value {
        json!({"key": "http.scheme", "type": "string", "value": "http"})
    }

    fn error_tag(value: serde_json::Value, value_type: &str) -> serde_json::Value {
        json!({"key": "error", "type": value_type, "value": value})
    }

    #[test]
    fn flags_an_http_span_with_a_true_error_tag() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "operationName": "GET /users",
            "tags": [scheme_tag(), error_tag(json!(true), "bool")]
        }]));

        let issues = HttpErrorDetector.check_trace(&trace);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].span_id, "root");
        assert_eq!(issues[0].kind, IssueKind::HttpError);
    }

    #[test]
    fn error_tag_may_sit_anywhere_after_the_scheme() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "tags": [
                scheme_tag(),
                {"key": "http.status_code", "type": "int64", "value": 500},
                error_tag(json!(true), "bool")
            ]
        }]));

        assert_eq!(HttpErrorDetector.check_trace(&trace).len(), 1);
    }

    #[test]
    fn scheme_must_lead_the_tag_list() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "tags": [error_tag(json!(true), "bool"), scheme_tag()]
        }]));

        assert!(HttpErrorDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn false_error_tag_is_ignored() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "tags": [scheme_tag(), error_tag(json!(false), "bool")]
        }]));

        assert!(HttpErrorDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn error_tag_must_be_boolean_typed() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "tags": [scheme_tag(), error_tag(json!("true"), "string")]
        }]));

        assert!(HttpErrorDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn only_the_first_error_tag_counts() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "tags": [
                scheme_tag(),
                error_tag(json!(false), "bool"),
                error_tag(json!(true), "bool")
            ]
        }]));

        assert!(HttpErrorDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn untagged_spans_report_nothing() {
        let trace = trace_with_spans(json!([{"spanID": "root"}]));
        assert!(HttpErrorDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn child_spans_are_walked_top_down() {
        let trace = trace_with_spans(json!([
            {
                "spanID": "root",
                "tags": [scheme_tag(), error_tag(json!(true), "bool")]
            },
            {
                "spanID": "child",
                "tags": [scheme_tag(), error_tag(json!(true), "bool")],
                "references": [{"refType": "CHILD_OF", "spanID": "root"}]
            }
        ]));

        let issues = HttpErrorDetector.check_trace(&trace);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].span_id, "root");
        assert_eq!(issues[1].span_id, "child");
    }
}
