//! Exception detection from span logs.

use serde_json::Value;
use tracesniff_trace::{LogEntry, Span, Trace};

use crate::detector::Detector;
use crate::issue::{Issue, IssueKind};

const EVENT_FIELD_KEY: &str = "event";
const EXCEPTION_EVENT: &str = "exception";
const EXCEPTION_MESSAGE_KEY: &str = "exception.message";

/// Reports exception events recorded on span logs.
///
/// A log entry counts as an exception event when one of its fields is
/// `event = "exception"`; every `exception.message` field in that same
/// entry becomes one issue.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionDetector;

impl ExceptionDetector {
    fn check_span(&self, span: &Span, issues: &mut Vec<Issue>) {
        for log in span.logs() {
            if !Self::is_exception_event(log) {
                continue;
            }
            for field in &log.fields {
                if field.key == EXCEPTION_MESSAGE_KEY {
                    issues.push(Issue::new(
                        self.name(),
                        span,
                        IssueKind::Exception {
                            message: field_text(&field.value),
                        },
                    ));
                }
            }
        }
        for child in span.children() {
            self.check_span(child, issues);
        }
    }

    fn is_exception_event(log: &LogEntry) -> bool {
        log.fields.iter().any(|field| {
            field.key == EVENT_FIELD_KEY
                && field.value_type == "string"
                && field.value.as_str() == Some(EXCEPTION_EVENT)
        })
    }
}

/// Message text of a log field: strings verbatim, anything else as JSON.
fn field_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

impl Detector for ExceptionDetector {
    fn name(&self) -> &str {
        "[EXCEPTION]"
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

    fn event_field() -> serde_json::Value {
        json!({"key": "event", "type": "string", "value": "exception"})
    }

    fn message_field(message: serde_json::Value) -> serde_json::Value {
        json!({"key": "exception.message", "type": "string", "value": message})
    }

    #[test]
    fn reports_the_exception_message() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [event_field(), message_field(json!("boom"))]}]
        }]));

        let issues = ExceptionDetector.check_trace(&trace);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::Exception {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn event_without_a_message_reports_nothing() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [event_field()]}]
        }]));

        assert!(ExceptionDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn message_without_an_event_reports_nothing() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [message_field(json!("boom"))]}]
        }]));

        assert!(ExceptionDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn every_message_in_a_flagged_entry_is_reported() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [
                message_field(json!("first")),
                event_field(),
                message_field(json!("second"))
            ]}]
        }]));

        let issues = ExceptionDetector.check_trace(&trace);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].kind,
            IssueKind::Exception {
                message: "first".to_string()
            }
        );
        assert_eq!(
            issues[1].kind,
            IssueKind::Exception {
                message: "second".to_string()
            }
        );
    }

    #[test]
    fn event_and_message_must_share_a_log_entry() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [
                {"fields": [event_field()]},
                {"fields": [message_field(json!("boom"))]}
            ]
        }]));

        assert!(ExceptionDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn event_field_must_be_string_typed() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [
                {"key": "event", "type": "bool", "value": "exception"},
                message_field(json!("boom"))
            ]}]
        }]));

        assert!(ExceptionDetector.check_trace(&trace).is_empty());
    }

    #[test]
    fn non_string_messages_render_as_json() {
        let trace = trace_with_spans(json!([{
            "spanID": "root",
            "logs": [{"fields": [event_field(), message_field(json!(42))]}]
        }]));

        let issues = ExceptionDetector.check_trace(&trace);
        assert_eq!(
            issues[0].kind,
            IssueKind::Exception {
                message: "42".to_string()
            }
        );
    }

    #[test]
    fn child_spans_are_walked() {
        let trace = trace_with_spans(json!([
            {"spanID": "root"},
            {
                "spanID": "child",
                "logs": [{"fields": [event_field(), message_field(json!("deep"))]}],
                "references": [{"refType": "CHILD_OF", "spanID": "root"}]
            }
        ]));

        let issues = ExceptionDetector.check_trace(&trace);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].span_id, "child");
    }
}
