//! Collector warning detection.

use tracesniff_trace::{Span, Trace};

use crate::detector::Detector;
use crate::issue::{Issue, IssueKind};

/// Reports every warning string the collector attached to a span.
#[derive(Debug, Default, Clone, Copy)]
pub struct WarningDetector;

impl WarningDetector {
    fn check_span(&self, span: &Span, issues: &mut Vec<Issue>) {
        for warning in span.warnings() {
            issues.push(Issue::new(
                self.name(),
                span,
                IssueKind::Warning {
                    warning: warning.clone(),
                },
            ));
        }
        for child in span.children() {
            self.check_span(child, issues);
        }
    }
}

impl Detector for WarningDetector {
    fn name(&self) -> &str {
        "[WARNING]"
    }

    fn check_trace(&self, trace: &Trace) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_span(trace.root(), &mut issues);
        issues
    }
}
