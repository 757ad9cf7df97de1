//! N+1 query detection.
//!
//! Query spans are folded upward through the tree: every subtree reports
//! the combined duration and count of the query spans it contains, and a
//! span whose combined totals strictly exceed both thresholds is
//! reported. Reported totals are absorbed so enclosing spans never
//! re-report the same cluster.

use tracesniff_trace::{Span, Trace};

use crate::config::NPlusOneQueryConfig;
use crate::detector::Detector;
use crate::issue::{Issue, IssueKind};

const DB_STATEMENT_TAG_KEY: &str = "db.statement";

/// Reports spans owning a cluster of query spans whose combined duration
/// and count both strictly exceed the configured thresholds.
#[derive(Debug, Clone)]
pub struct NPlusOneQueryDetector {
    name: String,
    duration_involved_spans_thrsh: u64,
    count_involved_spans_thrsh: u64,
}

impl NPlusOneQueryDetector {
    pub fn new(config: NPlusOneQueryConfig) -> Self {
        Self {
            name: config.name,
            duration_involved_spans_thrsh: config.duration_involved_spans_thrsh,
            count_involved_spans_thrsh: config.count_involved_spans_thrsh,
        }
    }

    /// Detector with the default label and explicit thresholds.
    pub fn with_thresholds(duration_thrsh: u64, count_thrsh: u64) -> Self {
        Self::new(NPlusOneQueryConfig::new(duration_thrsh, count_thrsh))
    }

    /// Walk `span`, reporting clusters into `issues`, and return the
    /// duration and count of query spans not yet absorbed by a report.
    fn check_span(&self, span: &Span, issues: &mut Vec<Issue>) -> (u64, u64) {
        // A query span contributes itself and hides whatever runs below it.
        if span.first_tag_key_equals(DB_STATEMENT_TAG_KEY) {
            return (span.duration(), 1);
        }

        let mut total_duration: u64 = 0;
        let mut total_count: u64 = 0;
        for child in span.children() {
            let (duration, count) = self.check_span(child, issues);
            total_duration = total_duration.saturating_add(duration);
            total_count = total_count.saturating_add(count);
        }

        if total_duration > self.duration_involved_spans_thrsh
            && total_count > self.count_involved_spans_thrsh
        {
            issues.push(Issue::new(
                &self.name,
                span,
                IssueKind::NPlusOneQuery {
                    duration_involved_spans: total_duration,
                    count_involved_spans: total_count,
                },
            ));
            return (0, 0);
        }

        (total_duration, total_count)
    }
}

impl Detector for NPlusOneQueryDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_trace(&self, trace: &Trace) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_span(trace.root(), &mut issues);
        issues
    }
}
