//! Detector contract and the composite suite.

use tracesniff_trace::Trace;

use crate::config::SuiteConfig;
use crate::exception::ExceptionDetector;
use crate::http_error::HttpErrorDetector;
use crate::issue::Issue;
use crate::n_plus_one_query::NPlusOneQueryDetector;
use crate::warning::WarningDetector;

/// A single smell detector over built traces.
///
/// Implementations are pure: every call returns a fresh issue list and
/// no state accumulates between calls or between traces.
pub trait Detector {
    /// Display label prefixed to every issue line, e.g. `[HTTPERROR]`.
    fn name(&self) -> &str;

    /// Walk one trace and report every issue found.
    fn check_trace(&self, trace: &Trace) -> Vec<Issue>;

    /// Check a batch of traces, one issue list per trace, in order.
    fn check_traces(&self, traces: &[Trace]) -> Vec<Vec<Issue>> {
        traces.iter().map(|trace| self.check_trace(trace)).collect()
    }
}

/// An ordered set of detectors fanned out over each trace.
///
/// Results stay grouped per detector rather than flattened, so callers
/// can still tell which detector reported what.
pub struct DetectorSuite {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorSuite {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Assemble the standard suite from a run configuration: the N+1
    /// query detector first when configured, then every enabled simple
    /// detector.
    pub fn from_config(config: SuiteConfig) -> Self {
        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
        if let Some(n_plus_one) = config.n_plus_one_query {
            detectors.push(Box::new(NPlusOneQueryDetector::new(n_plus_one)));
        }
        if config.http_errors {
            detectors.push(Box::new(HttpErrorDetector));
        }
        if config.warnings {
            detectors.push(Box::new(WarningDetector));
        }
        if config.exceptions {
            detectors.push(Box::new(ExceptionDetector));
        }
        Self::new(detectors)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Detector display labels, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|detector| detector.name()).collect()
    }

    /// Run every detector over one trace. One issue group per detector,
    /// in suite order; a detector that found nothing contributes an
    /// empty group.
    pub fn check_trace(&self, trace: &Trace) -> Vec<Vec<Issue>> {
        self.detectors
            .iter()
            .map(|detector| detector.check_trace(trace))
            .collect()
    }

    /// Run every detector over a batch of traces. Outer order follows
    /// the traces, inner order the suite.
    pub fn check_traces(&self, traces: &[Trace]) -> Vec<Vec<Vec<Issue>>> {
        traces.iter().map(|trace| self.check_trace(trace)).collect()
    }
}
