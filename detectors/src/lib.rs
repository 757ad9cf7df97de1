//! Trace smell detectors.
//!
//! Detectors walk a built [`Trace`](tracesniff_trace::Trace) and report
//! [`Issue`]s. Each detector is pure; the [`DetectorSuite`] fans a trace
//! out over every configured detector and keeps the results grouped per
//! detector.
//!
//! - [`n_plus_one_query`]: clusters of repeated query spans
//! - [`http_error`]: HTTP spans flagged with an error tag
//! - [`exception`]: exception events recorded on span logs
//! - [`warning`]: collector warnings attached to spans

pub mod config;
pub mod detector;
pub mod error;
pub mod exception;
pub mod http_error;
pub mod issue;
pub mod n_plus_one_query;
pub mod warning;

pub use config::{NPlusOneQueryConfig, SuiteConfig};
pub use detector::{Detector, DetectorSuite};
pub use error::DetectorError;
pub use exception::ExceptionDetector;
pub use http_error::HttpErrorDetector;
pub use issue::{Issue, IssueKind};
pub use n_plus_one_query::NPlusOneQueryDetector;
pub use warning::WarningDetector;
