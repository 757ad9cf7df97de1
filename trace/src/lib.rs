//! Span tree model for exported trace dumps.
//!
//! This crate turns a Jaeger-style JSON trace export into a typed,
//! immutable span tree:
//!
//! - [`document`]: serde model of the raw export
//! - [`tree`]: root resolution and tree construction from `CHILD_OF`
//!   references
//! - [`span`]: the tree node and its accessors
//! - [`trace`]: the built trace with its envelope metadata
//!
//! Validation happens once, at construction. Detectors and other
//! consumers walk the finished tree without ever touching raw JSON.

pub mod document;
pub mod error;
pub mod span;
pub mod trace;
pub mod tree;

pub use document::{LogEntry, SpanRecord, SpanReference, TagValue, TraceData, TraceDocument};
pub use error::TraceError;
pub use span::Span;
pub use trace::Trace;
pub use tree::build_tree;
