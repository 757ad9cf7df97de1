//! Span tree construction from flat, reference-annotated records.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::document::SpanRecord;
use crate::error::TraceError;
use crate::span::Span;

/// Reference kind that links a span to its parent.
pub const CHILD_OF: &str = "CHILD_OF";

/// Build the span tree for one trace from its flat record list.
///
/// The root is the first span in dump order that carries no reference to
/// itself. Children attach through `CHILD_OF` references and keep dump
/// order. A span reachable through several parents is materialized once
/// per path; a reference chain that loops back on itself is an error.
pub fn build_tree(spans: &[SpanRecord]) -> Result<Span, TraceError> {
    let records = index_records(spans);
    let ordered = canonical_order(spans, &records);
    let root_id = resolve_root(&ordered)?;
    let children = children_by_parent(&ordered, &records);
    materialize(root_id, &records, &children)
}

/// Identifier to record map. On duplicate identifiers the later record
/// wins, matching the map-insertion semantics of the export.
fn index_records(spans: &[SpanRecord]) -> HashMap<&str, &SpanRecord> {
    spans
        .iter()
        .map(|record| (record.span_id.as_str(), record))
        .collect()
}

/// Dump-order records with duplicate identifiers collapsed to their
/// winning record.
fn canonical_order<'a>(
    spans: &'a [SpanRecord],
    records: &HashMap<&'a str, &'a SpanRecord>,
) -> Vec<&'a SpanRecord> {
    let mut seen = HashSet::new();
    spans
        .iter()
        .filter(|record| seen.insert(record.span_id.as_str()))
        .map(|record| records[record.span_id.as_str()])
        .collect()
}

/// First span in dump order that carries no reference to itself.
fn resolve_root<'a>(ordered: &[&'a SpanRecord]) -> Result<&'a str, TraceError> {
    let mut candidates = ordered.iter().filter(|record| {
        !record
            .references
            .iter()
            .any(|reference| reference.span_id == record.span_id)
    });

    let root = candidates.next().ok_or(TraceError::UnresolvableRoot)?;
    let runners_up = candidates.count();
    if runners_up > 0 {
        warn!(
            root = %root.span_id,
            candidates = runners_up + 1,
            "multiple root candidates, keeping the first in dump order"
        );
    }
    Ok(root.span_id.as_str())
}

/// Parent identifier to child identifiers, children in dump order.
fn children_by_parent<'a>(
    ordered: &[&'a SpanRecord],
    records: &HashMap<&'a str, &'a SpanRecord>,
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in ordered {
        for reference in &record.references {
            if reference.ref_type != CHILD_OF {
                continue;
            }
            let parent = reference.span_id.as_str();
            if !records.contains_key(parent) {
                warn!(
                    parent = %parent,
                    child = %record.span_id,
                    "reference to a parent span missing from the dump"
                );
            }
            index
                .entry(parent)
                .or_default()
                .push(record.span_id.as_str());
        }
    }
    index
}

enum Frame<'a> {
    Enter(&'a str),
    Exit(&'a str),
}

/// Depth-first materialization of the tree rooted at `root_id`.
///
/// An explicit work stack replaces recursion so deep parent chains cannot
/// overflow the call stack. The set of identifiers on the current path
/// catches reference cycles; revisiting a span on a *different* path is
/// allowed and duplicates its subtree.
fn materialize<'a>(
    root_id: &'a str,
    records: &HashMap<&'a str, &'a SpanRecord>,
    children: &HashMap<&'a str, Vec<&'a str>>,
) -> Result<Span, TraceError> {
    let mut path: HashSet<&str> = HashSet::new();
    let mut pending: Vec<(SpanRecord, Vec<Span>)> = Vec::new();
    let mut work = vec![Frame::Enter(root_id)];

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Enter(span_id) => {
                if !path.insert(span_id) {
                    return Err(TraceError::ReferenceCycle {
                        span_id: span_id.to_string(),
                    });
                }
                let record = match records.get(span_id) {
                    Some(record) => (*record).clone(),
                    None => {
                        warn!(span_id = %span_id, "materializing placeholder for unknown span");
                        SpanRecord::placeholder(span_id)
                    }
                };
                pending.push((record, Vec::new()));
                work.push(Frame::Exit(span_id));
                if let Some(child_ids) = children.get(span_id) {
                    for &child_id in child_ids.iter().rev() {
                        work.push(Frame::Enter(child_id));
                    }
                }
            }
            Frame::Exit(span_id) => {
                path.remove(span_id);
                let (record, built) = pending
                    .pop()
                    .expect("every exit frame has a pending node");
                let node = Span::new(record, built);
                match pending.last_mut() {
                    Some((_, siblings)) => siblings.push(node),
                    None => return Ok(node),
                }
            }
        }
    }

    unreachable!("construction ends at the root's exit frame")
}
