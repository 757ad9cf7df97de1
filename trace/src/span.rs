//! Span tree nodes.

use crate::document::{LogEntry, SpanRecord, TagValue};

/// One node of a built span tree: the exported record plus its children
/// in dump order. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    record: SpanRecord,
    children: Vec<Span>,
}

impl Span {
    pub(crate) fn new(record: SpanRecord, children: Vec<Span>) -> Self {
        Self { record, children }
    }

    /// The raw exported record this node was built from.
    pub fn record(&self) -> &SpanRecord {
        &self.record
    }

    pub fn span_id(&self) -> &str {
        &self.record.span_id
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.record.trace_id.as_deref()
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.record.operation_name.as_deref()
    }

    /// Own duration of this span, excluding children.
    pub fn duration(&self) -> u64 {
        self.record.duration
    }

    pub fn tags(&self) -> &[TagValue] {
        &self.record.tags
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.record.logs
    }

    /// Collector warnings attached to this span. Empty when the dump
    /// carried `null` or nothing at all.
    pub fn warnings(&self) -> &[String] {
        self.record.warnings.as_deref().unwrap_or_default()
    }

    /// Child spans, ordered by their position in the dump.
    pub fn children(&self) -> &[Span] {
        &self.children
    }

    /// First tag whose key equals `key`, searching all tags in order.
    pub fn find_tag_with_key(&self, key: &str) -> Option<&TagValue> {
        self.record.tags.iter().find(|tag| tag.key == key)
    }

    /// Whether the tag in the *first* slot has the given key.
    ///
    /// This is a positional check: only index 0 is consulted, even when a
    /// tag with that key exists further down the list. Callers that want
    /// set-like semantics must use [`find_tag_with_key`](Self::find_tag_with_key).
    pub fn first_tag_key_equals(&self, key: &str) -> bool {
        self.record
            .tags
            .first()
            .is_some_and(|tag| tag.key == key)
    }

    /// Number of spans in this subtree, this node included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Span::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag(key: &str) -> TagValue {
        TagValue {
            key: key.to_string(),
            value_type: "string".to_string(),
            value: json!("x"),
        }
    }

    fn span_with_tags(keys: &[&str]) -> Span {
        let mut record = SpanRecord::placeholder("span-1");
        record.tags = keys.iter().map(|key| tag(key)).collect();
        Span::new(record, Vec::new())
    }

    #[test]
    fn find_tag_with_key_returns_first_match() {
        let span = span_with_tags(&["http.scheme", "error", "error"]);
        let found = span.find_tag_with_key("error").unwrap();
        assert_eq!(found.key, "error");
        assert!(span.find_tag_with_key("db.statement").is_none());
    }

    #[test]
    fn first_tag_key_equals_only_checks_index_zero() {
        let span = span_with_tags(&["http.scheme", "db.statement"]);
        assert!(span.first_tag_key_equals("http.scheme"));
        assert!(!span.first_tag_key_equals("db.statement"));
    }

    #[test]
    fn first_tag_key_equals_is_false_without_tags() {
        let span = span_with_tags(&[]);
        assert!(!span.first_tag_key_equals("http.scheme"));
    }

    #[test]
    fn warnings_are_empty_when_absent() {
        let span = Span::new(SpanRecord::placeholder("span-1"), Vec::new());
        assert!(span.warnings().is_empty());
    }

    #[test]
    fn subtree_len_counts_all_nodes() {
        let leaf = Span::new(SpanRecord::placeholder("leaf"), Vec::new());
        let mid = Span::new(SpanRecord::placeholder("mid"), vec![leaf]);
        let root = Span::new(
            SpanRecord::placeholder("root"),
            vec![mid, Span::new(SpanRecord::placeholder("leaf2"), Vec::new())],
        );
        assert_eq!(root.subtree_len(), 4);
    }
}
