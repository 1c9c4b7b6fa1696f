//! Query execution: free text in, JSON array of stored payloads out.
//!
//! Queries parse against the `__id` field by default, with the same raw
//! analysis the writer applies (no stemming, no stop-words), so a bare
//! term is an exact identity match. Explicit field syntax still reaches
//! the catch-all fields, e.g. `text:hello`.
//!
//! Results come back in the engine's native score order; that order is not
//! part of the contract. The reserved checkpoint document has no `__data`
//! and is filtered out of every result set.

use tantivy::collector::{Count, TopDocs};
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::{Index, IndexReader, TantivyDocument};
use tracing::debug;

use crate::error::IndexError;
use crate::schema::EngineSchema;

/// A serialized result set.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    /// JSON array of the raw stored payloads, serialized to bytes.
    pub json: Vec<u8>,
    /// Number of array elements (control documents excluded).
    pub count: usize,
}

/// Parse and execute `query_text`, collecting every hit.
pub fn run_query(
    index: &Index,
    reader: &IndexReader,
    schema: &EngineSchema,
    query_text: &str,
) -> Result<QueryOutput, IndexError> {
    let query_parser = QueryParser::for_index(index, vec![schema.id]);
    let query = query_parser.parse_query(query_text)?;

    let searcher = reader.searcher();
    let total = searcher.search(&query, &Count)?;

    let mut payloads: Vec<String> = Vec::with_capacity(total);
    if total > 0 {
        for (_score, address) in searcher.search(&query, &TopDocs::with_limit(total))? {
            let doc: TantivyDocument = searcher.doc(address)?;
            // Hits without a payload are control documents; skip them
            let Some(payload) = doc.get_first(schema.data).and_then(|v| v.as_str()) else {
                continue;
            };
            payloads.push(payload.to_string());
        }
    }

    let count = payloads.len();
    let json = serde_json::to_vec(&payloads)?;
    debug!(query = query_text, count, "Query complete");

    Ok(QueryOutput { json, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint;
    use crate::document::build_item_document;
    use crate::schema::build_item_schema;
    use tantivy::Term;
    use textdex_types::FieldSpec;

    fn setup() -> (Index, EngineSchema, tantivy::IndexWriter) {
        let schema = build_item_schema();
        let index = Index::create_in_ram(schema.schema().clone());
        let writer = index.writer(15_000_000).unwrap();
        (index, schema, writer)
    }

    fn add_item(
        writer: &tantivy::IndexWriter,
        schema: &EngineSchema,
        id: &str,
        data: &str,
        fields: &[FieldSpec],
    ) {
        writer.delete_term(Term::from_field_text(schema.id, id));
        let doc = build_item_document(schema, id, data, fields).unwrap();
        writer.add_document(doc).unwrap();
    }

    #[test]
    fn test_query_by_id_returns_payload() {
        let (index, schema, mut writer) = setup();
        add_item(&writer, &schema, "doc1", r#"{"k":1}"#, &[]);
        writer.commit().unwrap();

        let reader = index.reader().unwrap();
        let output = run_query(&index, &reader, &schema, "doc1").unwrap();
        assert_eq!(output.count, 1);

        let parsed: Vec<String> = serde_json::from_slice(&output.json).unwrap();
        assert_eq!(parsed, vec![r#"{"k":1}"#.to_string()]);
    }

    #[test]
    fn test_no_hits_yields_empty_array() {
        let (index, schema, mut writer) = setup();
        writer.commit().unwrap();

        let reader = index.reader().unwrap();
        let output = run_query(&index, &reader, &schema, "missing").unwrap();
        assert_eq!(output.count, 0);
        assert_eq!(output.json, b"[]");
    }

    #[test]
    fn test_checkpoint_document_never_returned() {
        let (index, schema, mut writer) = setup();
        add_item(&writer, &schema, "doc1", "payload", &[]);
        checkpoint::write_position(&writer, &schema, 7).unwrap();
        writer.commit().unwrap();

        let reader = index.reader().unwrap();

        // Querying the reserved identity directly finds the control
        // document, but it is filtered from the output
        let output = run_query(&index, &reader, &schema, "checkpoint").unwrap();
        assert_eq!(output.count, 0);
        assert_eq!(output.json, b"[]");

        let output = run_query(&index, &reader, &schema, "doc1").unwrap();
        assert_eq!(output.count, 1);
    }

    #[test]
    fn test_malformed_query_is_parse_error() {
        let (index, schema, mut writer) = setup();
        writer.commit().unwrap();

        let reader = index.reader().unwrap();
        let err = run_query(&index, &reader, &schema, "title:(unbalanced").unwrap_err();
        assert!(matches!(err, IndexError::QueryParse(_)));
        assert_eq!(err.status_code(), 3);
    }

    #[test]
    fn test_explicit_field_syntax_reaches_catch_all() {
        let (index, schema, mut writer) = setup();
        let fields = vec![FieldSpec {
            name: "title".into(),
            value: "hello world".into(),
            store: None,
            index: Some(32), // tokenized
            termvector: None,
        }];
        add_item(&writer, &schema, "doc1", "payload", &fields);
        writer.commit().unwrap();

        let reader = index.reader().unwrap();
        let output = run_query(&index, &reader, &schema, "text:hello").unwrap();
        assert_eq!(output.count, 1);
    }
}
