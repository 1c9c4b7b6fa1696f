//! Checkpoint store: one reserved control document per index.
//!
//! The checkpoint records the last successfully processed stream position
//! so that a replayed command stream can resume without reprocessing. It
//! lives in the same index as user documents, keyed by the reserved
//! identity [`CHECKPOINT_ID`] and written delete-then-insert so at most one
//! checkpoint document ever exists. The position is encoded as a 4-byte
//! little-endian i32 regardless of host byte order.
//!
//! The checkpoint document carries no `__data` field, which is what keeps
//! it out of content query results.

use tantivy::collector::TopDocs;
use tantivy::query::TermQuery;
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{IndexWriter, Searcher, TantivyDocument, Term};
use tracing::debug;

use crate::error::IndexError;
use crate::schema::{EngineSchema, CHECKPOINT_ID};

/// Upsert the checkpoint document carrying `position`.
///
/// The write is buffered; the caller commits the writer to make it
/// durable.
pub fn write_position(
    writer: &IndexWriter,
    schema: &EngineSchema,
    position: i32,
) -> Result<(), IndexError> {
    let term = Term::from_field_text(schema.id, CHECKPOINT_ID);
    writer.delete_term(term);

    let mut doc = TantivyDocument::new();
    doc.add_text(schema.id, CHECKPOINT_ID);
    doc.add_bytes(schema.value, position.to_le_bytes().as_slice());
    writer.add_document(doc)?;

    debug!(position, "Wrote checkpoint document");
    Ok(())
}

/// Read back the last flushed position for the index named `index_name`.
///
/// Fails with [`IndexError::NoIndex`] when no checkpoint was ever flushed,
/// matching the recovery protocol: an absent checkpoint means the stream
/// must be replayed from the start.
pub fn read_position(
    searcher: &Searcher,
    schema: &EngineSchema,
    index_name: &str,
) -> Result<i32, IndexError> {
    let term = Term::from_field_text(schema.id, CHECKPOINT_ID);
    let query = TermQuery::new(term, IndexRecordOption::Basic);
    let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;

    let (_, address) = top_docs
        .first()
        .ok_or_else(|| IndexError::NoIndex(index_name.to_string()))?;
    let doc: TantivyDocument = searcher.doc(*address)?;

    let bytes = doc
        .get_first(schema.value)
        .and_then(|v| v.as_bytes())
        .ok_or_else(|| {
            IndexError::Tantivy(tantivy::TantivyError::InvalidArgument(format!(
                "checkpoint document in \"{}\" has no position payload",
                index_name
            )))
        })?;
    let raw: [u8; 4] = bytes.get(..4).and_then(|b| b.try_into().ok()).ok_or_else(|| {
        IndexError::Tantivy(tantivy::TantivyError::InvalidArgument(format!(
            "checkpoint payload in \"{}\" is shorter than 4 bytes",
            index_name
        )))
    })?;

    Ok(i32::from_le_bytes(raw))
}
