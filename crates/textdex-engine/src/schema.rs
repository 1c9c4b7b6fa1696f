//! Fixed backing schema shared by every index.
//!
//! Incoming documents are self-describing (arbitrary field names with
//! per-field flags) while Tantivy schemas are closed at index creation, so
//! descriptor values are routed into a small set of catch-all fields:
//!
//! - `__id`: STRING | STORED - caller-supplied item identity, also the
//!   default query field (raw analysis, exact match)
//! - `__data`: STORED - opaque payload returned verbatim by queries
//! - `__value`: bytes, STORED - checkpoint position payload
//! - `text`: TEXT - values of descriptors flagged tokenized
//! - `exact`: STRING - values of descriptors flagged exact-match
//! - `fields`: STORED - JSON object of descriptor values whose store flag
//!   requested storage, keyed by descriptor name
//!
//! The reserved checkpoint document writes `__id` and `__value` only; its
//! missing `__data` is what keeps it out of query results.

use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};

use crate::error::IndexError;

/// Identity value reserved for the per-index checkpoint document.
pub const CHECKPOINT_ID: &str = "checkpoint";

/// Name of the identity field.
pub const ID_FIELD: &str = "__id";
/// Name of the opaque payload field.
pub const DATA_FIELD: &str = "__data";
/// Name of the checkpoint value field.
pub const VALUE_FIELD: &str = "__value";
/// Name of the tokenized catch-all field.
pub const TEXT_FIELD: &str = "text";
/// Name of the exact-match catch-all field.
pub const EXACT_FIELD: &str = "exact";
/// Name of the stored-values field.
pub const FIELDS_FIELD: &str = "fields";

/// Schema field handles for efficient access.
#[derive(Debug, Clone)]
pub struct EngineSchema {
    schema: Schema,
    pub id: Field,
    pub data: Field,
    pub value: Field,
    pub text: Field,
    pub exact: Field,
    pub fields: Field,
}

impl EngineSchema {
    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rebuild the handles from an existing Tantivy schema.
    ///
    /// Used when reopening a persistent index; fails if the directory was
    /// written by something other than this engine.
    pub fn from_schema(schema: Schema) -> Result<Self, IndexError> {
        let field = |name: &str| {
            schema.get_field(name).map_err(|_| {
                IndexError::Tantivy(tantivy::TantivyError::SchemaError(format!(
                    "missing {} field",
                    name
                )))
            })
        };
        let id = field(ID_FIELD)?;
        let data = field(DATA_FIELD)?;
        let value = field(VALUE_FIELD)?;
        let text = field(TEXT_FIELD)?;
        let exact = field(EXACT_FIELD)?;
        let fields = field(FIELDS_FIELD)?;

        Ok(Self {
            schema,
            id,
            data,
            value,
            text,
            exact,
            fields,
        })
    }
}

/// Build the fixed item schema.
pub fn build_item_schema() -> EngineSchema {
    let mut schema_builder = Schema::builder();

    // Item identity: raw analysis so queries match the whole value
    let id = schema_builder.add_text_field(ID_FIELD, STRING | STORED);

    // Opaque payload, never indexed
    let data = schema_builder.add_text_field(DATA_FIELD, STORED);

    // Checkpoint position, written only on the reserved document
    let value = schema_builder.add_bytes_field(VALUE_FIELD, STORED);

    // Catch-all for tokenized descriptor values (multi-valued)
    let text = schema_builder.add_text_field(TEXT_FIELD, TEXT);

    // Catch-all for exact-match descriptor values (multi-valued)
    let exact = schema_builder.add_text_field(EXACT_FIELD, STRING);

    // Stored descriptor values as one JSON object
    let fields = schema_builder.add_text_field(FIELDS_FIELD, STORED);

    let schema = schema_builder.build();

    EngineSchema {
        schema,
        id,
        data,
        value,
        text,
        exact,
        fields,
    }
}
