//! Field encoding: dynamic descriptors into the fixed backing schema.
//!
//! Each descriptor resolves its three wire flags (defaults: not stored,
//! exact-match untokenized, no term vectors) and is routed by its index
//! flag into the catch-all `text`/`exact` fields. Stored values are
//! collected into one JSON object under the `fields` field. Values are
//! UTF-8 throughout; the JSON codec guarantees valid input, so no lossy
//! transcoding path exists.
//!
//! Term-vector requests are decoded and validated for wire compatibility
//! but do not alter the backing schema: the tokenized field always records
//! positions, which covers every combination the flags can ask for.

use tantivy::TantivyDocument;

use textdex_types::{FieldSpec, IndexFlag, StoreFlag, TermVectorFlag};

use crate::error::IndexError;
use crate::schema::EngineSchema;

/// A descriptor with its flags resolved.
#[derive(Debug, Clone)]
pub struct EncodedField {
    pub name: String,
    pub value: String,
    pub store: StoreFlag,
    pub index: IndexFlag,
    pub termvector: TermVectorFlag,
}

/// Resolve a descriptor's flags, applying the documented defaults for
/// absent ones.
pub fn encode_field(spec: &FieldSpec) -> Result<EncodedField, IndexError> {
    let store = match spec.store {
        Some(wire) => StoreFlag::from_wire(wire)?,
        None => StoreFlag::default(),
    };
    let index = match spec.index {
        Some(wire) => IndexFlag::from_wire(wire)?,
        None => IndexFlag::default(),
    };
    let termvector = match spec.termvector {
        Some(wire) => TermVectorFlag::from_wire(wire)?,
        None => TermVectorFlag::default(),
    };

    Ok(EncodedField {
        name: spec.name.clone(),
        value: spec.value.clone(),
        store,
        index,
        termvector,
    })
}

/// Build the document for one item.
///
/// Attaches the reserved `__id` and `__data` fields, then routes each
/// descriptor per its flags. Descriptor order is preserved within each
/// catch-all field. Duplicate names are legal: both values are indexed,
/// and in the stored object the last one wins.
pub fn build_item_document(
    schema: &EngineSchema,
    item_id: &str,
    index_data: &str,
    fields: &[FieldSpec],
) -> Result<TantivyDocument, IndexError> {
    let mut doc = TantivyDocument::new();
    doc.add_text(schema.id, item_id);
    doc.add_text(schema.data, index_data);

    let mut stored = serde_json::Map::new();
    for spec in fields {
        let field = encode_field(spec)?;
        match field.index {
            IndexFlag::Tokenized => doc.add_text(schema.text, &field.value),
            IndexFlag::Exact | IndexFlag::ExactNoNorms => doc.add_text(schema.exact, &field.value),
            IndexFlag::NotIndexed => {}
        }
        if field.store.is_stored() {
            stored.insert(field.name, serde_json::Value::String(field.value));
        }
    }
    if !stored.is_empty() {
        doc.add_text(schema.fields, serde_json::Value::Object(stored).to_string());
    }

    Ok(doc)
}
