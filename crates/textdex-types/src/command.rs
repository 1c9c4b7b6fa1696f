//! Command names and JSON body shapes.
//!
//! The upstream dispatcher delivers each command as a (name, JSON body)
//! pair. Unknown command names are not represented here on purpose: the
//! router ignores them to stay forward-compatible.

use serde::{Deserialize, Serialize};

/// Create a new named index.
pub const INDEX_CREATION_REQUESTED: &str = "index-creation-requested";
/// Clear an existing index back to empty.
pub const INDEX_RESET_REQUESTED: &str = "index-reset-requested";
/// Upsert a document into an index.
pub const ITEM_CREATED: &str = "item-created";
/// Same effect as [`ITEM_CREATED`]; kept as a distinct command name for
/// wire compatibility.
pub const ITEM_UPDATED: &str = "item-updated";

/// Body of `index-creation-requested`.
///
/// Historical emitters used either `name` or `index_name`; both are
/// accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexBody {
    #[serde(alias = "name")]
    pub index_name: String,
}

/// Body of `index-reset-requested`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetIndexBody {
    pub index_name: String,
}

/// Body of `item-created` and `item-updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBody {
    pub item_id: String,
    pub index_name: String,
    /// Opaque payload returned verbatim by queries.
    #[serde(default)]
    pub index_data: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One self-describing field descriptor.
///
/// The three flags carry the raw wire integers; decoding them into
/// [`crate::flags`] variants happens in the engine so a malformed flag is
/// reported as an engine error rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termvector: Option<u32>,
}

impl FieldSpec {
    /// A descriptor with all flags absent (engine defaults apply).
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            store: None,
            index: None,
            termvector: None,
        }
    }
}
