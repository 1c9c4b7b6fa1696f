//! # textdex-engine
//!
//! Embeddable multi-index full-text engine with resumable checkpoints,
//! built on Tantivy.
//!
//! The engine maintains a set of independently named indexes, accepts
//! structured commands to create indexes and upsert documents, executes
//! free-text queries, and persists a per-index checkpoint position so a
//! driving event stream can be replayed idempotently after a restart.
//!
//! ## Example
//!
//! ```
//! use textdex_engine::{EngineConfig, IndexEngine};
//!
//! let mut engine = IndexEngine::open(EngineConfig::ephemeral())?;
//! engine.handle_command("index-creation-requested", r#"{"index_name":"posts"}"#)?;
//! engine.handle_command(
//!     "item-created",
//!     r#"{"item_id":"doc1","index_name":"posts","index_data":"{}","fields":[]}"#,
//! )?;
//! engine.flush("posts", 1)?;
//! let results = engine.query("posts", "doc1")?;
//! assert_eq!(results.count, 1);
//! # Ok::<(), textdex_engine::IndexError>(())
//! ```
//!
//! ## Concurrency
//!
//! The engine is single-context: every method takes `&mut self` and no
//! internal locking exists across the registries. A host that shares one
//! engine across threads must serialize access externally, one mutex
//! around the whole engine.

pub mod checkpoint;
pub mod directory;
pub mod document;
pub mod engine;
pub mod error;
pub mod handles;
pub mod query;
pub mod schema;

pub use directory::DirectoryRegistry;
pub use document::{build_item_document, encode_field, EncodedField};
pub use engine::{EngineConfig, IndexEngine};
pub use error::IndexError;
pub use handles::HandleRegistry;
pub use query::QueryOutput;
pub use schema::{build_item_schema, EngineSchema, CHECKPOINT_ID};
