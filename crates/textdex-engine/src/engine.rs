//! Engine facade: command routing, queries, checkpoints, disposal.
//!
//! One [`IndexEngine`] owns every registry; there is no process-wide
//! state. The engine is single-context: methods take `&mut self` and the
//! host serializes access externally if it shares the engine across
//! threads.
//!
//! Visibility model: item upserts are buffered in the writer and become
//! visible at the next [`IndexEngine::flush`] for that index, which
//! commits the writer and refreshes the cached reader. Between flushes a
//! cached reader serves the view as of its last (re)open;
//! [`IndexEngine::refresh`] reopens it on demand.

use std::path::PathBuf;

use tantivy::Term;
use tracing::{debug, info};

use textdex_types::{
    CreateIndexBody, ItemBody, ResetIndexBody, INDEX_CREATION_REQUESTED, INDEX_RESET_REQUESTED,
    ITEM_CREATED, ITEM_UPDATED,
};

use crate::checkpoint;
use crate::directory::DirectoryRegistry;
use crate::document::build_item_document;
use crate::error::IndexError;
use crate::handles::HandleRegistry;
use crate::query::{run_query, QueryOutput};
use crate::schema::{build_item_schema, EngineSchema};

/// Default memory budget for each index writer (50MB)
const DEFAULT_WRITER_MEMORY_MB: usize = 50;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root path for persistent indexes; `None` keeps every index in
    /// memory.
    pub base_path: Option<PathBuf>,
    /// Memory budget per index writer in MB
    pub writer_memory_mb: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
        }
    }
}

impl EngineConfig {
    /// In-memory storage for every index; nothing survives disposal.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Filesystem storage rooted at `base_path`, one subdirectory per
    /// index name.
    pub fn persistent(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::default()
        }
    }

    pub fn with_memory_mb(mut self, mb: usize) -> Self {
        self.writer_memory_mb = mb;
        self
    }
}

/// The externally visible indexing engine.
pub struct IndexEngine {
    schema: EngineSchema,
    directories: DirectoryRegistry,
    handles: HandleRegistry,
    closed: bool,
}

impl IndexEngine {
    /// Open an engine instance. All per-index resources are created
    /// lazily afterwards.
    pub fn open(config: EngineConfig) -> Result<Self, IndexError> {
        if let Some(base) = &config.base_path {
            std::fs::create_dir_all(base)?;
        }
        info!(
            persistent = config.base_path.is_some(),
            "Opened indexing engine"
        );

        Ok(Self {
            schema: build_item_schema(),
            directories: DirectoryRegistry::new(config.base_path),
            handles: HandleRegistry::new(config.writer_memory_mb * 1024 * 1024),
            closed: false,
        })
    }

    /// Dispatch one (command-name, JSON body) pair.
    ///
    /// Unrecognized command names are ignored so the command surface stays
    /// forward-compatible; every other failure comes back as a tagged
    /// [`IndexError`].
    pub fn handle_command(&mut self, command: &str, body: &str) -> Result<(), IndexError> {
        self.ensure_open()?;
        match command {
            INDEX_CREATION_REQUESTED => {
                let body: CreateIndexBody = serde_json::from_str(body)?;
                self.create_index(&body.index_name)
            }
            INDEX_RESET_REQUESTED => {
                let body: ResetIndexBody = serde_json::from_str(body)?;
                self.reset_index(&body.index_name)
            }
            ITEM_CREATED | ITEM_UPDATED => {
                let body: ItemBody = serde_json::from_str(body)?;
                self.upsert_item(&body)
            }
            other => {
                debug!(command = other, "Ignoring unrecognized command");
                Ok(())
            }
        }
    }

    /// Execute a free-text query against the named index.
    ///
    /// Serves the cached reader's view; see the module docs for the
    /// visibility model.
    pub fn query(&mut self, index_name: &str, query_text: &str) -> Result<QueryOutput, IndexError> {
        self.ensure_open()?;
        let index = self.directories.get(index_name)?;
        let reader = self.handles.reader(index_name, &self.directories)?;
        run_query(index, reader, &self.schema, query_text)
    }

    /// Persist `position` as the index's checkpoint and commit every
    /// buffered write, making them durable and visible.
    pub fn flush(&mut self, index_name: &str, position: i32) -> Result<(), IndexError> {
        self.ensure_open()?;
        let writer = self.handles.writer(index_name, &self.directories)?;
        checkpoint::write_position(writer, &self.schema, position)?;
        writer.commit()?;
        self.handles.reload(index_name)?;
        info!(index = index_name, position, "Flushed index");
        Ok(())
    }

    /// Read back the last flushed checkpoint position.
    pub fn read_position(&mut self, index_name: &str) -> Result<i32, IndexError> {
        self.ensure_open()?;
        let reader = self.handles.reader(index_name, &self.directories)?;
        checkpoint::read_position(&reader.searcher(), &self.schema, index_name)
    }

    /// Reopen the named index's reader so queries observe the latest
    /// commit without waiting for the next flush.
    pub fn refresh(&mut self, index_name: &str) -> Result<(), IndexError> {
        self.ensure_open()?;
        if !self.directories.contains(index_name) {
            return Err(IndexError::NoIndex(index_name.to_string()));
        }
        self.handles.reload(index_name)
    }

    /// Names of every index registered in this instance, sorted.
    pub fn index_names(&self) -> Vec<String> {
        self.directories.names()
    }

    /// Release all writers and directories. Idempotent; commit failures
    /// are logged and never block disposal. Disposal is terminal: every
    /// subsequent operation fails with [`IndexError::EngineClosed`].
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.handles.close();
        self.directories.clear();
        self.closed = true;
        info!("Closed indexing engine");
    }

    fn ensure_open(&self) -> Result<(), IndexError> {
        if self.closed {
            return Err(IndexError::EngineClosed);
        }
        Ok(())
    }

    fn create_index(&mut self, name: &str) -> Result<(), IndexError> {
        self.directories.create(name, &self.schema)?;
        // Eagerly open the writer so creation surfaces storage problems
        // immediately rather than on the first item
        self.handles.writer(name, &self.directories)?;
        info!(index = name, "Created index");
        Ok(())
    }

    /// Clear an index back to empty. The registration, writer, and
    /// storage location survive; only the documents (checkpoint included)
    /// are removed.
    fn reset_index(&mut self, name: &str) -> Result<(), IndexError> {
        if !self.directories.contains(name) {
            return Err(IndexError::NoIndex(name.to_string()));
        }
        let writer = self.handles.writer(name, &self.directories)?;
        writer.delete_all_documents()?;
        writer.commit()?;
        self.handles.reload(name)?;
        info!(index = name, "Reset index");
        Ok(())
    }

    fn upsert_item(&mut self, body: &ItemBody) -> Result<(), IndexError> {
        let doc = build_item_document(&self.schema, &body.item_id, &body.index_data, &body.fields)?;
        let writer = self.handles.writer(&body.index_name, &self.directories)?;

        // Delete-then-insert keyed on the identity: at most one live
        // document per item id
        let term = Term::from_field_text(self.schema.id, &body.item_id);
        writer.delete_term(term);
        writer.add_document(doc)?;

        debug!(index = %body.index_name, item = %body.item_id, "Upserted item");
        Ok(())
    }
}

impl Drop for IndexEngine {
    fn drop(&mut self) {
        self.close();
    }
}
