//! Directory registry: maps index names to storage.
//!
//! Each name is bound to exactly one directory for the life of the engine.
//! Ephemeral mode (no base path) backs every index with a RAM directory;
//! persistent mode places each index under `base_path/<name>` and reuses
//! whatever an earlier run left there.

use std::collections::HashMap;
use std::path::PathBuf;

use tantivy::Index;
use tracing::{debug, info, warn};

use crate::error::IndexError;
use crate::schema::EngineSchema;

/// Lock files Tantivy leaves behind on an unclean shutdown. A stale lock
/// blocks the first writer, so they are cleared before reopening.
const STALE_LOCK_FILES: &[&str] = &[".tantivy-meta.lock", ".tantivy-writer.lock"];

/// Owns one opened [`Index`] per registered name.
pub struct DirectoryRegistry {
    base_path: Option<PathBuf>,
    entries: HashMap<String, Index>,
}

impl DirectoryRegistry {
    /// `base_path = None` selects ephemeral (in-memory) storage for every
    /// index; a path selects one persistent subdirectory per index name.
    pub fn new(base_path: Option<PathBuf>) -> Self {
        Self {
            base_path,
            entries: HashMap::new(),
        }
    }

    /// True when indexes are filesystem-backed.
    pub fn is_persistent(&self) -> bool {
        self.base_path.is_some()
    }

    /// Register storage for `name`.
    ///
    /// Fails with [`IndexError::IndexAlreadyExists`] if the name is already
    /// registered in this engine instance. In persistent mode a directory
    /// left by a previous run is reopened rather than clobbered, which is
    /// what lets a replayed command stream recover existing data.
    pub fn create(&mut self, name: &str, schema: &EngineSchema) -> Result<&Index, IndexError> {
        if self.entries.contains_key(name) {
            return Err(IndexError::IndexAlreadyExists(name.to_string()));
        }

        let index = match &self.base_path {
            None => {
                debug!(index = name, "Creating ephemeral index");
                Index::create_in_ram(schema.schema().clone())
            }
            Some(base) => {
                let path = base.join(name);
                std::fs::create_dir_all(&path)?;
                if path.join("meta.json").exists() {
                    clear_stale_locks(&path);
                    info!(index = name, path = ?path, "Reopening existing index");
                    let index = Index::open_in_dir(&path)?;
                    // Refuse directories written by something else
                    EngineSchema::from_schema(index.schema())?;
                    index
                } else {
                    info!(index = name, path = ?path, "Creating new index");
                    Index::create_in_dir(&path, schema.schema().clone())?
                }
            }
        };

        Ok(self.entries.entry(name.to_string()).or_insert(index))
    }

    /// Look up the directory registered for `name`.
    pub fn get(&self, name: &str) -> Result<&Index, IndexError> {
        self.entries
            .get(name)
            .ok_or_else(|| IndexError::NoIndex(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every registration. Used only at engine teardown.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn clear_stale_locks(path: &std::path::Path) {
    for lock in STALE_LOCK_FILES {
        let lock_path = path.join(lock);
        if lock_path.exists() {
            warn!(path = ?lock_path, "Removing stale index lock");
            if let Err(e) = std::fs::remove_file(&lock_path) {
                warn!(path = ?lock_path, error = %e, "Failed to remove stale lock");
            }
        }
    }
}
