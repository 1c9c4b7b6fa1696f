//! Writer/reader registry: lazily-opened handles over registered
//! directories.
//!
//! Writers are exclusive mutation handles, readers are query snapshots.
//! Both are created on first use and cached per index name; neither exists
//! without a backing directory. Readers use the manual reload policy, so a
//! cached reader observes the commits present when it was last (re)opened
//! and nothing newer until [`HandleRegistry::reload`] is called.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tantivy::{IndexReader, IndexWriter, ReloadPolicy};
use tracing::{debug, warn};

use crate::directory::DirectoryRegistry;
use crate::error::IndexError;

pub struct HandleRegistry {
    writer_memory_bytes: usize,
    writers: HashMap<String, IndexWriter>,
    readers: HashMap<String, IndexReader>,
}

impl HandleRegistry {
    pub fn new(writer_memory_bytes: usize) -> Self {
        Self {
            writer_memory_bytes,
            writers: HashMap::new(),
            readers: HashMap::new(),
        }
    }

    /// Get or open the writer for `name`.
    ///
    /// Fails with [`IndexError::NoIndex`] when no directory is registered;
    /// handles are never created on demand for unknown names.
    pub fn writer(
        &mut self,
        name: &str,
        directories: &DirectoryRegistry,
    ) -> Result<&mut IndexWriter, IndexError> {
        match self.writers.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let index = directories.get(name)?;
                let writer = index.writer(self.writer_memory_bytes)?;
                debug!(index = name, "Opened index writer");
                Ok(entry.insert(writer))
            }
        }
    }

    /// Get or open the reader for `name`.
    pub fn reader(
        &mut self,
        name: &str,
        directories: &DirectoryRegistry,
    ) -> Result<&IndexReader, IndexError> {
        match self.readers.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let index = directories.get(name)?;
                let reader: IndexReader = index
                    .reader_builder()
                    .reload_policy(ReloadPolicy::Manual)
                    .try_into()?;
                debug!(index = name, "Opened index reader");
                Ok(entry.insert(reader))
            }
        }
    }

    /// Refresh the cached reader for `name` so it observes the latest
    /// commit. No-op when no reader has been opened yet, since a reader
    /// opened later starts fresh anyway.
    pub fn reload(&mut self, name: &str) -> Result<(), IndexError> {
        if let Some(reader) = self.readers.get(name) {
            reader.reload()?;
            debug!(index = name, "Reloaded index reader");
        }
        Ok(())
    }

    /// Release every handle, committing outstanding writer state.
    ///
    /// Commit failures are logged and do not stop the remaining handles
    /// from being released. Safe to call with nothing open.
    pub fn close(&mut self) {
        for (name, writer) in self.writers.iter_mut() {
            if let Err(e) = writer.commit() {
                warn!(index = name, error = %e, "Failed to commit writer during close");
            }
        }
        self.writers.clear();
        self.readers.clear();
    }
}
