//! Engine error types.

use textdex_types::FlagError;
use thiserror::Error;

/// Errors that can occur during indexing operations.
///
/// Every public entry point returns one of these rather than panicking;
/// the hosting boundary converts them to integer status codes via
/// [`IndexError::status_code`].
#[derive(Debug, Error)]
pub enum IndexError {
    /// Operation referenced an index name with no registered directory
    #[error("no index named \"{0}\"")]
    NoIndex(String),

    /// Create attempted on a name that is already registered
    #[error("index \"{0}\" already exists")]
    IndexAlreadyExists(String),

    /// Tantivy index error
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    /// Query parse error
    #[error("Query parse error: {0}")]
    QueryParse(#[from] tantivy::query::QueryParserError),

    /// Malformed command body or unserializable result
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field descriptor carried an unrecognized flag value
    #[error("Invalid field flag: {0}")]
    Flag(#[from] FlagError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation attempted on a disposed engine
    #[error("Engine is closed")]
    EngineClosed,
}

impl IndexError {
    /// Integer status code for the hosting boundary.
    ///
    /// The values 1/2/3 are a compatibility contract: 1 = no such index,
    /// 2 = index already exists, 3 = any engine-level failure.
    pub fn status_code(&self) -> i32 {
        match self {
            IndexError::NoIndex(_) => 1,
            IndexError::IndexAlreadyExists(_) => 2,
            _ => 3,
        }
    }
}
