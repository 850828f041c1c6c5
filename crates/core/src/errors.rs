use thiserror::Error;

/// Unified error type for the entire open-budget-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The calculators themselves never fail: numeric edge cases resolve to
/// sentinel values inside the result types instead.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Persisted data ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Import ──────────────────────────────────────────────────────
    #[error("Import rejected: {0}")]
    ImportRejected(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("{collection} item not found: {id}")]
    ItemNotFound { collection: String, id: String },
}

impl CoreError {
    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        CoreError::ItemNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
