//! Error types for the backup store.
//!
//! All store failures are propagated via [`StoreError`]. The
//! synchronization core treats them as recoverable: a failed load falls
//! back to the bundled sample snapshot, a failed save is logged and the
//! session continues.

/// Errors that can occur in the backup store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An underlying filesystem operation failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage key is empty or contains unsafe characters.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
