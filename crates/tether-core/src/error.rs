//! Error taxonomy for the synchronization core.
//!
//! Failures that would corrupt the notion of the current snapshot
//! (export failures) propagate to the caller. Best-effort delivery
//! failures (transport closed at emission time) are absorbed at the
//! command channel and never reach this type. Store failures are
//! downgraded to warnings by the core and also never reach this type.

use crate::exporter::ExportError;

/// Errors surfaced by the synchronization core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The live model could not be converted to a snapshot.
    ///
    /// Never silently substituted with the backup -- that would mask
    /// data loss.
    #[error("snapshot export failed: {0}")]
    Export(#[from] ExportError),

    /// A channel index was outside the fixed channel width.
    #[error("channel index {index} out of range (width {width})")]
    ChannelOutOfRange {
        /// The offending zero-based channel index.
        index: usize,
        /// The fixed channel width of this session.
        width: usize,
    },

    /// The session configuration is invalid.
    #[error("invalid configuration: {reason}")]
    Config {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
