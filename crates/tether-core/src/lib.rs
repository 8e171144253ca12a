//! Synchronization core for the Tether remote-simulation bridge.
//!
//! This crate owns the single authoritative model of a remote
//! simulation's run-time state and keeps it consistent with two possible
//! sources of truth: the live editor model and the durable backup
//! snapshot. It also propagates control commands (execution speed) to the
//! running simulation, change-driven rather than polled.
//!
//! # Modules
//!
//! - [`config`] -- Strongly-typed YAML configuration loading.
//! - [`error`] -- [`CoreError`](error::CoreError) taxonomy.
//! - [`exporter`] -- [`SnapshotExporter`](exporter::SnapshotExporter)
//!   trait and the default [`ModelExporter`](exporter::ModelExporter).
//! - [`state`] -- The [`SystemState`](state::SystemState) aggregate.
//! - [`sync`] -- [`SyncCore`](sync::SyncCore): snapshot derivation,
//!   backup reconciliation, and the speed command channel.
//! - [`transport`] -- The opaque [`Transport`](transport::Transport)
//!   handle and a recording double for tests.
//! - [`watch`] -- Synchronous single-subscriber change notification.

pub mod config;
pub mod error;
pub mod exporter;
pub mod state;
pub mod sync;
pub mod transport;
pub mod watch;

pub use config::{ConfigError, SystemConfig, TetherConfig};
pub use error::CoreError;
pub use exporter::{ExportError, ModelExporter, SnapshotExporter};
pub use state::SystemState;
pub use sync::SyncCore;
pub use transport::{RecordingTransport, Transport, TransportError};
pub use watch::Watched;
