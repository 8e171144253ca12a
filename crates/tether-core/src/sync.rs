//! Snapshot derivation, backup reconciliation, and the speed command
//! channel.
//!
//! [`SyncCore`] is the explicitly-constructed context object that owns
//! the [`SystemState`], the durable [`BackupStore`], and the
//! [`SnapshotExporter`]. It answers one question -- "what is the current
//! snapshot?" -- and performs one commitment, reconciling the durable
//! backup. The speed command channel is wired at construction and fires
//! synchronously on every distinct speed write.

use tether_store::BackupStore;
use tether_types::{Command, HistoryKind, LiveModel, RunMode, Snapshot};

use crate::config::TetherConfig;
use crate::error::CoreError;
use crate::exporter::{ExportError, SnapshotExporter};
use crate::state::{ConnectionSlot, SystemState};

// ---------------------------------------------------------------------------
// Command channel
// ---------------------------------------------------------------------------

/// Fire-and-forget serializer of control commands onto the transport.
///
/// If the transport is absent, closed, or rejects the write, the command
/// is dropped -- no queueing, no retry, no buffering of missed updates.
/// Speed changes made while disconnected are simply never delivered.
#[derive(Clone)]
pub(crate) struct CommandChannel {
    connection: ConnectionSlot,
}

impl CommandChannel {
    pub(crate) const fn new(connection: ConnectionSlot) -> Self {
        Self { connection }
    }

    /// Emit a speed command for the given multiplier, best-effort.
    fn emit_speed(&self, speed: f64) {
        let mut slot = self.connection.borrow_mut();
        let Some(transport) = slot.as_mut() else {
            tracing::debug!(speed, "Speed command dropped: no transport attached");
            return;
        };
        if !transport.is_open() {
            tracing::debug!(speed, "Speed command dropped: transport not open");
            return;
        }

        let command = Command::Speed {
            speed: wire_speed(speed),
        };
        match serde_json::to_string(&command) {
            Ok(text) => {
                if let Err(err) = transport.send(&text) {
                    tracing::debug!(speed, error = %err, "Speed command dropped: send failed");
                }
            }
            Err(err) => tracing::warn!(speed, error = %err, "Failed to serialize speed command"),
        }
    }
}

/// Truncate a speed multiplier toward zero for the wire.
///
/// The remote simulation only accepts integral tick rates; the
/// fractional part is intentionally lost. Out-of-range values saturate
/// and NaN maps to zero (`as` cast semantics).
#[allow(clippy::cast_possible_truncation)]
fn wire_speed(speed: f64) -> i64 {
    speed as i64
}

// ---------------------------------------------------------------------------
// SyncCore
// ---------------------------------------------------------------------------

/// The synchronization core of one session.
pub struct SyncCore {
    state: SystemState,
    store: Box<dyn BackupStore>,
    exporter: Box<dyn SnapshotExporter>,
    storage_key: String,
}

impl SyncCore {
    /// Construct the core: hydrate the backup, build the state
    /// aggregate, and wire the speed observer to the command channel.
    ///
    /// Hydration loads the snapshot stored under the configured key. A
    /// missing key or a load failure falls back to the bundled sample --
    /// the backup is never null -- and a load failure additionally logs
    /// a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the configured run mode is
    /// unknown, the channel width is zero, or the default speed is not
    /// a positive number.
    pub fn new(
        config: &TetherConfig,
        store: Box<dyn BackupStore>,
        exporter: Box<dyn SnapshotExporter>,
    ) -> Result<Self, CoreError> {
        let system = &config.system;

        let mode = RunMode::from_name(&system.default_mode).ok_or_else(|| CoreError::Config {
            reason: format!("unknown run mode: {}", system.default_mode),
        })?;

        let backup = match store.load(&system.storage_key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!(
                    key = %system.storage_key,
                    "No stored backup, hydrating from bundled sample"
                );
                Snapshot::sample()
            }
            Err(err) => {
                tracing::warn!(
                    key = %system.storage_key,
                    error = %err,
                    "Backup load failed, hydrating from bundled sample"
                );
                Snapshot::sample()
            }
        };

        let mut state = SystemState::new(system.channels, system.default_speed, mode, backup)?;
        let channel = CommandChannel::new(state.connection_slot());
        state.observe_speed(move |speed| channel.emit_speed(*speed));

        Ok(Self {
            state,
            store,
            exporter,
            storage_key: system.storage_key.clone(),
        })
    }

    /// The state aggregate.
    pub const fn state(&self) -> &SystemState {
        &self.state
    }

    /// Mutable access to the state aggregate.
    pub const fn state_mut(&mut self) -> &mut SystemState {
        &mut self.state
    }

    /// Derive the current effective snapshot.
    ///
    /// If a live model is present and non-empty, its export is
    /// authoritative; otherwise the backup is. Pure with respect to the
    /// caller: no mutation, safe to call repeatedly for display.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Export`] if the live model is structurally
    /// invalid. The failure is never masked by falling back to the
    /// backup.
    pub fn derive(&self, live: Option<&LiveModel>) -> Result<Snapshot, CoreError> {
        match live {
            Some(model) if !model.is_empty() => Ok(self.exporter.export(model)?),
            _ => Ok(self.state.backup().clone()),
        }
    }

    /// Reconcile the durable backup.
    ///
    /// The operator's `reset` override, when present and non-empty, wins
    /// unconditionally. Otherwise reconciliation always attempts a fresh
    /// export of the live model -- it never takes `derive`'s shortcut
    /// back to the backup, since committing the backup into itself would
    /// be a silent no-op.
    ///
    /// Idempotent: with no intervening state change, a second call
    /// commits the same value and writes nothing new. Every actual
    /// change of the backup is written through to the durable store and
    /// recorded in the history; a failed write-through logs a warning
    /// and the session continues with the in-memory backup.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Export`] if no reset is set and the live
    /// model is absent or fails to export.
    pub fn reconcile(&mut self, live: Option<&LiveModel>) -> Result<(), CoreError> {
        let next = match self.state.reset() {
            Some(reset) if !reset.is_empty() => reset.clone(),
            _ => {
                let model = live.ok_or(ExportError::MissingModel)?;
                self.exporter.export(model)?
            }
        };

        if next == *self.state.backup() {
            return Ok(());
        }

        if let Err(err) = self.store.save(&self.storage_key, &next) {
            tracing::warn!(
                key = %self.storage_key,
                error = %err,
                "Backup save failed; durable copy is stale"
            );
        }
        self.state.push_history(HistoryKind::Snapshot(next.clone()));
        self.state.set_backup(next);
        Ok(())
    }
}
