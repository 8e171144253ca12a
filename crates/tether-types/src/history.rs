//! Append-only history entries.
//!
//! The system state keeps an ordered record of everything that happened
//! during a session: inbound simulation events as they are applied, and
//! backup snapshots as they are committed. History is append-only and is
//! never consulted by the synchronization logic itself -- it exists for
//! display and post-session inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::event::SimEvent;
use crate::snapshot::Snapshot;

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoryEntry {
    /// Wall-clock time the entry was recorded.
    pub recorded_at: DateTime<Utc>,
    /// What was recorded.
    pub kind: HistoryKind,
}

impl HistoryEntry {
    /// Record an entry stamped with the current wall-clock time.
    pub fn now(kind: HistoryKind) -> Self {
        Self {
            recorded_at: Utc::now(),
            kind,
        }
    }
}

/// The payload of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum HistoryKind {
    /// A backup snapshot was committed.
    Snapshot(Snapshot),
    /// An inbound simulation event was applied.
    Event(SimEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_carries_its_kind() {
        let entry = HistoryEntry::now(HistoryKind::Event(SimEvent::Tick { tick: 1 }));
        assert_eq!(entry.kind, HistoryKind::Event(SimEvent::Tick { tick: 1 }));
    }
}
