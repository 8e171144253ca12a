//! Canonical exportable snapshots of the simulation model.
//!
//! A [`Snapshot`] is the serializable form of the simulation: the state
//! machine plus its configuration entries. Snapshots are what the durable
//! backup store persists and what the snapshot exporter produces from the
//! live editor model. The synchronization core never edits a snapshot in
//! place -- it only replaces the whole value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A canonical, serializable representation of the simulation model.
///
/// Suitable for export/import and persistence. An empty snapshot (no
/// states) is a valid value but is never authoritative: derivation falls
/// back to the last non-empty backup instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// Ordered state definitions of the simulated machine.
    pub states: Vec<StateDef>,
    /// Ordered configuration entries (editor settings panel).
    pub configuration: Vec<ConfigEntry>,
}

impl Snapshot {
    /// Whether this snapshot carries no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The bundled fallback sample used when no durable backup exists.
    ///
    /// A two-state toggle machine. Deterministic identifiers so first-run
    /// sessions on different hosts hydrate the same value.
    pub fn sample() -> Self {
        let off = Uuid::from_u128(1);
        let on = Uuid::from_u128(2);
        Self {
            states: vec![
                StateDef {
                    id: off,
                    label: "off".to_owned(),
                    transitions: vec![Transition {
                        on: "1".to_owned(),
                        to: on,
                    }],
                },
                StateDef {
                    id: on,
                    label: "on".to_owned(),
                    transitions: vec![Transition {
                        on: "0".to_owned(),
                        to: off,
                    }],
                },
            ],
            configuration: vec![ConfigEntry {
                key: "initial".to_owned(),
                value: "off".to_owned(),
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// StateDef
// ---------------------------------------------------------------------------

/// One state of the simulated machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StateDef {
    /// Stable identifier, carried over from the editor node.
    pub id: Uuid,
    /// Human-readable label shown in the editor.
    pub label: String,
    /// Outgoing transitions, in editor order.
    pub transitions: Vec<Transition>,
}

/// A transition from one state to another on a given input symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Transition {
    /// Input symbol that triggers the transition.
    pub on: String,
    /// Identifier of the target state.
    pub to: Uuid,
}

// ---------------------------------------------------------------------------
// ConfigEntry
// ---------------------------------------------------------------------------

/// One configuration entry of the simulation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConfigEntry {
    /// Setting name.
    pub key: String,
    /// Setting value, kept as text the way the editor produced it.
    pub value: String,
}
