//! The live, editor-owned model graph.
//!
//! The editor collaborator builds the simulation as a graph of nodes and
//! edges. The synchronization core never mutates a [`LiveModel`]; it only
//! reads one when deriving or reconciling snapshots. Converting a live
//! model into a [`Snapshot`](crate::Snapshot) is the snapshot exporter's
//! job and can fail on structurally invalid graphs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::snapshot::ConfigEntry;

/// The in-memory, user-editable representation of the simulation graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LiveModel {
    /// Graph nodes, one per simulation state.
    pub nodes: Vec<Node>,
    /// Directed edges between nodes, one per transition.
    pub edges: Vec<Edge>,
    /// Configuration entries from the editor settings panel.
    pub configuration: Vec<ConfigEntry>,
}

impl LiveModel {
    /// Whether the model contains no nodes.
    ///
    /// An empty model is never authoritative: derivation treats it the
    /// same as an absent model and falls back to the durable backup.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One node of the editor graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Node {
    /// Stable node identifier.
    pub id: Uuid,
    /// Human-readable label.
    pub label: String,
}

/// One directed edge of the editor graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Edge {
    /// Source node identifier.
    pub from: Uuid,
    /// Target node identifier.
    pub to: Uuid,
    /// Input symbol the transition fires on.
    pub on: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_empty() {
        assert!(LiveModel::default().is_empty());
    }

    #[test]
    fn model_with_a_node_is_not_empty() {
        let model = LiveModel {
            nodes: vec![Node {
                id: Uuid::from_u128(7),
                label: "idle".to_owned(),
            }],
            edges: Vec::new(),
            configuration: Vec::new(),
        };
        assert!(!model.is_empty());
    }
}
