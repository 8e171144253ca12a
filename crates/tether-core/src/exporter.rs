//! Snapshot export: converting the live editor model into a canonical
//! snapshot.
//!
//! The editor owns the graph; this module owns the conversion. Export is
//! a pure function of the model and fails loudly on structurally invalid
//! graphs (duplicate node ids, edges with unknown endpoints) instead of
//! guessing.

use std::collections::BTreeMap;

use tether_types::{LiveModel, Snapshot, StateDef, Transition};
use uuid::Uuid;

/// Errors that can occur while exporting a live model.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// There was no live model to export.
    ///
    /// Raised by reconciliation when neither a reset override nor a live
    /// model is available -- reconciling the backup into itself is a
    /// no-op the core refuses to perform silently.
    #[error("no live model to export")]
    MissingModel,

    /// Two nodes share the same identifier.
    #[error("duplicate node id {id}")]
    DuplicateNode {
        /// The identifier that appears more than once.
        id: Uuid,
    },

    /// An edge references a node that does not exist.
    #[error("edge references unknown node {id}")]
    DanglingEdge {
        /// The unknown endpoint identifier.
        id: Uuid,
    },
}

/// Converts a live editor model into an exportable [`Snapshot`].
pub trait SnapshotExporter {
    /// Convert `model` into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the model is structurally invalid.
    fn export(&self, model: &LiveModel) -> Result<Snapshot, ExportError>;
}

/// The default exporter: one state per node, transitions grouped from
/// edges, configuration carried over verbatim.
///
/// Node and edge order is preserved, so exporting the same model twice
/// yields identical snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelExporter;

impl SnapshotExporter for ModelExporter {
    fn export(&self, model: &LiveModel) -> Result<Snapshot, ExportError> {
        let mut states: Vec<StateDef> = Vec::with_capacity(model.nodes.len());
        let mut index: BTreeMap<Uuid, usize> = BTreeMap::new();

        for node in &model.nodes {
            if index.insert(node.id, states.len()).is_some() {
                return Err(ExportError::DuplicateNode { id: node.id });
            }
            states.push(StateDef {
                id: node.id,
                label: node.label.clone(),
                transitions: Vec::new(),
            });
        }

        for edge in &model.edges {
            if !index.contains_key(&edge.to) {
                return Err(ExportError::DanglingEdge { id: edge.to });
            }
            let slot = index
                .get(&edge.from)
                .and_then(|&i| states.get_mut(i))
                .ok_or(ExportError::DanglingEdge { id: edge.from })?;
            slot.transitions.push(Transition {
                on: edge.on.clone(),
                to: edge.to,
            });
        }

        Ok(Snapshot {
            states,
            configuration: model.configuration.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tether_types::{ConfigEntry, Edge, Node};

    use super::*;

    fn node(id: u128, label: &str) -> Node {
        Node {
            id: Uuid::from_u128(id),
            label: label.to_owned(),
        }
    }

    fn edge(from: u128, to: u128, on: &str) -> Edge {
        Edge {
            from: Uuid::from_u128(from),
            to: Uuid::from_u128(to),
            on: on.to_owned(),
        }
    }

    #[test]
    fn export_groups_transitions_by_source_node() {
        let model = LiveModel {
            nodes: vec![node(1, "a"), node(2, "b")],
            edges: vec![edge(1, 2, "x"), edge(1, 1, "y"), edge(2, 1, "z")],
            configuration: vec![ConfigEntry {
                key: "initial".to_owned(),
                value: "a".to_owned(),
            }],
        };
        let snapshot = ModelExporter.export(&model).unwrap();

        assert_eq!(snapshot.states.len(), 2);
        let a = snapshot.states.first().unwrap();
        assert_eq!(a.label, "a");
        assert_eq!(a.transitions.len(), 2);
        let b = snapshot.states.get(1).unwrap();
        assert_eq!(b.transitions.len(), 1);
        assert_eq!(snapshot.configuration, model.configuration);
    }

    #[test]
    fn export_is_deterministic() {
        let model = LiveModel {
            nodes: vec![node(1, "a"), node(2, "b")],
            edges: vec![edge(2, 1, "z")],
            configuration: Vec::new(),
        };
        assert_eq!(
            ModelExporter.export(&model).unwrap(),
            ModelExporter.export(&model).unwrap()
        );
    }

    #[test]
    fn duplicate_node_ids_fail() {
        let model = LiveModel {
            nodes: vec![node(1, "a"), node(1, "a-again")],
            edges: Vec::new(),
            configuration: Vec::new(),
        };
        let result = ModelExporter.export(&model);
        assert!(matches!(result, Err(ExportError::DuplicateNode { .. })));
    }

    #[test]
    fn dangling_edge_target_fails() {
        let model = LiveModel {
            nodes: vec![node(1, "a")],
            edges: vec![edge(1, 99, "x")],
            configuration: Vec::new(),
        };
        let result = ModelExporter.export(&model);
        assert!(matches!(result, Err(ExportError::DanglingEdge { .. })));
    }

    #[test]
    fn dangling_edge_source_fails() {
        let model = LiveModel {
            nodes: vec![node(1, "a")],
            edges: vec![edge(99, 1, "x")],
            configuration: Vec::new(),
        };
        let result = ModelExporter.export(&model);
        assert!(matches!(result, Err(ExportError::DanglingEdge { .. })));
    }

    #[test]
    fn empty_model_exports_to_empty_snapshot() {
        let snapshot = ModelExporter.export(&LiveModel::default()).unwrap();
        assert!(snapshot.is_empty());
    }
}
