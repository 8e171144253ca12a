//! Shared type definitions for the Tether synchronization core.
//!
//! This crate is the single source of truth for the types that cross the
//! boundaries of the synchronization core: snapshots and their parts, the
//! live editor model, inbound simulation events, outbound wire commands,
//! and run modes. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the editor frontend.
//!
//! # Modules
//!
//! - [`command`] -- Outbound wire commands sent to the remote simulation
//! - [`enums`] -- Run mode enumeration
//! - [`event`] -- Inbound simulation events applied to the system state
//! - [`history`] -- Append-only history entries (snapshots and events)
//! - [`model`] -- The live, editor-owned model graph
//! - [`snapshot`] -- Canonical exportable snapshots

pub mod command;
pub mod enums;
pub mod event;
pub mod history;
pub mod model;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use command::Command;
pub use enums::RunMode;
pub use event::SimEvent;
pub use history::{HistoryEntry, HistoryKind};
pub use model::{Edge, LiveModel, Node};
pub use snapshot::{ConfigEntry, Snapshot, StateDef, Transition};
