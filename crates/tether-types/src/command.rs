//! Outbound wire commands sent to the remote simulation.
//!
//! Commands are serialized as UTF-8 JSON text with a `cmd` discriminator
//! field, e.g. `{"cmd":"speed","speed":3}`. The protocol is extensible
//! but only the speed command is emitted today.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A control command addressed to the running remote simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "cmd", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Command {
    /// Set the execution speed of the remote simulation.
    ///
    /// The wire value is the local speed multiplier truncated toward
    /// zero; the remote only accepts integral tick rates.
    Speed {
        /// Integral tick-rate multiplier.
        speed: i64,
    },
}
