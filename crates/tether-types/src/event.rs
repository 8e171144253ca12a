//! Inbound events produced by the remote simulation.
//!
//! The remote side reports progress as JSON text frames with an `evt`
//! discriminator field, mirroring the outbound command format. Events are
//! applied to the system state by the synchronization core; this crate
//! only defines their shape.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One inbound event from the running remote simulation.
///
/// Events own the remote-reported fields of the system state: the tick
/// counter, the channel input and verdict slots, the interpreted value,
/// and the run/stop flag. Channel indices are validated at application
/// time, not at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "evt", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SimEvent {
    /// The remote simulation advanced to a new tick.
    Tick {
        /// Absolute tick counter as reported by the remote side.
        tick: u64,
    },
    /// A channel received a new input value.
    Input {
        /// Zero-based channel index.
        channel: usize,
        /// New input value for the slot.
        value: String,
    },
    /// The remote simulation produced a verdict for a channel.
    Verdict {
        /// Zero-based channel index.
        channel: usize,
        /// Verdict text; `"?"` means unknown/unevaluated.
        value: String,
    },
    /// The remote simulation recomposed the interpreted value.
    Interp {
        /// New interpreted/composed value.
        value: String,
    },
    /// The remote simulation started or stopped.
    Halted {
        /// True when the simulation is not running.
        halted: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tick_event_wire_format() {
        let evt: SimEvent = serde_json::from_str(r#"{"evt":"tick","tick":42}"#).unwrap();
        assert_eq!(evt, SimEvent::Tick { tick: 42 });
    }

    #[test]
    fn verdict_event_wire_format() {
        let evt: SimEvent =
            serde_json::from_str(r#"{"evt":"verdict","channel":3,"value":"pass"}"#).unwrap();
        assert_eq!(
            evt,
            SimEvent::Verdict {
                channel: 3,
                value: "pass".to_owned(),
            }
        );
    }
}
