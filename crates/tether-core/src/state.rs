//! The shared system-state aggregate.
//!
//! [`SystemState`] is the single mutable, observable model of the remote
//! simulation's run-time state. It is created once per session,
//! explicitly constructed and explicitly passed -- there is no global.
//!
//! Three collaborators mutate it, each through its own accessor group:
//!
//! - the **editor** owns `states` and `configuration`;
//! - the **operator** owns `speed`, `mode`, `halted`, `reset`, and the
//!   transport attachment;
//! - **inbound remote events** own `tick`, `history`, `inputs`,
//!   `verdicts`, and `interp`.
//!
//! That discipline is a convention enforced by accessor grouping, not by
//! physical isolation: any collaborator may read everything.

use std::cell::RefCell;
use std::rc::Rc;

use tether_types::{
    ConfigEntry, HistoryEntry, HistoryKind, RunMode, SimEvent, Snapshot, StateDef,
};

use crate::error::CoreError;
use crate::transport::Transport;
use crate::watch::Watched;

/// The transport slot shared between the system state and the command
/// channel.
///
/// Single-threaded session, so interior mutability via [`RefCell`] is
/// enough; the command channel borrows the slot only for the duration of
/// one synchronous emission.
pub type ConnectionSlot = Rc<RefCell<Option<Box<dyn Transport>>>>;

/// The single long-lived state aggregate of a session.
pub struct SystemState {
    mode: RunMode,
    states: Vec<StateDef>,
    configuration: Vec<ConfigEntry>,
    speed: Watched<f64>,
    tick: u64,
    history: Vec<HistoryEntry>,
    backup: Snapshot,
    reset: Option<Snapshot>,
    halted: bool,
    connection: ConnectionSlot,
    inputs: Vec<String>,
    interp: String,
    verdicts: Vec<String>,
}

impl SystemState {
    /// Create the session aggregate.
    ///
    /// `channels` fixes the width of the input and verdict arrays for
    /// the whole session. `backup` must already be hydrated (the sync
    /// core loads it from the durable store, falling back to the bundled
    /// sample), so it is never empty-by-accident here.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if `channels` is zero or
    /// `default_speed` is not a positive finite number.
    pub fn new(
        channels: usize,
        default_speed: f64,
        mode: RunMode,
        backup: Snapshot,
    ) -> Result<Self, CoreError> {
        if channels == 0 {
            return Err(CoreError::Config {
                reason: "channels must be at least 1".to_owned(),
            });
        }
        if !(default_speed.is_finite() && default_speed > 0.0) {
            return Err(CoreError::Config {
                reason: format!("default_speed must be a positive number, got {default_speed}"),
            });
        }

        Ok(Self {
            mode,
            states: Vec::new(),
            configuration: Vec::new(),
            speed: Watched::new(default_speed),
            tick: 0,
            history: Vec::new(),
            backup,
            reset: None,
            halted: true,
            connection: Rc::new(RefCell::new(None)),
            inputs: vec![String::new(); channels],
            interp: String::new(),
            verdicts: vec!["?".to_owned(); channels],
        })
    }

    // -----------------------------------------------------------------------
    // Editor-owned fields
    // -----------------------------------------------------------------------

    /// The editor's mirror of the state definitions.
    pub fn states(&self) -> &[StateDef] {
        &self.states
    }

    /// Replace the state-definition mirror (editor only).
    pub fn set_states(&mut self, states: Vec<StateDef>) {
        self.states = states;
    }

    /// The editor's mirror of the configuration entries.
    pub fn configuration(&self) -> &[ConfigEntry] {
        &self.configuration
    }

    /// Replace the configuration mirror (editor only).
    pub fn set_configuration(&mut self, configuration: Vec<ConfigEntry>) {
        self.configuration = configuration;
    }

    // -----------------------------------------------------------------------
    // Operator-owned fields
    // -----------------------------------------------------------------------

    /// Current run mode.
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Set the run mode (operator only).
    pub const fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    /// Current execution-speed multiplier.
    pub const fn speed(&self) -> f64 {
        *self.speed.get()
    }

    /// Set the execution speed (operator only).
    ///
    /// The multiplier must be a positive finite number; anything else
    /// is rejected and the current value kept. A distinct accepted
    /// value notifies the speed observer synchronously, before this
    /// call returns; re-assigning the current value does not. The sync
    /// core wires that observer to the command channel.
    ///
    /// Returns the previous value on success, or `None` if the value
    /// was rejected.
    pub fn set_speed(&mut self, speed: f64) -> Option<f64> {
        if !(speed.is_finite() && speed > 0.0) {
            return None;
        }
        let prev = *self.speed.get();
        self.speed.set(speed);
        Some(prev)
    }

    /// Whether the remote simulation is stopped.
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Set the run/stop flag (operator only).
    pub const fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }

    /// The operator's override snapshot, if set.
    pub const fn reset(&self) -> Option<&Snapshot> {
        self.reset.as_ref()
    }

    /// Set the override snapshot (operator only).
    ///
    /// While present and non-empty, it wins over a fresh export during
    /// reconciliation. It is never consumed implicitly -- clear it with
    /// [`clear_reset`](Self::clear_reset).
    pub fn set_reset(&mut self, reset: Snapshot) {
        self.reset = Some(reset);
    }

    /// Drop the override snapshot (operator only).
    pub fn clear_reset(&mut self) {
        self.reset = None;
    }

    /// Attach the transport handle, replacing any previous one.
    pub fn attach_transport(&mut self, transport: Box<dyn Transport>) {
        *self.connection.borrow_mut() = Some(transport);
    }

    /// Detach the transport handle, if any.
    pub fn detach_transport(&mut self) {
        *self.connection.borrow_mut() = None;
    }

    /// Whether a transport is attached and reports itself open.
    pub fn is_connected(&self) -> bool {
        self.connection
            .borrow()
            .as_ref()
            .is_some_and(|transport| transport.is_open())
    }

    /// Shared handle to the transport slot, for the command channel.
    pub(crate) fn connection_slot(&self) -> ConnectionSlot {
        Rc::clone(&self.connection)
    }

    /// Register the speed observer (sync core wiring).
    pub(crate) fn observe_speed(&mut self, observer: impl FnMut(&f64) + 'static) {
        self.speed.observe(observer);
    }

    // -----------------------------------------------------------------------
    // Inbound-event-owned fields
    // -----------------------------------------------------------------------

    /// Current tick counter as reported by the remote simulation.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The current interpreted/composed value.
    pub fn interp(&self) -> &str {
        &self.interp
    }

    /// The append-only session history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Apply one inbound simulation event and append it to the history.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelOutOfRange`] if the event addresses a
    /// channel outside the fixed width. A rejected event is not recorded
    /// in the history.
    pub fn apply_event(&mut self, event: SimEvent) -> Result<(), CoreError> {
        match &event {
            SimEvent::Tick { tick } => self.tick = *tick,
            SimEvent::Input { channel, value } => self.set_input(*channel, value.clone())?,
            SimEvent::Verdict { channel, value } => self.set_verdict(*channel, value.clone())?,
            SimEvent::Interp { value } => self.interp = value.clone(),
            SimEvent::Halted { halted } => self.halted = *halted,
        }
        self.history.push(HistoryEntry::now(HistoryKind::Event(event)));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Channel arrays
    // -----------------------------------------------------------------------

    /// Fixed channel width of this session.
    pub fn width(&self) -> usize {
        self.inputs.len()
    }

    /// Input value of one channel.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelOutOfRange`] beyond the fixed width.
    pub fn input(&self, channel: usize) -> Result<&str, CoreError> {
        self.inputs
            .get(channel)
            .map(String::as_str)
            .ok_or(CoreError::ChannelOutOfRange {
                index: channel,
                width: self.inputs.len(),
            })
    }

    /// Set the input value of one channel. Other slots are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelOutOfRange`] beyond the fixed width.
    pub fn set_input(&mut self, channel: usize, value: String) -> Result<(), CoreError> {
        let width = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(channel)
            .ok_or(CoreError::ChannelOutOfRange {
                index: channel,
                width,
            })?;
        *slot = value;
        Ok(())
    }

    /// Verdict of one channel; `"?"` means unknown/unevaluated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelOutOfRange`] beyond the fixed width.
    pub fn verdict(&self, channel: usize) -> Result<&str, CoreError> {
        self.verdicts
            .get(channel)
            .map(String::as_str)
            .ok_or(CoreError::ChannelOutOfRange {
                index: channel,
                width: self.verdicts.len(),
            })
    }

    /// Set the verdict of one channel. Stored, not interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelOutOfRange`] beyond the fixed width.
    pub fn set_verdict(&mut self, channel: usize, value: String) -> Result<(), CoreError> {
        let width = self.verdicts.len();
        let slot = self
            .verdicts
            .get_mut(channel)
            .ok_or(CoreError::ChannelOutOfRange {
                index: channel,
                width,
            })?;
        *slot = value;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Backup
    // -----------------------------------------------------------------------

    /// The last reconciled backup snapshot. Never null: hydration falls
    /// back to the bundled sample before any live data exists.
    pub const fn backup(&self) -> &Snapshot {
        &self.backup
    }

    /// Commit a new backup value (sync core only).
    pub(crate) fn set_backup(&mut self, backup: Snapshot) {
        self.backup = backup;
    }

    /// Append a history entry (sync core only).
    pub(crate) fn push_history(&mut self, kind: HistoryKind) {
        self.history.push(HistoryEntry::now(kind));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn fresh_state() -> SystemState {
        SystemState::new(10, 1.5, RunMode::Pseudorandom, Snapshot::sample()).unwrap()
    }

    #[test]
    fn fresh_state_has_documented_defaults() {
        let state = fresh_state();
        assert_eq!(state.mode(), RunMode::Pseudorandom);
        assert_eq!(state.tick(), 0);
        assert!(state.halted());
        assert!(state.history().is_empty());
        assert!(state.reset().is_none());
        assert!(!state.is_connected());
        assert_eq!(state.interp(), "");
        assert!(!state.backup().is_empty());
    }

    #[test]
    fn channel_arrays_are_fixed_width_with_sentinel_verdicts() {
        let state = fresh_state();
        assert_eq!(state.width(), 10);
        for channel in 0..10 {
            assert_eq!(state.input(channel).unwrap(), "");
            assert_eq!(state.verdict(channel).unwrap(), "?");
        }
    }

    #[test]
    fn mutating_one_slot_leaves_the_others_alone() {
        let mut state = fresh_state();
        state.set_input(3, "1".to_owned()).unwrap();
        state.set_verdict(7, "pass".to_owned()).unwrap();

        for channel in 0..10 {
            let expected_input = if channel == 3 { "1" } else { "" };
            let expected_verdict = if channel == 7 { "pass" } else { "?" };
            assert_eq!(state.input(channel).unwrap(), expected_input);
            assert_eq!(state.verdict(channel).unwrap(), expected_verdict);
        }
        assert_eq!(state.width(), 10);
    }

    #[test]
    fn out_of_range_channel_is_a_typed_error() {
        let mut state = fresh_state();
        let result = state.set_input(10, "x".to_owned());
        assert!(matches!(
            result,
            Err(CoreError::ChannelOutOfRange {
                index: 10,
                width: 10
            })
        ));
    }

    #[test]
    fn zero_channels_is_a_config_error() {
        let result = SystemState::new(0, 1.5, RunMode::Manual, Snapshot::sample());
        assert!(matches!(result, Err(CoreError::Config { .. })));
    }

    #[test]
    fn non_positive_speed_is_a_config_error() {
        let result = SystemState::new(10, 0.0, RunMode::Manual, Snapshot::sample());
        assert!(matches!(result, Err(CoreError::Config { .. })));
        let result = SystemState::new(10, f64::NAN, RunMode::Manual, Snapshot::sample());
        assert!(matches!(result, Err(CoreError::Config { .. })));
    }

    #[test]
    fn events_mutate_their_owned_fields_and_land_in_history() {
        let mut state = fresh_state();
        state.apply_event(SimEvent::Tick { tick: 12 }).unwrap();
        state
            .apply_event(SimEvent::Verdict {
                channel: 2,
                value: "fail".to_owned(),
            })
            .unwrap();
        state
            .apply_event(SimEvent::Interp {
                value: "0110".to_owned(),
            })
            .unwrap();
        state.apply_event(SimEvent::Halted { halted: false }).unwrap();

        assert_eq!(state.tick(), 12);
        assert_eq!(state.verdict(2).unwrap(), "fail");
        assert_eq!(state.interp(), "0110");
        assert!(!state.halted());
        assert_eq!(state.history().len(), 4);
    }

    #[test]
    fn rejected_events_are_not_recorded() {
        let mut state = fresh_state();
        let result = state.apply_event(SimEvent::Input {
            channel: 99,
            value: "x".to_owned(),
        });
        assert!(result.is_err());
        assert!(state.history().is_empty());
    }

    #[test]
    fn editor_mirrors_replace_wholesale() {
        let mut state = fresh_state();
        let sample = Snapshot::sample();
        state.set_states(sample.states.clone());
        state.set_configuration(sample.configuration.clone());
        assert_eq!(state.states(), sample.states.as_slice());
        assert_eq!(state.configuration(), sample.configuration.as_slice());
    }

    #[test]
    fn set_speed_rejects_non_positive_values() {
        let mut state = fresh_state();
        assert_eq!(state.set_speed(3.0), Some(1.5));
        assert!(state.set_speed(0.0).is_none());
        assert!(state.set_speed(-2.0).is_none());
        assert!(state.set_speed(f64::NAN).is_none());
        assert!(state.set_speed(f64::INFINITY).is_none());
        // Rejections leave the current value untouched.
        assert_eq!(state.speed(), 3.0);
    }

    #[test]
    fn operator_flags_flip() {
        let mut state = fresh_state();
        state.set_mode(RunMode::Manual);
        state.set_halted(false);
        assert_eq!(state.mode(), RunMode::Manual);
        assert!(!state.halted());
    }

    #[test]
    fn detaching_the_transport_disconnects() {
        let mut state = fresh_state();
        let transport = crate::transport::RecordingTransport::new(true);
        state.attach_transport(Box::new(transport));
        assert!(state.is_connected());
        state.detach_transport();
        assert!(!state.is_connected());
    }

    #[test]
    fn reset_is_kept_until_cleared() {
        let mut state = fresh_state();
        state.set_reset(Snapshot::sample());
        assert!(state.reset().is_some());
        state.clear_reset();
        assert!(state.reset().is_none());
    }
}
