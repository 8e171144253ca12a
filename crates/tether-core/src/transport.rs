//! The opaque transport handle.
//!
//! The core only needs two things from whatever carries bytes to the
//! remote simulation: "is it open" and "send this text". Connection
//! management, retry, and reconnection are the transport collaborator's
//! responsibility and deliberately out of scope here.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Errors a transport can report on send.
///
/// The command channel absorbs these: a failed send means the command is
/// dropped, never queued or retried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport is not open.
    #[error("transport is not open")]
    Closed,

    /// The underlying carrier rejected the write.
    #[error("transport send failed: {reason}")]
    Send {
        /// Carrier-specific description of the failure.
        reason: String,
    },
}

/// An opaque handle to the connection with the remote simulation.
pub trait Transport {
    /// Whether the connection is currently open.
    fn is_open(&self) -> bool;

    /// Write one UTF-8 text frame.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the connection is closed or the
    /// write fails.
    fn send(&mut self, text: &str) -> Result<(), TransportError>;
}

/// A [`Transport`] double that records every sent frame.
///
/// Clones share the same open flag and sent-frame log, so a test can
/// keep one clone for inspection while the core owns the other.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    open: Rc<Cell<bool>>,
    sent: Rc<RefCell<Vec<String>>>,
}

impl RecordingTransport {
    /// Create a transport double, initially open or closed.
    pub fn new(open: bool) -> Self {
        Self {
            open: Rc::new(Cell::new(open)),
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Flip the open flag (shared across clones).
    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    /// Snapshot of every frame sent so far, in send order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn send(&mut self, text: &str) -> Result<(), TransportError> {
        if !self.open.get() {
            return Err(TransportError::Closed);
        }
        self.sent.borrow_mut().push(text.to_owned());
        Ok(())
    }
}
