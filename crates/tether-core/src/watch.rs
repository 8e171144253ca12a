//! Synchronous single-subscriber change notification.
//!
//! A [`Watched`] field invokes its observer on every *distinct* write,
//! on the writing thread, before the write call returns. Re-assigning an
//! equal value does not notify. There is no async dispatch and no
//! queueing, so observer invocations are strictly ordered by mutation
//! order.

use std::fmt;

/// Equality used to decide whether a write is a distinct change.
///
/// Floats compare by bit pattern: the speed field must fire on any
/// different stored value and must never fire on re-assignment of the
/// same one, and `NaN != NaN` under IEEE comparison would break both
/// halves of that contract.
pub trait WatchValue {
    /// Whether `self` and `other` are the same stored value.
    fn same_as(&self, other: &Self) -> bool;
}

impl WatchValue for f64 {
    fn same_as(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

/// A value with an optional synchronous observer.
///
/// Single-subscriber: registering a new observer replaces the previous
/// one.
pub struct Watched<T> {
    value: T,
    observer: Option<Box<dyn FnMut(&T)>>,
}

impl<T: fmt::Debug> fmt::Debug for Watched<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watched")
            .field("value", &self.value)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl<T: WatchValue> Watched<T> {
    /// Wrap an initial value with no observer.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            observer: None,
        }
    }

    /// Borrow the current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Register the observer, replacing any previous one.
    ///
    /// The observer runs synchronously inside [`set`](Self::set), after
    /// the new value is stored.
    pub fn observe(&mut self, observer: impl FnMut(&T) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Store `value`, notifying the observer if it differs from the
    /// current value.
    pub fn set(&mut self, value: T) {
        let changed = !value.same_as(&self.value);
        self.value = value;
        if changed
            && let Some(observer) = self.observer.as_mut()
        {
            observer(&self.value);
        }
    }
}
