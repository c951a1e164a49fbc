//! Pending values.
//!
//! A [`Pending`] is the single-threaded stand-in for an asynchronous result.
//! It settles at most once; every clone observes the same state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;

/// The settlement state of a [`Pending`] value.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingState {
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

/// A shared settle-once cell.
#[derive(Clone)]
pub struct Pending {
    state: Rc<RefCell<PendingState>>,
}

impl Pending {
    /// Creates an unsettled value.
    pub fn new() -> Self {
        Self::with_state(PendingState::Pending)
    }

    /// Creates a value that is already fulfilled.
    pub fn fulfilled(value: impl Into<Value>) -> Self {
        Self::with_state(PendingState::Fulfilled(value.into()))
    }

    /// Creates a value that is already rejected.
    pub fn rejected(reason: impl Into<Value>) -> Self {
        Self::with_state(PendingState::Rejected(reason.into()))
    }

    fn with_state(state: PendingState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Fulfills the value. Returns false if it had already settled.
    pub fn resolve(&self, value: impl Into<Value>) -> bool {
        self.settle(PendingState::Fulfilled(value.into()))
    }

    /// Rejects the value. Returns false if it had already settled.
    pub fn reject(&self, reason: impl Into<Value>) -> bool {
        self.settle(PendingState::Rejected(reason.into()))
    }

    fn settle(&self, next: PendingState) -> bool {
        let mut state = self.state.borrow_mut();
        if !matches!(*state, PendingState::Pending) {
            return false;
        }
        *state = next;
        true
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> PendingState {
        self.state.borrow().clone()
    }

    pub fn is_settled(&self) -> bool {
        !matches!(*self.state.borrow(), PendingState::Pending)
    }

    /// Returns true if both handles share the same cell.
    pub fn ptr_eq(&self, other: &Pending) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for Pending {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pending").field(&*self.state.borrow()).finish()
    }
}
