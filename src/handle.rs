//! Result cells and the caller-facing handles to them.

use crate::{PoolErrorKind, Result};
use std::mem;
use std::sync::{Arc, Condvar, Mutex};

enum SlotState<T> {
    Pending,
    Ready(Result<T>),
    Taken,
}

/// One-shot storage for a task's outcome, shared between the worker
/// that runs the task and the caller holding the handle. It carries
/// its own lock and condition variable so that polling never touches
/// the pool's queue lock.
struct ResultSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

/// The writing half of a result slot. Held by the task wrapper;
/// consumed by its single `fulfill` call, so a slot is written at
/// most once.
pub(crate) struct SlotWriter<T> {
    slot: Arc<ResultSlot<T>>,
}

impl<T> SlotWriter<T> {
    pub(crate) fn fulfill(self, outcome: Result<T>) {
        {
            let mut state = self.slot.state.lock().unwrap();
            *state = SlotState::Ready(outcome);
        }
        self.slot.ready.notify_all();
    }
}

/// Caller-facing accessor for one submitted task's eventual outcome.
///
/// A handle supports a non-blocking readiness check, a blocking wait,
/// and a one-time extraction of the value. [`TaskHandle::take`]
/// consumes the handle, so extracting twice does not compile.
pub struct TaskHandle<T> {
    slot: Arc<ResultSlot<T>>,
}

impl<T> TaskHandle<T> {
    /// Whether the task has finished. Never blocks; a `false` answer
    /// means the task is still queued or running.
    pub fn is_ready(&self) -> bool {
        match *self.slot.state.lock().unwrap() {
            SlotState::Pending => false,
            _ => true,
        }
    }

    /// Block the calling thread until the task has finished.
    pub fn wait(&self) {
        let mut state = self.slot.state.lock().unwrap();
        while let SlotState::Pending = *state {
            state = self.slot.ready.wait(state).unwrap();
        }
    }

    /// Block until the task has finished and extract its outcome: the
    /// value it returned, or the failure captured while running it.
    pub fn take(self) -> Result<T> {
        let mut state = self.slot.state.lock().unwrap();
        while let SlotState::Pending = *state {
            state = self.slot.ready.wait(state).unwrap();
        }
        match mem::replace(&mut *state, SlotState::Taken) {
            SlotState::Ready(outcome) => outcome,
            SlotState::Taken => Err(PoolErrorKind::ResultTaken.into()),
            SlotState::Pending => unreachable!(),
        }
    }
}

/// Create a connected writer/handle pair around a fresh slot.
pub(crate) fn slot_pair<T>() -> (SlotWriter<T>, TaskHandle<T>) {
    let slot = Arc::new(ResultSlot {
        state: Mutex::new(SlotState::Pending),
        ready: Condvar::new(),
    });

    let writer = SlotWriter {
        slot: Arc::clone(&slot),
    };
    (writer, TaskHandle { slot })
}
