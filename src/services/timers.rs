// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cancelable deferred tasks.
//!
//! The browser build wraps `setTimeout`/`clearTimeout`; `ManualTimers` runs
//! tasks only when the caller advances its virtual time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::Result;

/// Deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

pub trait Timers {
    fn set_timeout(&self, delay: Duration, task: Task) -> Result<TimerHandle>;
    /// Cancel a pending task. Unknown or already-fired handles are ignored.
    fn clear_timeout(&self, handle: TimerHandle);
}

struct Scheduled {
    handle: TimerHandle,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: i32,
    pending: Vec<Scheduled>,
}

/// Virtual-time scheduler. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualTimers {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move virtual time forward and run every task that came due, in due order.
    pub fn advance(&self, by: Duration) {
        let due: Vec<Scheduled> = {
            let mut inner = self.inner.borrow_mut();
            inner.now += by;
            let now = inner.now;
            let (due, later): (Vec<_>, Vec<_>) =
                inner.pending.drain(..).partition(|s| s.due <= now);
            inner.pending = later;
            due
        };

        let mut due = due;
        due.sort_by_key(|s| s.due);
        for scheduled in due {
            tracing::trace!(handle = scheduled.handle.0, "Running deferred task");
            (scheduled.task)();
        }
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, delay: Duration, task: Task) -> Result<TimerHandle> {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let handle = TimerHandle(inner.next_id);
        let due = inner.now + delay;
        inner.pending.push(Scheduled { handle, due, task });
        Ok(handle)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|s| s.handle != handle);
    }
}
