//! Condition variable.

use crate::error::Result;
use crate::sync::Mutex;
use crate::sys::platform;

/// A condition variable for blocking threads until notified.
///
/// Waiting requires a held [`Mutex`]: [`wait`](Self::wait) atomically
/// releases it, suspends the calling thread, and reacquires it before
/// returning. Nothing here suppresses spurious wakeups — callers always
/// re-check their condition in a loop:
///
/// ```rust,ignore
/// mutex.lock()?;
/// while !condition_holds() {
///     condvar.wait(&mutex)?;
/// }
/// // condition holds, mutex held
/// mutex.unlock()?;
/// ```
///
/// The order in which multiple waiters wake is scheduler-dependent; no
/// FIFO guarantee exists on either backend.
pub struct ConditionVariable {
    raw: platform::RawCondvar,
}

impl ConditionVariable {
    /// Creates a condition variable with no waiters.
    pub fn new() -> Result<Self> {
        Ok(Self {
            raw: platform::RawCondvar::new()?,
        })
    }

    /// Wakes at most one waiting thread.
    pub fn notify_one(&self) -> Result<()> {
        self.raw.notify_one()
    }

    /// Wakes all waiting threads.
    pub fn notify_all(&self) -> Result<()> {
        self.raw.notify_all()
    }

    /// Atomically releases `mutex` and suspends the calling thread; the
    /// mutex is held again when this returns.
    ///
    /// The caller must hold `mutex`. This is a suspension point with no
    /// timeout; only a notify (or a spurious wakeup) releases it.
    pub fn wait(&self, mutex: &Mutex) -> Result<()> {
        self.raw.wait(mutex.raw_sys())
    }
}
