//! Monitor: a mutex and condition variable joined into one primitive.

use crate::error::Result;
use crate::sync::{ConditionVariable, Mutex, RawLock};

/// A mutex whose every unlock broadcasts to all waiters, plus
/// predicate-based waiting.
///
/// The monitor owns a private [`Mutex`] and [`ConditionVariable`] with
/// conjoined lifetimes. `lock` and `try_lock` behave exactly as on the
/// inner mutex; [`unlock`](Self::unlock) first wakes **all** waiters and
/// then releases. Broadcasting unconditionally — whether or not guarded
/// state changed — trades wakeups for the guarantee that no state change
/// can ever be missed; waiters re-check their predicate on every wakeup,
/// so the extra wakeups cost time, never correctness.
pub struct ConditionMutex {
    mutex: Mutex,
    cond: ConditionVariable,
}

impl ConditionMutex {
    /// Creates a new, unlocked monitor.
    pub fn new() -> Result<Self> {
        Ok(Self {
            mutex: Mutex::new()?,
            cond: ConditionVariable::new()?,
        })
    }

    /// Blocks until exclusive ownership is acquired.
    pub fn lock(&self) -> Result<()> {
        self.mutex.lock()
    }

    /// Attempts to acquire without blocking.
    pub fn try_lock(&self) -> Result<bool> {
        self.mutex.try_lock()
    }

    /// Wakes every waiter, then releases the lock.
    pub fn unlock(&self) -> Result<()> {
        self.cond.notify_all()?;
        self.mutex.unlock()
    }

    /// Blocks the calling thread, which must hold the lock, until
    /// `predicate` returns true.
    ///
    /// Still holds the lock when it returns. The predicate is evaluated
    /// under the lock, so it may freely read the guarded state.
    pub fn wait_until(&self, mut predicate: impl FnMut() -> bool) -> Result<()> {
        while !predicate() {
            self.cond.notify_all()?;
            self.cond.wait(&self.mutex)?;
        }
        Ok(())
    }

    /// Acquires the lock, then blocks until `predicate` returns true.
    ///
    /// Equivalent to `lock()` followed by
    /// [`wait_until`](Self::wait_until); the lock is held when this
    /// returns.
    pub fn lock_when(&self, predicate: impl FnMut() -> bool) -> Result<()> {
        self.lock()?;
        match self.wait_until(predicate) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = self.mutex.unlock();
                Err(e)
            }
        }
    }
}

impl RawLock for ConditionMutex {
    fn lock(&self) -> Result<()> {
        ConditionMutex::lock(self)
    }

    fn try_lock(&self) -> Result<bool> {
        ConditionMutex::try_lock(self)
    }

    fn unlock(&self) -> Result<()> {
        ConditionMutex::unlock(self)
    }
}
