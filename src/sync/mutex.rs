//! Exclusive, error-checking mutex.

use crate::error::Result;
use crate::sync::RawLock;
use crate::sys::platform;

/// An exclusive, non-recursive mutual-exclusion lock.
///
/// The native primitive is configured as *error-checking*: re-locking from
/// the holding thread and unlocking from a non-owner are reported as
/// errors, never undefined behavior. On platforms with robust mutexes
/// (Linux, Android) the death of a holder surfaces as
/// [`ErrorKind::OwnerDead`](crate::ErrorKind::OwnerDead) to the next
/// locker instead of a permanent deadlock.
///
/// Dropping a locked mutex is undefined at the OS level; callers keep the
/// unlock-before-drop discipline, typically via
/// [`LockGuard`](crate::sync::LockGuard) or
/// [`Guarded`](crate::sync::Guarded).
pub struct Mutex {
    raw: platform::RawMutex,
}

impl Mutex {
    /// Creates a new, unlocked mutex.
    pub fn new() -> Result<Self> {
        Ok(Self {
            raw: platform::RawMutex::new()?,
        })
    }

    /// Blocks until exclusive ownership is acquired.
    pub fn lock(&self) -> Result<()> {
        self.raw.lock()
    }

    /// Attempts to acquire without blocking; `Ok(false)` means the mutex is
    /// held elsewhere.
    pub fn try_lock(&self) -> Result<bool> {
        self.raw.try_lock()
    }

    /// Releases the mutex. Fails if the calling thread is not the owner.
    pub fn unlock(&self) -> Result<()> {
        self.raw.unlock()
    }

    /// The backend object, for the condition variable's wait call.
    pub(crate) fn raw_sys(&self) -> &platform::RawMutex {
        &self.raw
    }
}

impl RawLock for Mutex {
    fn lock(&self) -> Result<()> {
        Mutex::lock(self)
    }

    fn try_lock(&self) -> Result<bool> {
        Mutex::try_lock(self)
    }

    fn unlock(&self) -> Result<()> {
        Mutex::unlock(self)
    }
}
