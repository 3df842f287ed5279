//! Busy-wait lock.

use crate::error::Result;
use crate::sync::RawLock;
use crate::sys::platform;

/// A busy-wait mutual-exclusion lock.
///
/// Contention is resolved by spinning, never by suspending the thread, so
/// this is only worth using for critical sections short enough that a
/// context switch would cost more than the spin.
///
/// This type only exists on platforms with native spinlock support; there
/// is none on Windows or Apple targets, and code that needs to build there
/// should use [`Mutex`](crate::sync::Mutex) instead.
pub struct SpinLock {
    raw: platform::RawSpinLock,
}

impl SpinLock {
    /// Creates a new, unlocked spinlock.
    pub fn new() -> Result<Self> {
        Ok(Self {
            raw: platform::RawSpinLock::new()?,
        })
    }

    /// Spins until the lock is acquired.
    pub fn lock(&self) -> Result<()> {
        self.raw.lock()
    }

    /// Attempts to acquire without spinning.
    pub fn try_lock(&self) -> Result<bool> {
        self.raw.try_lock()
    }

    /// Releases the lock.
    pub fn unlock(&self) -> Result<()> {
        self.raw.unlock()
    }
}

impl RawLock for SpinLock {
    fn lock(&self) -> Result<()> {
        SpinLock::lock(self)
    }

    fn try_lock(&self) -> Result<bool> {
        SpinLock::try_lock(self)
    }

    fn unlock(&self) -> Result<()> {
        SpinLock::unlock(self)
    }
}
