//! Reentrant mutex.

use crate::error::Result;
use crate::sync::RawLock;
use crate::sys::platform;

/// A mutual-exclusion lock the owning thread may acquire repeatedly.
///
/// Each `lock` must be matched by exactly one `unlock`; the mutex becomes
/// free for other threads only once the count returns to zero. Threads
/// other than the owner exclude each other exactly as with
/// [`Mutex`](crate::sync::Mutex).
pub struct RecursiveMutex {
    raw: platform::RawRecursiveMutex,
}

impl RecursiveMutex {
    /// Creates a new, unlocked mutex.
    pub fn new() -> Result<Self> {
        Ok(Self {
            raw: platform::RawRecursiveMutex::new()?,
        })
    }

    /// Acquires the mutex, or deepens ownership if the caller already
    /// holds it.
    pub fn lock(&self) -> Result<()> {
        self.raw.lock()
    }

    /// Non-blocking variant of [`lock`](Self::lock); reentrant acquisition
    /// by the owner always succeeds.
    pub fn try_lock(&self) -> Result<bool> {
        self.raw.try_lock()
    }

    /// Releases one level of ownership.
    pub fn unlock(&self) -> Result<()> {
        self.raw.unlock()
    }
}

impl RawLock for RecursiveMutex {
    fn lock(&self) -> Result<()> {
        RecursiveMutex::lock(self)
    }

    fn try_lock(&self) -> Result<bool> {
        RecursiveMutex::try_lock(self)
    }

    fn unlock(&self) -> Result<()> {
        RecursiveMutex::unlock(self)
    }
}
