//! Counting semaphore.

use crate::error::Result;
use crate::sys::platform;

/// A counting semaphore.
///
/// [`acquire`](Self::acquire) blocks while the count is zero, then
/// decrements it; [`release`](Self::release) increments the count and
/// wakes one blocked acquirer. Which blocked thread wakes is unspecified.
///
/// On Windows the maximum count is bound to the initial count at
/// construction, so releasing beyond the initial count fails there; POSIX
/// semaphores have no such ceiling short of `SEM_VALUE_MAX`.
pub struct Semaphore {
    raw: platform::RawSemaphore,
}

impl Semaphore {
    /// Creates a semaphore holding `initial` permits.
    pub fn new(initial: u32) -> Result<Self> {
        Ok(Self {
            raw: platform::RawSemaphore::new(initial)?,
        })
    }

    /// Blocks until a permit is available, then takes it.
    ///
    /// Signal interruptions are retried internally; callers never see a
    /// spurious failure for a signal that was not meant for them.
    pub fn acquire(&self) -> Result<()> {
        self.raw.acquire()
    }

    /// Takes a permit if one is available, without blocking.
    pub fn try_acquire(&self) -> Result<bool> {
        self.raw.try_acquire()
    }

    /// Returns a permit, waking one blocked acquirer if any.
    pub fn release(&self) -> Result<()> {
        self.raw.release()
    }
}
