//! Readers-writer lock.

use crate::error::Result;
use crate::sync::RawLock;
use crate::sys::platform;

/// Starvation policy for a [`SharedMutex`].
///
/// Only backends with a native preference knob honor it (glibc via the
/// rwlock kind attribute); everywhere else — including Win32 SRW locks —
/// the single built-in policy applies and the parameter is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Favor readers; a stream of readers can starve writers. The usual
    /// platform default.
    #[default]
    PreferReaders,

    /// Favor waiting writers over new readers.
    PreferWriters,

    /// Favor writers, assuming no thread takes the read side recursively.
    /// The only glibc kind that actually prevents writer starvation.
    PreferWritersNonrecursive,
}

/// A shared/exclusive (readers-writer) lock.
///
/// At any instant either any number of threads hold shared ownership, or
/// exactly one thread holds exclusive ownership — never both. Lock and
/// unlock calls must be paired per mode: shared acquisitions release
/// through [`unlock_shared`](Self::unlock_shared), exclusive through
/// [`unlock`](Self::unlock).
pub struct SharedMutex {
    raw: platform::RawRwLock,
}

impl SharedMutex {
    /// Creates an unlocked lock with the platform-default policy.
    pub fn new() -> Result<Self> {
        Self::with_policy(Policy::default())
    }

    /// Creates an unlocked lock with the given starvation policy, where
    /// the backend supports one.
    pub fn with_policy(policy: Policy) -> Result<Self> {
        Ok(Self {
            raw: platform::RawRwLock::new(policy)?,
        })
    }

    /// Blocks until exclusive (writer) ownership is acquired.
    pub fn lock(&self) -> Result<()> {
        self.raw.lock()
    }

    /// Attempts exclusive acquisition without blocking.
    pub fn try_lock(&self) -> Result<bool> {
        self.raw.try_lock()
    }

    /// Releases exclusive ownership.
    pub fn unlock(&self) -> Result<()> {
        self.raw.unlock()
    }

    /// Blocks until shared (reader) ownership is acquired.
    pub fn lock_shared(&self) -> Result<()> {
        self.raw.lock_shared()
    }

    /// Attempts shared acquisition without blocking.
    pub fn try_lock_shared(&self) -> Result<bool> {
        self.raw.try_lock_shared()
    }

    /// Releases shared ownership.
    pub fn unlock_shared(&self) -> Result<()> {
        self.raw.unlock_shared()
    }
}

/// The writer side satisfies the exclusive-lock capability, so a
/// [`LockGuard`](crate::sync::LockGuard) over a `SharedMutex` holds it
/// exclusively.
impl RawLock for SharedMutex {
    fn lock(&self) -> Result<()> {
        SharedMutex::lock(self)
    }

    fn try_lock(&self) -> Result<bool> {
        SharedMutex::try_lock(self)
    }

    fn unlock(&self) -> Result<()> {
        SharedMutex::unlock(self)
    }
}
