//! The lock capability trait and the scope-bound guard.

use crate::error::Result;

/// The exclusive-lock capability: anything that can be locked, attempted,
/// and unlocked.
///
/// Implemented by [`Mutex`](crate::sync::Mutex),
/// [`RecursiveMutex`](crate::sync::RecursiveMutex),
/// [`SharedMutex`](crate::sync::SharedMutex) (its writer side),
/// [`ConditionMutex`](crate::sync::ConditionMutex), and `SpinLock` where it
/// exists. [`LockGuard`] and [`Guarded`](crate::sync::Guarded) are generic
/// over this trait.
pub trait RawLock {
    /// Blocks until exclusive ownership is acquired.
    fn lock(&self) -> Result<()>;

    /// Attempts to acquire without blocking; `Ok(false)` means the lock is
    /// held elsewhere.
    fn try_lock(&self) -> Result<bool>;

    /// Releases ownership. Fails if the calling thread does not hold the
    /// lock, on backends able to detect that.
    fn unlock(&self) -> Result<()>;
}

/// Scope-bound acquisition of any [`RawLock`].
///
/// Construction locks; drop unlocks, unconditionally. The guard borrows the
/// lock, so it cannot outlive it, and it is deliberately neither `Clone`
/// nor `Copy` — one guard, one ownership.
///
/// The wrapped lock stays reachable through [`lock`](LockGuard::lock) so a
/// condition-variable wait can be composed with a held guard.
pub struct LockGuard<'a, L: RawLock> {
    lock: &'a L,

    /// Lock ownership belongs to the acquiring thread; the guard must be
    /// dropped where it was created, so it is not `Send`.
    _not_send: std::marker::PhantomData<*const ()>,
}

impl<'a, L: RawLock> LockGuard<'a, L> {
    /// Acquires `lock` and ties the ownership to the guard's scope.
    pub fn new(lock: &'a L) -> Result<Self> {
        lock.lock()?;
        Ok(Self {
            lock,
            _not_send: std::marker::PhantomData,
        })
    }

    /// The lock this guard holds.
    pub fn lock(&self) -> &'a L {
        self.lock
    }
}

impl<'a, L: RawLock> Drop for LockGuard<'a, L> {
    fn drop(&mut self) {
        // The unlock of a held lock only fails on backends that detect
        // misuse, and a live guard is proof of ownership.
        let _ = self.lock.unlock();
    }
}
