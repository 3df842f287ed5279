//! Lock-enforced access to protected data.

use std::cell::UnsafeCell;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::sync::{Mutex, RawLock};

/// A value that can only be reached while its lock is held.
///
/// `Guarded<T, L>` owns both the value and the lock protecting it; the
/// only access path is [`lock`](Self::lock) (or
/// [`try_lock`](Self::try_lock)), which returns a [`GuardedGuard`] whose
/// lifetime bounds every reference to the value. What would otherwise be a
/// documentation convention — "field x is protected by mutex m" — becomes
/// something the borrow checker enforces.
///
/// The lock kind is generic over [`RawLock`] and defaults to [`Mutex`].
///
/// ```rust,ignore
/// let counter = Guarded::new(0u64)?;
/// {
///     let mut slot = counter.lock()?;
///     *slot += 1;
/// } // guard dropped, lock released
/// ```
pub struct Guarded<T, L: RawLock = Mutex> {
    lock: L,
    value: UnsafeCell<T>,
}

// Safety: the value is only reachable through a guard, and a guard exists
// only while the lock is held, so all access is serialized.
unsafe impl<T: Send, L: RawLock + Send> Send for Guarded<T, L> {}
unsafe impl<T: Send, L: RawLock + Sync> Sync for Guarded<T, L> {}

impl<T> Guarded<T, Mutex> {
    /// Wraps `value` behind a fresh [`Mutex`].
    pub fn new(value: T) -> Result<Self> {
        Ok(Self {
            lock: Mutex::new()?,
            value: UnsafeCell::new(value),
        })
    }
}

impl<T, L: RawLock> Guarded<T, L> {
    /// Wraps `value` behind the given lock.
    ///
    /// The lock must be unlocked; it is owned by the wrapper from here on.
    pub fn with_lock(lock: L, value: T) -> Self {
        Self {
            lock,
            value: UnsafeCell::new(value),
        }
    }

    /// Acquires the lock and returns scoped access to the value.
    pub fn lock(&self) -> Result<GuardedGuard<'_, T, L>> {
        self.lock.lock()?;
        Ok(GuardedGuard {
            owner: self,
            _not_send: PhantomData,
        })
    }

    /// Attempts to acquire without blocking; `Ok(None)` means the lock is
    /// held elsewhere.
    pub fn try_lock(&self) -> Result<Option<GuardedGuard<'_, T, L>>> {
        if self.lock.try_lock()? {
            Ok(Some(GuardedGuard {
                owner: self,
                _not_send: PhantomData,
            }))
        } else {
            Ok(None)
        }
    }

    /// Consumes the wrapper and returns the value.
    ///
    /// Takes `self` by value, so no lock is needed: exclusive ownership
    /// proves nobody else can be holding a guard.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Mutable access without locking, through an exclusive borrow of the
    /// wrapper itself — same proof of exclusivity as
    /// [`into_inner`](Self::into_inner).
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

/// Scoped access to the value inside a [`Guarded`].
///
/// Dereferences to the protected value; dropping it releases the lock.
pub struct GuardedGuard<'a, T, L: RawLock> {
    owner: &'a Guarded<T, L>,

    /// Lock ownership belongs to the acquiring thread; the guard must be
    /// dropped where it was created, so it is not `Send`.
    _not_send: PhantomData<*const ()>,
}

impl<'a, T, L: RawLock> Deref for GuardedGuard<'a, T, L> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the guard exists, therefore the lock is held.
        unsafe { &*self.owner.value.get() }
    }
}

impl<'a, T, L: RawLock> DerefMut for GuardedGuard<'a, T, L> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the guard exists, therefore the lock is held exclusively.
        unsafe { &mut *self.owner.value.get() }
    }
}

impl<'a, T, L: RawLock> Drop for GuardedGuard<'a, T, L> {
    fn drop(&mut self) {
        let _ = self.owner.lock.unlock();
    }
}

impl<'a, T: fmt::Debug, L: RawLock> fmt::Debug for GuardedGuard<'a, T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
