//! Raw pthread spinlock.
//!
//! POSIX spinlocks are an optional feature; this module only exists on the
//! targets whose libc provides them. A missing `SpinLock` is a build error
//! for the caller, never a silent downgrade to a sleeping lock.

use std::cell::UnsafeCell;

use crate::error::{OsError, Result};

pub(crate) struct RawSpinLock {
    inner: Box<UnsafeCell<libc::pthread_spinlock_t>>,
}

unsafe impl Send for RawSpinLock {}
unsafe impl Sync for RawSpinLock {}

impl RawSpinLock {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(0 as libc::pthread_spinlock_t));

        let rc = unsafe { libc::pthread_spin_init(inner.get(), libc::PTHREAD_PROCESS_PRIVATE) };
        if rc != 0 {
            return Err(OsError::from_raw(rc));
        }

        Ok(Self { inner })
    }

    /// Busy-waits until the lock is acquired. The calling thread is never
    /// suspended by the OS.
    pub(crate) fn lock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_spin_lock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_spin_trylock(self.inner.get()) };
        match rc {
            0 => Ok(true),
            libc::EBUSY => Ok(false),
            _ => Err(OsError::from_raw(rc)),
        }
    }

    pub(crate) fn unlock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_spin_unlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }
}

impl Drop for RawSpinLock {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_spin_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_spin_destroy failed: {rc}");
    }
}
