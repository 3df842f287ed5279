//! Raw pthread mutexes: error-checking (robust where available) and
//! recursive.
//!
//! Both types configure an explicit mutex kind through
//! `pthread_mutexattr_settype` rather than relying on the platform default,
//! which is allowed to be any kind:
//! - [`RawMutex`] uses `PTHREAD_MUTEX_ERRORCHECK`, so a re-lock by the
//!   holding thread reports `EDEADLK` and an unlock by a non-owner reports
//!   `EPERM` instead of being undefined.
//! - [`RawRecursiveMutex`] uses `PTHREAD_MUTEX_RECURSIVE`.
//!
//! On Linux and Android the error-checking mutex is additionally marked
//! *robust*: if the holding thread dies, the next `lock` returns
//! `EOWNERDEAD` rather than blocking forever.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

use crate::error::{OsError, Result};

/// Initializes a `pthread_mutexattr_t`, applies `configure`, initializes the
/// mutex cell with it, and destroys the attribute again.
fn init_with_attr(
    mutex: *mut libc::pthread_mutex_t,
    configure: impl FnOnce(*mut libc::pthread_mutexattr_t) -> i32,
) -> Result<()> {
    unsafe {
        let mut attr = MaybeUninit::<libc::pthread_mutexattr_t>::uninit();
        let rc = libc::pthread_mutexattr_init(attr.as_mut_ptr());
        if rc != 0 {
            return Err(OsError::from_raw(rc));
        }

        let rc = configure(attr.as_mut_ptr());
        if rc == 0 {
            let rc = libc::pthread_mutex_init(mutex, attr.as_ptr());
            libc::pthread_mutexattr_destroy(attr.as_mut_ptr());
            if rc != 0 {
                return Err(OsError::from_raw(rc));
            }
            Ok(())
        } else {
            libc::pthread_mutexattr_destroy(attr.as_mut_ptr());
            Err(OsError::from_raw(rc))
        }
    }
}

/// Error-checking, non-recursive pthread mutex.
///
/// The native object is heap-pinned; the wrapper is movable, the
/// `pthread_mutex_t` itself never moves after `pthread_mutex_init`.
pub(crate) struct RawMutex {
    inner: Box<UnsafeCell<libc::pthread_mutex_t>>,
}

unsafe impl Send for RawMutex {}
unsafe impl Sync for RawMutex {}

impl RawMutex {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));

        init_with_attr(inner.get(), |attr| unsafe {
            let rc = libc::pthread_mutexattr_settype(attr, libc::PTHREAD_MUTEX_ERRORCHECK);
            if rc != 0 {
                return rc;
            }

            // Robust mutexes report a dead owner instead of deadlocking.
            // Not available on Apple platforms.
            #[cfg(any(target_os = "linux", target_os = "android"))]
            {
                let rc = libc::pthread_mutexattr_setrobust(attr, libc::PTHREAD_MUTEX_ROBUST);
                if rc != 0 {
                    return rc;
                }
            }

            0
        })?;

        Ok(Self { inner })
    }

    /// Blocks until exclusive ownership is acquired.
    ///
    /// `EOWNERDEAD` surfaces as an error even though POSIX grants the
    /// caller ownership in that case; callers decide whether the protected
    /// state is salvageable.
    pub(crate) fn lock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_mutex_lock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    /// Attempts to acquire without blocking. `Ok(false)` means the lock is
    /// currently held elsewhere.
    pub(crate) fn try_lock(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_mutex_trylock(self.inner.get()) };
        match rc {
            0 => Ok(true),
            libc::EBUSY => Ok(false),
            _ => Err(OsError::from_raw(rc)),
        }
    }

    /// Releases the lock. Fails with `EPERM` if the caller is not the owner.
    pub(crate) fn unlock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_mutex_unlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    /// The native handle, for `pthread_cond_wait`.
    pub(crate) fn raw(&self) -> *mut libc::pthread_mutex_t {
        self.inner.get()
    }
}

impl Drop for RawMutex {
    fn drop(&mut self) {
        // Destroying a locked mutex is undefined; the contract requires the
        // mutex to be unlocked here.
        let rc = unsafe { libc::pthread_mutex_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_mutex_destroy failed: {rc}");
    }
}

/// Recursive pthread mutex: the owning thread may re-lock; each lock must
/// be matched by exactly one unlock.
pub(crate) struct RawRecursiveMutex {
    inner: Box<UnsafeCell<libc::pthread_mutex_t>>,
}

unsafe impl Send for RawRecursiveMutex {}
unsafe impl Sync for RawRecursiveMutex {}

impl RawRecursiveMutex {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));

        init_with_attr(inner.get(), |attr| unsafe {
            libc::pthread_mutexattr_settype(attr, libc::PTHREAD_MUTEX_RECURSIVE)
        })?;

        Ok(Self { inner })
    }

    pub(crate) fn lock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_mutex_lock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_mutex_trylock(self.inner.get()) };
        match rc {
            0 => Ok(true),
            libc::EBUSY => Ok(false),
            _ => Err(OsError::from_raw(rc)),
        }
    }

    pub(crate) fn unlock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_mutex_unlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }
}

impl Drop for RawRecursiveMutex {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_mutex_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_mutex_destroy failed: {rc}");
    }
}
