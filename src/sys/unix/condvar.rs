//! Raw pthread condition variable.

use std::cell::UnsafeCell;

use crate::error::{OsError, Result};
use super::mutex::RawMutex;

pub(crate) struct RawCondvar {
    inner: Box<UnsafeCell<libc::pthread_cond_t>>,
}

unsafe impl Send for RawCondvar {}
unsafe impl Sync for RawCondvar {}

impl RawCondvar {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(libc::PTHREAD_COND_INITIALIZER));

        let rc = unsafe { libc::pthread_cond_init(inner.get(), std::ptr::null()) };
        if rc != 0 {
            return Err(OsError::from_raw(rc));
        }

        Ok(Self { inner })
    }

    /// Wakes at most one waiter.
    pub(crate) fn notify_one(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_cond_signal(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    /// Wakes every current waiter.
    pub(crate) fn notify_all(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_cond_broadcast(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    /// Atomically releases `mutex`, suspends the calling thread, and
    /// reacquires `mutex` before returning.
    ///
    /// The caller must hold `mutex`. Spurious wakeups pass through; callers
    /// re-check their condition in a loop.
    pub(crate) fn wait(&self, mutex: &RawMutex) -> Result<()> {
        let rc = unsafe { libc::pthread_cond_wait(self.inner.get(), mutex.raw()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }
}

impl Drop for RawCondvar {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_cond_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_cond_destroy failed: {rc}");
    }
}
