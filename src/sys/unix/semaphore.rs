//! Raw POSIX counting semaphore (anonymous `sem_t`).
//!
//! `sem_wait` is one of the few calls here that can be interrupted by a
//! signal; each `EINTR` is retried internally so callers never observe a
//! spurious failure from an unrelated signal.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

use crate::error::{OsError, Result};

fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

pub(crate) struct RawSemaphore {
    inner: Box<UnsafeCell<libc::sem_t>>,
}

unsafe impl Send for RawSemaphore {}
unsafe impl Sync for RawSemaphore {}

impl RawSemaphore {
    /// Creates a process-private semaphore with the given initial count.
    pub(crate) fn new(initial: u32) -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(unsafe {
            MaybeUninit::<libc::sem_t>::zeroed().assume_init()
        }));

        let rc = unsafe { libc::sem_init(inner.get(), 0, initial) };
        if rc != 0 {
            return Err(OsError::from_raw(last_errno()));
        }

        Ok(Self { inner })
    }

    /// Blocks while the count is zero, then decrements it.
    pub(crate) fn acquire(&self) -> Result<()> {
        loop {
            let rc = unsafe { libc::sem_wait(self.inner.get()) };
            if rc == 0 {
                return Ok(());
            }
            let errno = last_errno();
            if errno == libc::EINTR {
                continue;
            }
            return Err(OsError::from_raw(errno));
        }
    }

    /// Decrements the count without blocking; `Ok(false)` if it was zero.
    pub(crate) fn try_acquire(&self) -> Result<bool> {
        let rc = unsafe { libc::sem_trywait(self.inner.get()) };
        if rc == 0 {
            return Ok(true);
        }
        let errno = last_errno();
        match errno {
            libc::EAGAIN => Ok(false),
            libc::EINTR => Ok(false),
            _ => Err(OsError::from_raw(errno)),
        }
    }

    /// Increments the count, waking one blocked acquirer if any.
    pub(crate) fn release(&self) -> Result<()> {
        let rc = unsafe { libc::sem_post(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(last_errno()))
        }
    }
}

impl Drop for RawSemaphore {
    fn drop(&mut self) {
        let rc = unsafe { libc::sem_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "sem_destroy failed");
    }
}
