//! Raw pthread barrier.
//!
//! `pthread_barrier_wait` hands `PTHREAD_BARRIER_SERIAL_THREAD` to exactly
//! one of the released threads; that OS detail is normalized to a boolean
//! "serial" flag here. The barrier resets itself after each release and can
//! be reused.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

use crate::error::{OsError, Result};

pub(crate) struct RawBarrier {
    inner: Box<UnsafeCell<libc::pthread_barrier_t>>,
}

unsafe impl Send for RawBarrier {}
unsafe impl Sync for RawBarrier {}

impl RawBarrier {
    /// Creates a barrier for `count` participating threads.
    ///
    /// `count` must be non-zero; pthreads rejects zero with `EINVAL` and we
    /// let that surface.
    pub(crate) fn new(count: u32) -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(unsafe {
            MaybeUninit::<libc::pthread_barrier_t>::zeroed().assume_init()
        }));

        let rc = unsafe { libc::pthread_barrier_init(inner.get(), std::ptr::null(), count) };
        if rc != 0 {
            return Err(OsError::from_raw(rc));
        }

        Ok(Self { inner })
    }

    /// Blocks until `count` threads have arrived, then releases them all.
    ///
    /// Returns `true` for exactly one of the released threads.
    pub(crate) fn wait(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_barrier_wait(self.inner.get()) };
        match rc {
            0 => Ok(false),
            libc::PTHREAD_BARRIER_SERIAL_THREAD => Ok(true),
            _ => Err(OsError::from_raw(rc)),
        }
    }
}

impl Drop for RawBarrier {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_barrier_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_barrier_destroy failed: {rc}");
    }
}
