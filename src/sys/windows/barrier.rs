//! Raw Win32 barrier over `SYNCHRONIZATION_BARRIER`.
//!
//! `EnterSynchronizationBarrier` returns nonzero to the last thread that
//! arrives; that is the normalized "serial" indication. The barrier resets
//! itself for the next generation.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

use windows_sys::Win32::System::Threading::{
    DeleteSynchronizationBarrier, EnterSynchronizationBarrier, InitializeSynchronizationBarrier,
    SYNCHRONIZATION_BARRIER,
};

use crate::error::{ErrorKind, OsError, Result};

pub(crate) struct RawBarrier {
    inner: Box<UnsafeCell<SYNCHRONIZATION_BARRIER>>,
}

unsafe impl Send for RawBarrier {}
unsafe impl Sync for RawBarrier {}

impl RawBarrier {
    pub(crate) fn new(count: u32) -> Result<Self> {
        if count == 0 || count > i32::MAX as u32 {
            return Err(OsError::new(ErrorKind::InvalidArgument));
        }

        let inner = Box::new(UnsafeCell::new(unsafe {
            MaybeUninit::<SYNCHRONIZATION_BARRIER>::zeroed().assume_init()
        }));

        let ok =
            unsafe { InitializeSynchronizationBarrier(inner.get(), count as i32, -1) };
        if ok == 0 {
            return Err(OsError::last_os_error());
        }

        Ok(Self { inner })
    }

    /// Blocks until `count` threads have arrived; returns `true` for the
    /// serial thread.
    pub(crate) fn wait(&self) -> Result<bool> {
        let serial = unsafe { EnterSynchronizationBarrier(self.inner.get(), 0) };
        Ok(serial != 0)
    }
}

impl Drop for RawBarrier {
    fn drop(&mut self) {
        unsafe { DeleteSynchronizationBarrier(self.inner.get()) };
    }
}
