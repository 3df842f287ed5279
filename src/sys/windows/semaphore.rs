//! Raw Win32 counting semaphore over a kernel semaphore `HANDLE`.
//!
//! The maximum count is bound to the initial count at creation, so a
//! `release` beyond the initial count fails rather than growing the
//! semaphore past its declared capacity. An abandoned wait — the holder
//! terminated without releasing — is surfaced as its own condition, not a
//! generic failure.

use std::ptr;

use windows_sys::Win32::Foundation::{
    CloseHandle, HANDLE, WAIT_ABANDONED, WAIT_OBJECT_0, WAIT_TIMEOUT,
};
use windows_sys::Win32::System::Threading::{
    CreateSemaphoreW, INFINITE, ReleaseSemaphore, WaitForSingleObject,
};

use crate::error::{ErrorKind, OsError, Result};

pub(crate) struct RawSemaphore {
    handle: HANDLE,
}

unsafe impl Send for RawSemaphore {}
unsafe impl Sync for RawSemaphore {}

impl RawSemaphore {
    pub(crate) fn new(initial: u32) -> Result<Self> {
        if initial > i32::MAX as u32 {
            return Err(OsError::new(ErrorKind::InvalidArgument));
        }

        let handle = unsafe {
            CreateSemaphoreW(
                ptr::null(),
                initial as i32,
                // Max count is bound to the initial count on this backend;
                // a zero-initial semaphore still needs capacity one or it
                // could never be released.
                (initial as i32).max(1),
                ptr::null(),
            )
        };

        if handle.is_null() {
            return Err(OsError::last_os_error());
        }

        Ok(Self { handle })
    }

    pub(crate) fn acquire(&self) -> Result<()> {
        match unsafe { WaitForSingleObject(self.handle, INFINITE) } {
            WAIT_OBJECT_0 => Ok(()),
            WAIT_ABANDONED => Err(OsError::with_code(
                ErrorKind::OwnerDead,
                WAIT_ABANDONED as i32,
            )),
            _ => Err(OsError::last_os_error()),
        }
    }

    pub(crate) fn try_acquire(&self) -> Result<bool> {
        match unsafe { WaitForSingleObject(self.handle, 0) } {
            WAIT_OBJECT_0 => Ok(true),
            WAIT_TIMEOUT => Ok(false),
            WAIT_ABANDONED => Err(OsError::with_code(
                ErrorKind::OwnerDead,
                WAIT_ABANDONED as i32,
            )),
            _ => Err(OsError::last_os_error()),
        }
    }

    pub(crate) fn release(&self) -> Result<()> {
        let ok = unsafe { ReleaseSemaphore(self.handle, 1, ptr::null_mut()) };
        if ok != 0 {
            Ok(())
        } else {
            Err(OsError::last_os_error())
        }
    }
}

impl Drop for RawSemaphore {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.handle) };
    }
}
