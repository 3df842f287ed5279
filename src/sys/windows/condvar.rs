//! Raw Win32 condition variable over `CONDITION_VARIABLE` +
//! `SleepConditionVariableCS`.

use std::cell::UnsafeCell;

use windows_sys::Win32::System::Threading::{
    CONDITION_VARIABLE, INFINITE, InitializeConditionVariable, SleepConditionVariableCS,
    WakeAllConditionVariable, WakeConditionVariable,
};

use super::mutex::RawMutex;
use crate::error::{OsError, Result};

pub(crate) struct RawCondvar {
    inner: Box<UnsafeCell<CONDITION_VARIABLE>>,
}

unsafe impl Send for RawCondvar {}
unsafe impl Sync for RawCondvar {}

impl RawCondvar {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(unsafe {
            std::mem::zeroed::<CONDITION_VARIABLE>()
        }));
        unsafe { InitializeConditionVariable(inner.get()) };

        Ok(Self { inner })
    }

    /// Wakes at most one waiter.
    pub(crate) fn notify_one(&self) -> Result<()> {
        unsafe { WakeConditionVariable(self.inner.get()) };
        Ok(())
    }

    /// Wakes every current waiter.
    pub(crate) fn notify_all(&self) -> Result<()> {
        unsafe { WakeAllConditionVariable(self.inner.get()) };
        Ok(())
    }

    /// Atomically releases `mutex`, suspends the calling thread, and
    /// reacquires `mutex` before returning.
    ///
    /// The caller must hold `mutex`. The owner word is cleared for the
    /// duration of the wait so another thread acquiring the section is
    /// seen as the owner it is.
    pub(crate) fn wait(&self, mutex: &RawMutex) -> Result<()> {
        mutex.note_released();
        let ok =
            unsafe { SleepConditionVariableCS(self.inner.get(), mutex.raw(), INFINITE) };
        mutex.note_reacquired();

        if ok != 0 {
            Ok(())
        } else {
            Err(OsError::last_os_error())
        }
    }
}

// Condition variables need no teardown call; there is nothing to report on
// drop.
