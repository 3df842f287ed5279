//! Raw Win32 mutexes over `CRITICAL_SECTION`.
//!
//! A `CRITICAL_SECTION` is natively reentrant, which would silently turn
//! the non-recursive mutex into a recursive one and make a non-owner
//! `LeaveCriticalSection` undefined. [`RawMutex`] therefore keeps the
//! owning thread id in an atomic word and delivers the same `EDEADLK` /
//! `EPERM`-class reporting the POSIX error-checking mutex provides.
//!
//! `InitializeCriticalSection` can raise an out-of-memory exception on
//! pre-Vista systems only; on supported systems it cannot fail, so
//! construction is infallible at the OS level and teardown reports nothing.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU32, Ordering};

use windows_sys::Win32::System::Threading::{
    CRITICAL_SECTION, DeleteCriticalSection, EnterCriticalSection, GetCurrentThreadId,
    InitializeCriticalSection, LeaveCriticalSection, TryEnterCriticalSection,
};

use crate::error::{ErrorKind, OsError, Result};

/// Error-checking, non-recursive mutex.
pub(crate) struct RawMutex {
    inner: Box<UnsafeCell<CRITICAL_SECTION>>,

    /// Thread id of the current owner, 0 when free. Written only by the
    /// thread that holds (or just acquired) the critical section.
    owner: AtomicU32,
}

unsafe impl Send for RawMutex {}
unsafe impl Sync for RawMutex {}

impl RawMutex {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(unsafe {
            MaybeUninit::<CRITICAL_SECTION>::zeroed().assume_init()
        }));

        unsafe { InitializeCriticalSection(inner.get()) };

        Ok(Self {
            inner,
            owner: AtomicU32::new(0),
        })
    }

    pub(crate) fn lock(&self) -> Result<()> {
        let current = unsafe { GetCurrentThreadId() };
        if self.owner.load(Ordering::Relaxed) == current {
            // Entering again would succeed reentrantly; the non-recursive
            // contract calls that a deadlock-class usage error.
            return Err(OsError::new(ErrorKind::WouldDeadlock));
        }

        unsafe { EnterCriticalSection(self.inner.get()) };
        self.owner.store(current, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        let current = unsafe { GetCurrentThreadId() };
        if self.owner.load(Ordering::Relaxed) == current {
            return Err(OsError::new(ErrorKind::WouldDeadlock));
        }

        if unsafe { TryEnterCriticalSection(self.inner.get()) } != 0 {
            self.owner.store(current, Ordering::Relaxed);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn unlock(&self) -> Result<()> {
        let current = unsafe { GetCurrentThreadId() };
        if self.owner.load(Ordering::Relaxed) != current {
            return Err(OsError::new(ErrorKind::NotOwner));
        }

        self.owner.store(0, Ordering::Relaxed);
        unsafe { LeaveCriticalSection(self.inner.get()) };
        Ok(())
    }

    /// The native handle, for `SleepConditionVariableCS`.
    pub(crate) fn raw(&self) -> *mut CRITICAL_SECTION {
        self.inner.get()
    }

    /// Reassert ownership after a condition wait reacquired the section on
    /// our behalf.
    pub(crate) fn note_reacquired(&self) {
        self.owner
            .store(unsafe { GetCurrentThreadId() }, Ordering::Relaxed);
    }

    /// Forget ownership just before a condition wait releases the section
    /// on our behalf.
    pub(crate) fn note_released(&self) {
        self.owner.store(0, Ordering::Relaxed);
    }
}

impl Drop for RawMutex {
    fn drop(&mut self) {
        unsafe { DeleteCriticalSection(self.inner.get()) };
    }
}

/// Recursive mutex; `CRITICAL_SECTION` is reentrant by construction, the
/// depth bookkeeping lives in the OS object.
pub(crate) struct RawRecursiveMutex {
    inner: Box<UnsafeCell<CRITICAL_SECTION>>,
}

unsafe impl Send for RawRecursiveMutex {}
unsafe impl Sync for RawRecursiveMutex {}

impl RawRecursiveMutex {
    pub(crate) fn new() -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(unsafe {
            MaybeUninit::<CRITICAL_SECTION>::zeroed().assume_init()
        }));

        unsafe { InitializeCriticalSection(inner.get()) };

        Ok(Self { inner })
    }

    pub(crate) fn lock(&self) -> Result<()> {
        unsafe { EnterCriticalSection(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        Ok(unsafe { TryEnterCriticalSection(self.inner.get()) } != 0)
    }

    pub(crate) fn unlock(&self) -> Result<()> {
        unsafe { LeaveCriticalSection(self.inner.get()) };
        Ok(())
    }
}

impl Drop for RawRecursiveMutex {
    fn drop(&mut self) {
        unsafe { DeleteCriticalSection(self.inner.get()) };
    }
}
