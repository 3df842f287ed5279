//! Raw Win32 readers-writer lock over `SRWLOCK`.
//!
//! SRW locks have a single built-in fairness policy; the constructor
//! accepts the portable [`Policy`](crate::sync::Policy) and ignores it.
//! They also carry no owner bookkeeping, so a release by a non-owner is
//! undefined at the OS level and cannot be reported here.

use std::cell::UnsafeCell;

use windows_sys::Win32::System::Threading::{
    AcquireSRWLockExclusive, AcquireSRWLockShared, InitializeSRWLock, ReleaseSRWLockExclusive,
    ReleaseSRWLockShared, SRWLOCK, TryAcquireSRWLockExclusive, TryAcquireSRWLockShared,
};

use crate::error::Result;
use crate::sync::Policy;

pub(crate) struct RawRwLock {
    inner: Box<UnsafeCell<SRWLOCK>>,
}

unsafe impl Send for RawRwLock {}
unsafe impl Sync for RawRwLock {}

impl RawRwLock {
    pub(crate) fn new(policy: Policy) -> Result<Self> {
        // Single built-in policy on this backend.
        let _ = policy;

        let inner = Box::new(UnsafeCell::new(unsafe {
            std::mem::zeroed::<SRWLOCK>()
        }));
        unsafe { InitializeSRWLock(inner.get()) };

        Ok(Self { inner })
    }

    pub(crate) fn lock(&self) -> Result<()> {
        unsafe { AcquireSRWLockExclusive(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        Ok(unsafe { TryAcquireSRWLockExclusive(self.inner.get()) } != 0)
    }

    pub(crate) fn lock_shared(&self) -> Result<()> {
        unsafe { AcquireSRWLockShared(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn try_lock_shared(&self) -> Result<bool> {
        Ok(unsafe { TryAcquireSRWLockShared(self.inner.get()) } != 0)
    }

    pub(crate) fn unlock(&self) -> Result<()> {
        unsafe { ReleaseSRWLockExclusive(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn unlock_shared(&self) -> Result<()> {
        unsafe { ReleaseSRWLockShared(self.inner.get()) };
        Ok(())
    }
}

// SRW locks need no teardown call; there is nothing to report on drop.
