//! Raw pthread readers-writer lock.
//!
//! The starvation policy maps onto the glibc kind attribute
//! (`pthread_rwlockattr_setkind_np`); other libcs have no equivalent knob
//! and the policy is accepted and ignored there, as it is on Win32 SRW
//! locks.

use std::cell::UnsafeCell;

use crate::error::{OsError, Result};
use crate::sync::Policy;

// glibc's <pthread.h> defines these as an anonymous enum; the libc crate does
// not re-export them for the gnu target, so mirror the fixed ABI values here.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
const PTHREAD_RWLOCK_PREFER_READER_NP: libc::c_int = 0;
#[cfg(all(target_os = "linux", target_env = "gnu"))]
const PTHREAD_RWLOCK_PREFER_WRITER_NP: libc::c_int = 1;
#[cfg(all(target_os = "linux", target_env = "gnu"))]
const PTHREAD_RWLOCK_PREFER_WRITER_NONRECURSIVE_NP: libc::c_int = 2;

pub(crate) struct RawRwLock {
    inner: Box<UnsafeCell<libc::pthread_rwlock_t>>,
}

unsafe impl Send for RawRwLock {}
unsafe impl Sync for RawRwLock {}

impl RawRwLock {
    pub(crate) fn new(policy: Policy) -> Result<Self> {
        let inner = Box::new(UnsafeCell::new(libc::PTHREAD_RWLOCK_INITIALIZER));

        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        unsafe {
            use std::mem::MaybeUninit;

            let kind = match policy {
                Policy::PreferReaders => PTHREAD_RWLOCK_PREFER_READER_NP,
                Policy::PreferWriters => PTHREAD_RWLOCK_PREFER_WRITER_NP,
                Policy::PreferWritersNonrecursive => {
                    PTHREAD_RWLOCK_PREFER_WRITER_NONRECURSIVE_NP
                }
            };

            let mut attr = MaybeUninit::<libc::pthread_rwlockattr_t>::uninit();
            let rc = libc::pthread_rwlockattr_init(attr.as_mut_ptr());
            if rc != 0 {
                return Err(OsError::from_raw(rc));
            }

            let rc = libc::pthread_rwlockattr_setkind_np(attr.as_mut_ptr(), kind);
            if rc == 0 {
                let rc = libc::pthread_rwlock_init(inner.get(), attr.as_ptr());
                libc::pthread_rwlockattr_destroy(attr.as_mut_ptr());
                if rc != 0 {
                    return Err(OsError::from_raw(rc));
                }
            } else {
                libc::pthread_rwlockattr_destroy(attr.as_mut_ptr());
                return Err(OsError::from_raw(rc));
            }
        }

        #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
        unsafe {
            // No kind attribute outside glibc; the built-in policy applies.
            let _ = policy;
            let rc = libc::pthread_rwlock_init(inner.get(), std::ptr::null());
            if rc != 0 {
                return Err(OsError::from_raw(rc));
            }
        }

        Ok(Self { inner })
    }

    /// Blocks until exclusive (writer) ownership is acquired.
    pub(crate) fn lock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_rwlock_wrlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    pub(crate) fn try_lock(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_rwlock_trywrlock(self.inner.get()) };
        match rc {
            0 => Ok(true),
            libc::EBUSY => Ok(false),
            _ => Err(OsError::from_raw(rc)),
        }
    }

    /// Blocks until shared (reader) ownership is acquired.
    pub(crate) fn lock_shared(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_rwlock_rdlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    pub(crate) fn try_lock_shared(&self) -> Result<bool> {
        let rc = unsafe { libc::pthread_rwlock_tryrdlock(self.inner.get()) };
        match rc {
            0 => Ok(true),
            libc::EBUSY | libc::EAGAIN => Ok(false),
            _ => Err(OsError::from_raw(rc)),
        }
    }

    /// Releases either kind of ownership; pthreads uses one unlock entry
    /// point for both.
    pub(crate) fn unlock(&self) -> Result<()> {
        let rc = unsafe { libc::pthread_rwlock_unlock(self.inner.get()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    pub(crate) fn unlock_shared(&self) -> Result<()> {
        self.unlock()
    }
}

impl Drop for RawRwLock {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_rwlock_destroy(self.inner.get()) };
        debug_assert_eq!(rc, 0, "pthread_rwlock_destroy failed: {rc}");
    }
}
