//! Counting semaphore for Apple platforms, where anonymous `sem_t` is
//! unimplemented (`sem_init` fails with `ENOSYS`).
//!
//! Composed from the raw mutex and condition variable: `acquire` waits
//! while the count is zero, `release` increments and signals one waiter.

use std::cell::UnsafeCell;

use super::condvar::RawCondvar;
use super::mutex::RawMutex;
use crate::error::Result;

pub(crate) struct RawSemaphore {
    lock: RawMutex,
    cond: RawCondvar,
    count: UnsafeCell<u64>,
}

unsafe impl Send for RawSemaphore {}
unsafe impl Sync for RawSemaphore {}

impl RawSemaphore {
    pub(crate) fn new(initial: u32) -> Result<Self> {
        Ok(Self {
            lock: RawMutex::new()?,
            cond: RawCondvar::new()?,
            count: UnsafeCell::new(u64::from(initial)),
        })
    }

    pub(crate) fn acquire(&self) -> Result<()> {
        self.lock.lock()?;

        // Safety: count is only touched while `lock` is held.
        while unsafe { *self.count.get() } == 0 {
            if let Err(e) = self.cond.wait(&self.lock) {
                let _ = self.lock.unlock();
                return Err(e);
            }
        }
        unsafe { *self.count.get() -= 1 };

        self.lock.unlock()
    }

    pub(crate) fn try_acquire(&self) -> Result<bool> {
        self.lock.lock()?;

        let acquired = unsafe {
            let count = self.count.get();
            if *count > 0 {
                *count -= 1;
                true
            } else {
                false
            }
        };

        self.lock.unlock()?;
        Ok(acquired)
    }

    pub(crate) fn release(&self) -> Result<()> {
        self.lock.lock()?;
        unsafe { *self.count.get() += 1 };
        let notified = self.cond.notify_one();
        self.lock.unlock()?;
        notified
    }
}
