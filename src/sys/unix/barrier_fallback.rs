//! Barrier for Apple platforms, which ship no `pthread_barrier_t`.
//!
//! Composed from the raw mutex and condition variable with a generation
//! counter: the last arriving thread of a generation bumps the generation,
//! resets the arrival count, and broadcasts; earlier arrivals wait until
//! the generation they arrived in has passed. The generation check is what
//! makes the barrier immediately reusable and immune to spurious wakeups.

use std::cell::UnsafeCell;

use super::condvar::RawCondvar;
use super::mutex::RawMutex;
use crate::error::{ErrorKind, OsError, Result};

struct State {
    /// Threads still expected in the current generation.
    remaining: u32,
    /// Completed release cycles.
    generation: u64,
}

pub(crate) struct RawBarrier {
    lock: RawMutex,
    cond: RawCondvar,
    count: u32,
    state: UnsafeCell<State>,
}

unsafe impl Send for RawBarrier {}
unsafe impl Sync for RawBarrier {}

impl RawBarrier {
    pub(crate) fn new(count: u32) -> Result<Self> {
        if count == 0 {
            return Err(OsError::new(ErrorKind::InvalidArgument));
        }

        Ok(Self {
            lock: RawMutex::new()?,
            cond: RawCondvar::new()?,
            count,
            state: UnsafeCell::new(State {
                remaining: count,
                generation: 0,
            }),
        })
    }

    /// Blocks until `count` threads have arrived; the last arrival is the
    /// serial thread and returns `true`.
    pub(crate) fn wait(&self) -> Result<bool> {
        self.lock.lock()?;

        // Safety: state is only touched while `lock` is held.
        let state = unsafe { &mut *self.state.get() };

        state.remaining -= 1;
        if state.remaining == 0 {
            state.generation += 1;
            state.remaining = self.count;
            let notified = self.cond.notify_all();
            self.lock.unlock()?;
            notified?;
            return Ok(true);
        }

        let arrival_generation = state.generation;
        while unsafe { &*self.state.get() }.generation == arrival_generation {
            if let Err(e) = self.cond.wait(&self.lock) {
                let _ = self.lock.unlock();
                return Err(e);
            }
        }

        self.lock.unlock()?;
        Ok(false)
    }
}
