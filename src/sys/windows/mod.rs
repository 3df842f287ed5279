//! Win32 backend.
//!
//! Mirrors the POSIX backend and exposes identical item names and
//! semantics:
//! - `CRITICAL_SECTION` for the exclusive and recursive mutexes (with an
//!   owner word restoring the error-checking POSIX mutexes get natively),
//! - `SRWLOCK` for the readers-writer lock,
//! - `CONDITION_VARIABLE` + `SleepConditionVariableCS` for waiting,
//! - `SYNCHRONIZATION_BARRIER` for the barrier,
//! - a semaphore `HANDLE` from `CreateSemaphoreW`,
//! - `CreateThread` / `WaitForSingleObject` for the thread lifecycle.
//!
//! There is no native Win32 spinlock; `SpinLock` does not exist on this
//! backend and portable callers must not depend on it.

mod barrier;
mod condvar;
mod mutex;
mod rwlock;
mod semaphore;
mod thread;

pub(crate) use barrier::RawBarrier;
pub(crate) use condvar::RawCondvar;
pub(crate) use mutex::{RawMutex, RawRecursiveMutex};
pub(crate) use rwlock::RawRwLock;
pub(crate) use semaphore::RawSemaphore;
pub(crate) use thread::{
    RawThread, current_id, sleep_for, sleep_until, yield_now,
};
