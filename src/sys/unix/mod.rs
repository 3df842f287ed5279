//! POSIX backend.
//!
//! Implements the raw primitive set over pthreads: error-checking robust
//! mutexes, recursive mutexes, `pthread_rwlock_t` readers-writer locks,
//! `pthread_spinlock_t` busy-wait locks (where the platform has them),
//! condition variables, barriers, semaphores, and `pthread_t` threads.
//!
//! Every native object lives behind `Box<UnsafeCell<..>>`: pthread objects
//! are not relocatable once initialized, so the heap cell pins them while
//! the owning wrapper stays movable.
//!
//! Apple platforms ship neither `pthread_barrier_t` nor anonymous `sem_t`;
//! there the barrier and semaphore are composed from the raw mutex and
//! condition variable instead, with the same contracts.

mod condvar;
mod mutex;
mod rwlock;
mod thread;

#[cfg(not(target_vendor = "apple"))]
mod barrier;

#[cfg(target_vendor = "apple")]
#[path = "barrier_fallback.rs"]
mod barrier;

#[cfg(not(target_vendor = "apple"))]
mod semaphore;

#[cfg(target_vendor = "apple")]
#[path = "semaphore_fallback.rs"]
mod semaphore;

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
mod spin;

pub(crate) use condvar::RawCondvar;
pub(crate) use mutex::{RawMutex, RawRecursiveMutex};
pub(crate) use rwlock::RawRwLock;
pub(crate) use semaphore::RawSemaphore;
pub(crate) use thread::{
    RawThread, current_id, sleep_for, sleep_until, yield_now,
};

pub(crate) use barrier::RawBarrier;

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub(crate) use spin::RawSpinLock;
