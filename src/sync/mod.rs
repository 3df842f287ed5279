//! Native synchronization primitives.
//!
//! Every type here wraps exactly one OS-level object from the selected
//! backend and blocks real OS threads; nothing in this module is
//! async-aware or cooperative.
//!
//! The primitives:
//! - [`Mutex`] — exclusive, error-checking, robust where the OS offers it.
//! - [`RecursiveMutex`] — same-thread reentrant.
//! - [`SharedMutex`] — readers-writer, with a [`Policy`] knob where the
//!   backend has one.
//! - `SpinLock` — busy-wait; only exists on platforms with native
//!   spinlocks.
//! - [`ConditionVariable`] — notify/wait over a held [`Mutex`].
//! - [`ConditionMutex`] — monitor with predicate waiting; every unlock
//!   broadcasts.
//! - [`Barrier`] — fixed-count rendezvous with one serial thread per
//!   generation.
//! - [`Semaphore`] — counting permits.
//! - [`RawLock`] + [`LockGuard`] — the lock capability and its scoped
//!   guard.
//! - [`Guarded`] — data reachable only while its lock is held.
//!
//! ## Blocking
//!
//! `lock`, `lock_shared`, `wait`, `wait_until`, `Barrier::wait`, and
//! `acquire` may suspend the calling thread indefinitely; none of them
//! take a timeout, and no primitive supports cancelling a blocked call
//! from outside. The `try_` variants never block.

mod barrier;
mod condvar;
mod guard;
mod guarded;
mod monitor;
mod mutex;
mod recursive;
mod semaphore;
mod shared;

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
mod spin;

pub use barrier::{Barrier, BarrierWaitResult};
pub use condvar::ConditionVariable;
pub use guard::{LockGuard, RawLock};
pub use guarded::{Guarded, GuardedGuard};
pub use monitor::ConditionMutex;
pub use mutex::Mutex;
pub use recursive::RecursiveMutex;
pub use semaphore::Semaphore;
pub use shared::{Policy, SharedMutex};

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub use spin::SpinLock;
