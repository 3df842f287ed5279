//! # Fermata
//!
//! **Fermata** is the native synchronization layer for the **Nebula**
//! ecosystem: blocking, OS-thread-level primitives with one uniform API
//! over two structurally different backends — POSIX pthreads and Win32
//! synchronization objects — selected at compile time.
//!
//! Where Cadentis suspends *tasks*, Fermata suspends *threads*. It exists
//! for the places an async runtime cannot reach: FFI boundaries, worker
//! pools that must park on a kernel object, and code that needs the exact
//! semantics of the platform's own locks rather than a userspace
//! reimplementation of them.
//!
//! Fermata provides:
//!
//! - An **exclusive lock family**: error-checking [`sync::Mutex`] (robust
//!   where the OS supports it), [`sync::RecursiveMutex`],
//!   [`sync::SharedMutex`] with a reader/writer preference policy, and a
//!   busy-wait `SpinLock` on platforms that have one.
//! - **Waiting**: [`sync::ConditionVariable`], and
//!   [`sync::ConditionMutex`] — a monitor with predicate-based waiting.
//! - **Rendezvous**: [`sync::Barrier`] and [`sync::Semaphore`].
//! - **Scoped ownership**: [`sync::LockGuard`] over any lock, and
//!   [`sync::Guarded`] for data that can only be reached while its lock
//!   is held.
//! - **Threads**: [`thread::Thread`] with start/join/detach lifecycle,
//!   identifiers, sleeping, and yielding.
//!
//! Every fallible operation returns [`OsError`]; misuse the OS can detect
//! (double-lock, unlock by a non-owner, self-join) is reported as a named
//! condition rather than a generic failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fermata::sync::Guarded;
//! use fermata::thread::Thread;
//! use std::sync::Arc;
//!
//! let counter = Arc::new(Guarded::new(0u64)?);
//!
//! let mut worker = Thread::new();
//! let shared = Arc::clone(&counter);
//! worker.start(move || {
//!     let mut n = shared.lock().unwrap();
//!     *n += 1;
//! })?;
//!
//! worker.join()?;
//! assert_eq!(*counter.lock()?, 1);
//! ```
//!
//! ## Modules
//!
//! - [`sync`] — locks, condition variables, barrier, semaphore, guards
//! - [`thread`] — OS-thread lifecycle, sleep, yield
//! - [`time`] — the [`Duration`]/[`Instant`] values the sleep calls consume
//! - [`error`] — [`OsError`] and its [`ErrorKind`] classification
//!
//! ## Blocking semantics
//!
//! Every `lock`/`wait`/`acquire`/`join` here can suspend the calling
//! thread indefinitely; there are no timeouts and no cancellation. A
//! blocked thread is released only by the matching unlock, notify,
//! release, or barrier arrival from another thread.

mod sys;

pub mod error;
pub mod sync;
pub mod thread;
pub mod time;

#[doc(inline)]
pub use error::{ErrorKind, OsError, Result};

#[doc(inline)]
pub use time::{Duration, Instant};
