//! OS-thread lifecycle.
//!
//! [`Thread`] is a reusable handle around one native thread at a time:
//!
//! ```text
//! Unstarted --start()--> Joinable --join()/detach()--> Unstarted
//! ```
//!
//! Dropping a handle that is still joinable is a programming error and
//! panics (outside of an already-unwinding thread, where it detaches
//! instead — see the `Drop` impl).
//!
//! The free-standing operations — [`Thread::current_id`],
//! [`Thread::sleep_for`], [`Thread::sleep_until`], [`Thread::yield_now`] —
//! act on the calling thread and need no handle.

use std::fmt;

use crate::error::{ErrorKind, OsError, Result};
use crate::sys::platform;
use crate::time::{Duration, Instant};

/// Identifier of a native thread.
///
/// A small, totally ordered value type; the default value means "no
/// thread" and compares unequal to every live thread's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id(usize);

impl Id {
    /// The "no thread" identifier.
    pub const NONE: Id = Id(0);

    /// Whether this id refers to an actual thread.
    pub fn is_some(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to at most one running OS thread.
pub struct Thread {
    inner: Option<platform::RawThread>,
    id: Id,
}

impl Thread {
    /// Creates an unstarted handle.
    pub fn new() -> Self {
        Self {
            inner: None,
            id: Id::NONE,
        }
    }

    /// Launches a new OS thread executing `body`.
    ///
    /// Fails with [`ErrorKind::OperationInProgress`] if a thread is
    /// already running under this handle; the running thread is
    /// unaffected.
    pub fn start<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.inner.is_some() {
            return Err(OsError::new(ErrorKind::OperationInProgress));
        }

        let raw = platform::RawThread::spawn(Box::new(body))?;
        self.id = Id(raw.id());
        self.inner = Some(raw);
        Ok(())
    }

    /// Blocks the caller until the thread terminates, then resets the
    /// handle to unstarted.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] if no thread is
    /// associated, and with [`ErrorKind::WouldDeadlock`] if a thread
    /// joins itself — in both cases the handle is left unchanged.
    pub fn join(&mut self) -> Result<()> {
        let Some(raw) = self.inner.take() else {
            return Err(OsError::new(ErrorKind::InvalidArgument));
        };

        if raw.is_current() {
            self.inner = Some(raw);
            return Err(OsError::new(ErrorKind::WouldDeadlock));
        }

        self.id = Id::NONE;
        raw.join()
    }

    /// Releases ownership of the running thread without waiting for it;
    /// the handle resets to unstarted and the thread runs to completion
    /// on its own.
    pub fn detach(&mut self) -> Result<()> {
        let Some(raw) = self.inner.take() else {
            return Err(OsError::new(ErrorKind::InvalidArgument));
        };

        self.id = Id::NONE;
        raw.detach()
    }

    /// Whether a thread is currently associated with this handle.
    pub fn joinable(&self) -> bool {
        self.inner.is_some()
    }

    /// The identifier of the associated thread, or [`Id::NONE`].
    pub fn id(&self) -> Id {
        self.id
    }

    /// The identifier of the calling thread.
    pub fn current_id() -> Id {
        Id(platform::current_id())
    }

    /// Suspends the calling thread for `duration`.
    ///
    /// Negative and NaN durations return immediately; an infinite
    /// duration never returns. On platforms whose native sleep call only
    /// accepts a bounded range, long sleeps loop over chunks.
    pub fn sleep_for(duration: Duration) -> Result<()> {
        platform::sleep_for(duration)
    }

    /// Suspends the calling thread until `deadline` on the monotonic
    /// clock; returns immediately if the deadline has passed.
    pub fn sleep_until(deadline: Instant) -> Result<()> {
        platform::sleep_until(deadline)
    }

    /// Offers the processor to another runnable thread, if any.
    pub fn yield_now() {
        platform::yield_now()
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Thread {
    /// A joinable thread being dropped means the program lost track of a
    /// running thread: report it. During a panic the thread is detached
    /// instead, because a second panic would abort without a usable
    /// message.
    fn drop(&mut self) {
        if let Some(raw) = self.inner.take() {
            if std::thread::panicking() {
                let _ = raw.detach();
            } else {
                panic!("Thread dropped while joinable; join() or detach() it first");
            }
        }
    }
}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.id)
            .field("joinable", &self.joinable())
            .finish()
    }
}
