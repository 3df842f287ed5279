//! Raw pthread thread lifecycle: spawn, join, detach, identifiers, and the
//! sleep/yield calls.
//!
//! The closure handed to [`spawn`] crosses the FFI boundary as a double-boxed
//! `FnOnce`; the trampoline reclaims it on the new thread. A panic escaping
//! the closure aborts the process, mirroring what an uncaught error does to
//! a native thread.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use crate::error::{OsError, Result};
use crate::time::{Duration, Instant};

type ThreadBody = Box<dyn FnOnce() + Send + 'static>;

extern "C" fn thread_start(arg: *mut libc::c_void) -> *mut libc::c_void {
    // Safety: `arg` is the Box::into_raw of exactly one ThreadBody,
    // transferred by `spawn` and reclaimed exactly once here.
    let body = unsafe { Box::from_raw(arg as *mut ThreadBody) };
    if catch_unwind(AssertUnwindSafe(*body)).is_err() {
        // Unwinding may not cross the FFI boundary.
        std::process::abort();
    }
    ptr::null_mut()
}

/// A running (joinable) native thread.
pub(crate) struct RawThread {
    handle: libc::pthread_t,
}

impl RawThread {
    /// Launches a new OS thread executing `body`.
    pub(crate) fn spawn(body: ThreadBody) -> Result<Self> {
        let boxed = Box::new(body);
        let arg = Box::into_raw(boxed) as *mut libc::c_void;

        let mut handle: libc::pthread_t = unsafe { std::mem::zeroed() };
        let rc =
            unsafe { libc::pthread_create(&mut handle, ptr::null(), thread_start, arg) };

        if rc != 0 {
            // The thread never ran; reclaim the closure.
            drop(unsafe { Box::from_raw(arg as *mut ThreadBody) });
            return Err(OsError::from_raw(rc));
        }

        Ok(Self { handle })
    }

    /// The native identifier of this thread.
    pub(crate) fn id(&self) -> usize {
        self.handle as usize
    }

    /// Whether this handle refers to the calling thread. Joining it would
    /// deadlock; the caller checks before committing to `join`.
    pub(crate) fn is_current(&self) -> bool {
        unsafe { libc::pthread_equal(libc::pthread_self(), self.handle) != 0 }
    }

    /// Blocks the caller until the thread terminates.
    pub(crate) fn join(self) -> Result<()> {
        let rc = unsafe { libc::pthread_join(self.handle, ptr::null_mut()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }

    /// Releases ownership of the thread without waiting for it.
    pub(crate) fn detach(self) -> Result<()> {
        let rc = unsafe { libc::pthread_detach(self.handle) };
        if rc == 0 {
            Ok(())
        } else {
            Err(OsError::from_raw(rc))
        }
    }
}

/// The native identifier of the calling thread.
pub(crate) fn current_id() -> usize {
    unsafe { libc::pthread_self() as usize }
}

/// Suspends the calling thread for `duration`.
///
/// Degenerate spans (negative, NaN) return immediately; an infinite span
/// never returns. `nanosleep` reports how much of the span a signal cut
/// short, and the remainder is resubmitted.
pub(crate) fn sleep_for(duration: Duration) -> Result<()> {
    if duration.is_degenerate() {
        return Ok(());
    }

    // One day per nanosleep call keeps tv_sec well inside time_t on every
    // target; an unbounded sleep is just the loop that never stops.
    const CHUNK_SECS: i64 = 86_400;

    if duration.is_infinite() {
        loop {
            sleep_timespec(CHUNK_SECS, 0)?;
        }
    }

    let (mut secs, nanos) = duration
        .to_timespec_parts()
        .expect("finite positive span converts");
    while secs > CHUNK_SECS {
        sleep_timespec(CHUNK_SECS, 0)?;
        secs -= CHUNK_SECS;
    }
    sleep_timespec(secs, nanos)
}

fn sleep_timespec(mut secs: i64, mut nanos: i64) -> Result<()> {
    loop {
        let request = libc::timespec {
            tv_sec: secs as libc::time_t,
            tv_nsec: nanos as libc::c_long,
        };
        let mut remaining = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        let rc = unsafe { libc::nanosleep(&request, &mut remaining) };
        if rc == 0 {
            return Ok(());
        }

        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        if errno == libc::EINTR {
            secs = remaining.tv_sec as i64;
            nanos = remaining.tv_nsec as i64;
            continue;
        }
        return Err(OsError::from_raw(errno));
    }
}

/// Suspends the calling thread until `deadline` on the monotonic clock.
///
/// Early wakeups (signals, coarse timers) re-sleep for the remainder.
pub(crate) fn sleep_until(deadline: Instant) -> Result<()> {
    loop {
        let remaining = deadline.duration_since(Instant::now());
        if remaining.as_secs_f64() <= 0.0 {
            return Ok(());
        }
        sleep_for(remaining)?;
    }
}

/// Yields the processor to another runnable thread, if any.
pub(crate) fn yield_now() {
    unsafe { libc::sched_yield() };
}
