//! Raw Win32 thread lifecycle over `CreateThread`, `WaitForSingleObject`,
//! `Sleep`, and `SwitchToThread`.
//!
//! `Sleep` takes bounded milliseconds, so long and unbounded sleeps loop
//! over chunks. A panic escaping the thread body aborts the process, the
//! same policy as the POSIX backend.

use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use windows_sys::Win32::Foundation::{
    CloseHandle, HANDLE, WAIT_ABANDONED, WAIT_OBJECT_0,
};
use windows_sys::Win32::System::Threading::{
    CreateThread, GetCurrentThreadId, INFINITE, Sleep, SwitchToThread, WaitForSingleObject,
};

use crate::error::{ErrorKind, OsError, Result};
use crate::time::{Duration, Instant};

type ThreadBody = Box<dyn FnOnce() + Send + 'static>;

unsafe extern "system" fn thread_start(arg: *mut c_void) -> u32 {
    // Safety: `arg` is the Box::into_raw of exactly one ThreadBody,
    // transferred by `spawn` and reclaimed exactly once here.
    let body = unsafe { Box::from_raw(arg as *mut ThreadBody) };
    if catch_unwind(AssertUnwindSafe(*body)).is_err() {
        // Unwinding may not cross the FFI boundary.
        std::process::abort();
    }
    0
}

/// A running (joinable) native thread.
pub(crate) struct RawThread {
    handle: HANDLE,
    id: u32,
}

unsafe impl Send for RawThread {}

impl RawThread {
    /// Launches a new OS thread executing `body`.
    pub(crate) fn spawn(body: ThreadBody) -> Result<Self> {
        let boxed = Box::new(body);
        let arg = Box::into_raw(boxed) as *mut c_void;

        let mut id: u32 = 0;
        let handle =
            unsafe { CreateThread(ptr::null(), 0, Some(thread_start), arg, 0, &mut id) };

        if handle.is_null() {
            let err = OsError::last_os_error();
            // The thread never ran; reclaim the closure.
            drop(unsafe { Box::from_raw(arg as *mut ThreadBody) });
            return Err(err);
        }

        Ok(Self { handle, id })
    }

    /// The native identifier of this thread.
    pub(crate) fn id(&self) -> usize {
        self.id as usize
    }

    /// Whether this handle refers to the calling thread. Joining it would
    /// deadlock; the caller checks before committing to `join`.
    pub(crate) fn is_current(&self) -> bool {
        self.id == unsafe { GetCurrentThreadId() }
    }

    /// Blocks the caller until the thread terminates.
    pub(crate) fn join(self) -> Result<()> {
        let rc = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        let result = match rc {
            WAIT_OBJECT_0 => Ok(()),
            WAIT_ABANDONED => Err(OsError::with_code(
                ErrorKind::OwnerDead,
                WAIT_ABANDONED as i32,
            )),
            _ => Err(OsError::last_os_error()),
        };

        unsafe { CloseHandle(self.handle) };
        result
    }

    /// Releases ownership of the thread without waiting for it.
    pub(crate) fn detach(self) -> Result<()> {
        unsafe { CloseHandle(self.handle) };
        Ok(())
    }
}

/// The native identifier of the calling thread.
pub(crate) fn current_id() -> usize {
    unsafe { GetCurrentThreadId() as usize }
}

/// Suspends the calling thread for `duration`.
///
/// Degenerate spans (negative, NaN) return immediately; an infinite span
/// never returns. `Sleep` accepts at most `u32` milliseconds short of
/// `INFINITE`, so anything longer loops over bounded chunks.
pub(crate) fn sleep_for(duration: Duration) -> Result<()> {
    if duration.is_degenerate() {
        return Ok(());
    }

    const CHUNK_MS: u64 = (INFINITE - 1) as u64;

    if duration.is_infinite() {
        loop {
            unsafe { Sleep(CHUNK_MS as u32) };
        }
    }

    let mut remaining = duration.to_millis_saturating();
    while remaining > CHUNK_MS {
        unsafe { Sleep(CHUNK_MS as u32) };
        remaining -= CHUNK_MS;
    }
    unsafe { Sleep(remaining as u32) };

    Ok(())
}

/// Suspends the calling thread until `deadline` on the monotonic clock.
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
    unsafe { SwitchToThread() };
}
