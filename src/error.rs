//! Portable error reporting for native synchronization primitives.
//!
//! Every fallible operation in this crate returns [`OsError`], which pairs a
//! stable, platform-independent [`ErrorKind`] with the raw OS error code the
//! native call produced. Usage errors detected before reaching the OS (for
//! example starting a thread that is already running) carry a code of zero.
//!
//! The classification is intentionally small: callers match on [`ErrorKind`]
//! and treat the raw code as diagnostic detail.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OsError>;

/// Stable classification of a native failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The previous owner of a robust mutex or Win32 wait object terminated
    /// while holding it.
    #[error("previous owner died while holding the primitive")]
    OwnerDead,

    /// A robust mutex was left inconsistent and can no longer be acquired.
    #[error("primitive state is not recoverable")]
    NotRecoverable,

    /// The operation would deadlock the calling thread, such as re-locking
    /// a held error-checking mutex or joining the current thread.
    #[error("operation would deadlock the calling thread")]
    WouldDeadlock,

    /// The calling thread does not own the lock it tried to release.
    #[error("calling thread does not own the lock")]
    NotOwner,

    /// A thread is already running under this handle.
    #[error("operation already in progress")]
    OperationInProgress,

    /// The handle is not in a state that permits the operation, such as
    /// joining a thread that was never started.
    #[error("invalid argument for the current state")]
    InvalidArgument,

    /// The OS could not allocate the native primitive.
    #[error("insufficient resources to allocate the primitive")]
    OutOfMemory,

    /// The operation is not supported by this platform or configuration.
    #[error("operation not supported on this platform")]
    Unsupported,

    /// Any other native failure; inspect the raw code.
    #[error("native call failed")]
    Other,
}

/// A native OS error, classified.
///
/// Wraps the raw platform error code (`errno` on POSIX, `GetLastError` /
/// returned `errno`-style codes on Windows) together with its portable
/// classification. A code of `0` marks a usage error detected by this crate
/// before any native call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}{}", fmt_code(.code))]
pub struct OsError {
    kind: ErrorKind,
    code: i32,
}

fn fmt_code(code: &i32) -> String {
    if *code == 0 {
        String::new()
    } else {
        format!(" (os error {code})")
    }
}

impl OsError {
    /// Creates a usage error with no underlying OS code.
    pub(crate) const fn new(kind: ErrorKind) -> Self {
        Self { kind, code: 0 }
    }

    /// Creates an error carrying a raw OS code under an explicit kind.
    ///
    /// Used where the call site knows more than the code alone conveys,
    /// such as a Win32 abandoned wait.
    #[cfg(windows)]
    pub(crate) const fn with_code(kind: ErrorKind, code: i32) -> Self {
        Self { kind, code }
    }

    /// Classifies a raw POSIX `errno` value.
    #[cfg(unix)]
    pub(crate) fn from_raw(code: i32) -> Self {
        let kind = match code {
            libc::EOWNERDEAD => ErrorKind::OwnerDead,
            libc::ENOTRECOVERABLE => ErrorKind::NotRecoverable,
            libc::EDEADLK => ErrorKind::WouldDeadlock,
            libc::EPERM => ErrorKind::NotOwner,
            libc::EINVAL => ErrorKind::InvalidArgument,
            libc::ENOMEM | libc::EAGAIN => ErrorKind::OutOfMemory,
            libc::ENOSYS => ErrorKind::Unsupported,
            _ => ErrorKind::Other,
        };
        Self { kind, code }
    }

    /// Classifies a raw Win32 error value from `GetLastError`.
    #[cfg(windows)]
    pub(crate) fn from_raw(code: i32) -> Self {
        use windows_sys::Win32::Foundation::{
            ERROR_INVALID_PARAMETER, ERROR_NOT_ENOUGH_MEMORY, ERROR_OUTOFMEMORY,
            ERROR_POSSIBLE_DEADLOCK, ERROR_TOO_MANY_POSTS,
        };

        let kind = match code as u32 {
            ERROR_NOT_ENOUGH_MEMORY | ERROR_OUTOFMEMORY => ErrorKind::OutOfMemory,
            ERROR_POSSIBLE_DEADLOCK => ErrorKind::WouldDeadlock,
            ERROR_INVALID_PARAMETER => ErrorKind::InvalidArgument,
            ERROR_TOO_MANY_POSTS => ErrorKind::InvalidArgument,
            _ => ErrorKind::Other,
        };
        Self { kind, code }
    }

    /// Captures and classifies the calling thread's last OS error.
    #[cfg(windows)]
    pub(crate) fn last_os_error() -> Self {
        let code = unsafe { windows_sys::Win32::Foundation::GetLastError() };
        Self::from_raw(code as i32)
    }

    /// The portable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The raw OS error code, or `0` for usage errors detected before any
    /// native call.
    pub fn raw_code(&self) -> i32 {
        self.code
    }

    /// Human-readable description from the platform's error-string facility,
    /// or the classification text for usage errors.
    pub fn message(&self) -> String {
        if self.code == 0 {
            self.kind.to_string()
        } else {
            std::io::Error::from_raw_os_error(self.code).to_string()
        }
    }
}
