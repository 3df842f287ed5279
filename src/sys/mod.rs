//! Platform backend selection.
//!
//! Each backend implements the same raw primitive set with identical item
//! names and signatures:
//! - raw exclusive, recursive, shared, and spin locks,
//! - a raw condition variable bound to the raw exclusive lock,
//! - raw barrier and semaphore,
//! - thread spawn/join/detach/id and the sleep/yield calls.
//!
//! The concrete implementation is selected at compile time depending on the
//! target operating system; the public `sync` and `thread` modules only ever
//! name `platform::*` items, so no platform type leaks upward.

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(windows)]
pub(crate) mod windows;

#[cfg(unix)]
pub(crate) use unix as platform;

#[cfg(windows)]
pub(crate) use windows as platform;
