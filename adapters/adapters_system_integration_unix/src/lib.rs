//! Adapters Layer: Unix System Integration
//!
//! Provides the OS call layer used by the file wrappers: one logical
//! operation per concept (open, close, read, write, dup, dup2, pipe, fdopen,
//! fclose, fileno) behind the [`PosixApi`] trait, and the `EINTR` retry
//! combinator applied to every retried call.
//! Depends only on `libc` and `nix`.

#[cfg(unix)]
pub mod posix_api;
#[cfg(unix)]
pub mod retry;

#[cfg(unix)]
pub use posix_api::{Posix, PosixApi, RawStream};
#[cfg(unix)]
pub use retry::retry_on_eintr;

#[cfg(unix)]
pub use nix::errno::Errno;

#[cfg(not(unix))]
/// Unix-specific functionality is only available on Unix systems
pub fn unix_only() {
    // Placeholder for non-Unix platforms
}
