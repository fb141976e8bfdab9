//! Frameworks Layer: Unix System Integration
//!
//! Provides owning wrappers around the two Unix file abstractions:
//! - [`File`]: a raw file descriptor, closed exactly once
//! - [`BufferedFile`]: a C stdio stream (`FILE *`), closed exactly once
//!
//! Every call that can be interrupted is reissued on `EINTR`; every other
//! OS failure is returned as a `SystemError`. Failures while closing from
//! `Drop` go to `ErrorReporter` instead.
//! Depends on Entities, Adapters and Infrastructure layers.
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(unix)]
//! # fn main() -> Result<(), entities_system_integration_common::SystemError> {
//! use frameworks_system_integration_unix::File;
//!
//! let (read_end, write_end) = File::pipe()?;
//! write_end.write(b"ping")?;
//! let mut buf = [0u8; 4];
//! assert_eq!(read_end.read(&mut buf)?, 4);
//! assert_eq!(&buf, b"ping");
//! # Ok(())
//! # }
//! # #[cfg(not(unix))]
//! # fn main() {}
//! ```

#[cfg(unix)]
pub mod buffered_file;
#[cfg(unix)]
pub mod file;
#[cfg(all(unix, test))]
mod mock_os;

#[cfg(unix)]
pub use buffered_file::BufferedFile;
#[cfg(unix)]
pub use file::{FdopenError, File, UNSET_FD};

#[cfg(not(unix))]
/// Unix-specific functionality is only available on Unix systems
pub fn unix_only() {
    // Placeholder for non-Unix platforms
}
