//! System Error Module
//!
//! Provides `SystemError`, the failure returned by every fallible file
//! operation. An OS call that fails with `EINTR` is retried by the caller and
//! never produces a `SystemError`.

use crate::error_code::ErrorCode;
use std::fmt;
use std::io;

#[cfg(unix)]
use nix::errno::Errno;

/// An OS call failed
///
/// Carries the platform error number together with a message naming the
/// failed operation (and the path or descriptor involved, where relevant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemError {
    code: ErrorCode,
    message: String,
}

impl SystemError {
    /// Create a system error
    ///
    /// # Arguments
    ///
    /// * `code` - Platform error number reported by the failed call
    /// * `message` - Description of the failed operation, e.g. `"cannot open file foo"`
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a system error from a `nix` errno value
    #[cfg(unix)]
    pub fn from_errno(errno: Errno, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::from(errno), message)
    }

    /// Get the platform error number
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the operation description, without the OS error text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, describe(self.code))
    }
}

impl std::error::Error for SystemError {}

impl From<SystemError> for io::Error {
    fn from(err: SystemError) -> Self {
        let kind = io::Error::from_raw_os_error(err.code.get()).kind();
        io::Error::new(kind, err)
    }
}

/// Format a system error message
///
/// Produces `"<message>: <OS error text>"`, the same text `SystemError`
/// displays. Used where the failure is reported rather than returned.
///
/// # Examples
///
/// ```rust
/// use entities_system_integration_common::{format_system_error, ErrorCode};
///
/// let text = format_system_error(ErrorCode::new(libc::EBADF), "cannot close file");
/// assert!(text.starts_with("cannot close file: "));
/// ```
pub fn format_system_error(code: ErrorCode, message: &str) -> String {
    format!("{}: {}", message, describe(code))
}

#[cfg(unix)]
fn describe(code: ErrorCode) -> String {
    Errno::from_i32(code.get()).desc().to_string()
}

#[cfg(not(unix))]
fn describe(code: ErrorCode) -> String {
    io::Error::from_raw_os_error(code.get()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_error_accessors() {
        let err = SystemError::new(ErrorCode::new(libc::ENOENT), "cannot open file /missing");
        assert_eq!(err.code(), ErrorCode::new(libc::ENOENT));
        assert_eq!(err.message(), "cannot open file /missing");
    }

    #[test]
    #[cfg(unix)]
    fn test_system_error_display_includes_os_text() {
        let err = SystemError::from_errno(Errno::ENOENT, "cannot open file /missing");
        assert_eq!(
            err.to_string(),
            "cannot open file /missing: No such file or directory"
        );
    }

    #[test]
    fn test_format_system_error_matches_display() {
        let code = ErrorCode::new(libc::EBADF);
        let err = SystemError::new(code, "cannot close file");
        assert_eq!(format_system_error(code, "cannot close file"), err.to_string());
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let err = SystemError::new(ErrorCode::new(libc::ENOENT), "cannot open file x");
        let io_err: io::Error = err.clone().into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(io_err.to_string(), err.to_string());
    }
}
