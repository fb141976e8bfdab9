//! Error Code Module
//!
//! Provides `ErrorCode`, a plain carrier for a platform error number.

#[cfg(unix)]
use nix::errno::Errno;

/// A platform error number (`errno`).
///
/// Zero means "no error". The value is fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Create an error code from a raw platform error number
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_system_integration_common::ErrorCode;
    ///
    /// let code = ErrorCode::new(libc::EBADF);
    /// assert_eq!(code.get(), libc::EBADF);
    /// assert_eq!(ErrorCode::default().get(), 0);
    /// ```
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw platform error number
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl From<i32> for ErrorCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(unix)]
impl From<Errno> for ErrorCode {
    fn from(errno: Errno) -> Self {
        Self(errno as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_default_is_zero() {
        assert_eq!(ErrorCode::default().get(), 0);
        assert_eq!(ErrorCode::default(), ErrorCode::new(0));
    }

    #[test]
    fn test_error_code_round_trip() {
        for value in [1, libc::EINTR, libc::ENOENT, -7] {
            assert_eq!(ErrorCode::new(value).get(), value);
            assert_eq!(ErrorCode::from(value).get(), value);
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_error_code_from_errno() {
        assert_eq!(ErrorCode::from(Errno::EBADF).get(), libc::EBADF);
        assert_eq!(ErrorCode::from(Errno::EINTR).get(), libc::EINTR);
    }
}
