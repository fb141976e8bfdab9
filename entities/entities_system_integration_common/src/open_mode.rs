//! Open Mode Module
//!
//! Maps the three access modes accepted by `File::open` to the platform's
//! `open(2)` flags.

use std::os::raw::c_int;

/// Access mode used when opening a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Open for reading only (`O_RDONLY`)
    ReadOnly,
    /// Open for writing only (`O_WRONLY`)
    WriteOnly,
    /// Open for reading and writing (`O_RDWR`)
    ReadWrite,
}

impl OpenMode {
    /// Get the platform `oflag` value for this mode
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_system_integration_common::OpenMode;
    ///
    /// assert_eq!(OpenMode::ReadWrite.flags(), libc::O_RDWR);
    /// ```
    pub const fn flags(self) -> c_int {
        match self {
            OpenMode::ReadOnly => libc::O_RDONLY,
            OpenMode::WriteOnly => libc::O_WRONLY,
            OpenMode::ReadWrite => libc::O_RDWR,
        }
    }

    /// Whether a descriptor opened in this mode can be read from
    pub const fn is_readable(self) -> bool {
        matches!(self, OpenMode::ReadOnly | OpenMode::ReadWrite)
    }

    /// Whether a descriptor opened in this mode can be written to
    pub const fn is_writable(self) -> bool {
        matches!(self, OpenMode::WriteOnly | OpenMode::ReadWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_mode_flags_match_platform() {
        assert_eq!(OpenMode::ReadOnly.flags(), libc::O_RDONLY);
        assert_eq!(OpenMode::WriteOnly.flags(), libc::O_WRONLY);
        assert_eq!(OpenMode::ReadWrite.flags(), libc::O_RDWR);
    }

    #[test]
    fn test_open_mode_access() {
        assert!(OpenMode::ReadOnly.is_readable());
        assert!(!OpenMode::ReadOnly.is_writable());
        assert!(!OpenMode::WriteOnly.is_readable());
        assert!(OpenMode::WriteOnly.is_writable());
        assert!(OpenMode::ReadWrite.is_readable());
        assert!(OpenMode::ReadWrite.is_writable());
    }
}
