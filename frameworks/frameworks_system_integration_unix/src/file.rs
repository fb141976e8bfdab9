//! File Descriptor Module
//!
//! Provides [`File`], the single owner of a Unix file descriptor.
//!
//! A `File` either owns one descriptor or is unset ([`UNSET_FD`]). Moving a
//! `File` moves ownership; `std::mem::take` moves it out and leaves the source
//! unset. Assigning over an owning `File` drops the old value, which closes
//! its descriptor. Close failures during `Drop` are handed to
//! [`ErrorReporter`] since a destructor has no caller to return them to.

use crate::buffered_file::BufferedFile;
use adapters_system_integration_unix::{retry_on_eintr, Errno, Posix, PosixApi};
use entities_system_integration_common::{ErrorCode, OpenMode, SystemError};
use infrastructure_debugging::ErrorReporter;
use std::ffi::CString;
use std::fmt;
use std::io;
use std::mem::{self, ManuallyDrop};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, FromRawFd, IntoRawFd, RawFd};
use std::path::Path;
use std::ptr;

/// Descriptor value of a `File` that owns nothing
pub const UNSET_FD: RawFd = -1;

type Result<T> = std::result::Result<T, SystemError>;

/// An owned file descriptor
///
/// The type parameter is the OS call layer every operation goes through.
pub struct File<A: PosixApi = Posix> {
    fd: RawFd,
    api: A,
}

impl File {
    /// Open a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to open
    /// * `mode` - Read-only, write-only or read-write
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot open file <path>") if `open` fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_system_integration_common::OpenMode;
    /// use frameworks_system_integration_unix::File;
    ///
    /// let err = File::open("/nonexistent/path", OpenMode::ReadOnly).unwrap_err();
    /// assert_eq!(err.code().get(), libc::ENOENT);
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        Self::open_with(Posix, path, mode)
    }

    /// Duplicate `fd` and return the duplicate as a new `File`
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot duplicate file descriptor <fd>") if `dup` fails.
    pub fn dup(fd: RawFd) -> Result<Self> {
        Self::dup_with(Posix, fd)
    }

    /// Create a pipe, returning `(read_end, write_end)`
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot create pipe") if `pipe` fails.
    pub fn pipe() -> Result<(Self, Self)> {
        Self::pipe_with(Posix)
    }
}

impl<A: PosixApi> File<A> {
    /// Create an unset `File` that will use `api` for its OS calls
    pub fn with_api(api: A) -> Self {
        Self { fd: UNSET_FD, api }
    }

    /// Take ownership of `fd`, using `api` for OS calls
    ///
    /// # Safety
    ///
    /// `fd` must be open (or [`UNSET_FD`]) and owned by nothing else.
    pub unsafe fn from_raw_fd_with(api: A, fd: RawFd) -> Self {
        Self { fd, api }
    }

    /// Open a file using `api` for OS calls
    ///
    /// See [`File::open`].
    pub fn open_with<P: AsRef<Path>>(api: A, path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let message = || format!("cannot open file {}", path.display());

        // A path with an interior NUL cannot be passed to the OS.
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| SystemError::from_errno(Errno::EINVAL, message()))?;
        let fd = retry_on_eintr(|| api.open(&c_path, mode.flags()))
            .map_err(|errno| SystemError::from_errno(errno, message()))?;

        ErrorReporter::trace(|| format!("open {} ({:?}) -> fd {}", path.display(), mode, fd));
        Ok(Self { fd, api })
    }

    /// Duplicate `fd` using `api` for OS calls
    ///
    /// See [`File::dup`].
    pub fn dup_with(api: A, fd: RawFd) -> Result<Self> {
        let new_fd = retry_on_eintr(|| api.dup(fd)).map_err(|errno| {
            SystemError::from_errno(errno, format!("cannot duplicate file descriptor {}", fd))
        })?;

        ErrorReporter::trace(|| format!("dup fd {} -> fd {}", fd, new_fd));
        Ok(Self { fd: new_fd, api })
    }

    /// Create a pipe using `api` for OS calls
    ///
    /// See [`File::pipe`].
    pub fn pipe_with(api: A) -> Result<(Self, Self)>
    where
        A: Clone,
    {
        let mut read_end = Self::with_api(api.clone());
        let mut write_end = Self::with_api(api);
        Self::pipe_into(&mut read_end, &mut write_end)?;
        Ok((read_end, write_end))
    }

    /// Create a pipe, storing its ends in existing `File` objects
    ///
    /// Both outputs are closed first, so no descriptor leaks and the final
    /// assignment cannot fail. The pipe is created through `read_end`'s OS
    /// call layer.
    ///
    /// # Errors
    ///
    /// Returns the `SystemError` of a failed close, or "cannot create pipe"
    /// if `pipe` fails. Both outputs are unset in the latter case.
    pub fn pipe_into(read_end: &mut Self, write_end: &mut Self) -> Result<()> {
        read_end.close()?;
        write_end.close()?;

        let (r, w) = retry_on_eintr(|| read_end.api.pipe())
            .map_err(|errno| SystemError::from_errno(errno, "cannot create pipe"))?;
        read_end.fd = r;
        write_end.fd = w;

        ErrorReporter::trace(|| format!("pipe -> read fd {}, write fd {}", r, w));
        Ok(())
    }

    /// Get the owned descriptor, or [`UNSET_FD`]
    pub fn descriptor(&self) -> RawFd {
        self.fd
    }

    /// Check whether this `File` owns a descriptor
    pub fn is_open(&self) -> bool {
        self.fd != UNSET_FD
    }

    /// Close the file
    ///
    /// Does nothing on an unset `File`. Otherwise the descriptor is detached
    /// before `close` is issued, so the `File` is unset afterwards whether or
    /// not `close` succeeded.
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot close file") if `close` fails.
    pub fn close(&mut self) -> Result<()> {
        if self.fd == UNSET_FD {
            return Ok(());
        }
        let fd = mem::replace(&mut self.fd, UNSET_FD);

        ErrorReporter::trace(|| format!("close fd {}", fd));
        retry_on_eintr(|| self.api.close(fd))
            .map_err(|errno| SystemError::from_errno(errno, "cannot close file"))
    }

    /// Read up to `buf.len()` bytes
    ///
    /// # Returns
    ///
    /// The number of bytes read; 0 means end of file.
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot read from file") if `read` fails.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        retry_on_eintr(|| self.api.read(self.fd, &mut *buf))
            .map_err(|errno| SystemError::from_errno(errno, "cannot read from file"))
    }

    /// Write up to `buf.len()` bytes
    ///
    /// # Returns
    ///
    /// The number of bytes written, which may be fewer than `buf.len()`.
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot write to file") if `write` fails.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        retry_on_eintr(|| self.api.write(self.fd, buf))
            .map_err(|errno| SystemError::from_errno(errno, "cannot write to file"))
    }

    /// Duplicate this descriptor into a new `File`
    pub fn try_clone(&self) -> Result<Self>
    where
        A: Clone,
    {
        Self::dup_with(self.api.clone(), self.fd)
    }

    /// Make `target` a copy of this descriptor, closing `target` first if open
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot duplicate file descriptor <fd> to
    /// <target>") if `dup2` fails.
    pub fn dup2(&self, target: RawFd) -> Result<()> {
        retry_on_eintr(|| self.api.dup2(self.fd, target)).map_err(|errno| {
            SystemError::from_errno(
                errno,
                format!("cannot duplicate file descriptor {} to {}", self.fd, target),
            )
        })?;

        ErrorReporter::trace(|| format!("dup2 fd {} -> fd {}", self.fd, target));
        Ok(())
    }

    /// Make `target` a copy of this descriptor without failing
    ///
    /// On failure the platform error number is stored in `ec`; on success
    /// `ec` is left as it was. For cleanup paths that must not propagate
    /// errors.
    pub fn dup2_with_error_code(&self, target: RawFd, ec: &mut ErrorCode) {
        if let Err(errno) = retry_on_eintr(|| self.api.dup2(self.fd, target)) {
            *ec = ErrorCode::from(errno);
        }
    }

    /// Associate a stdio stream with this descriptor
    ///
    /// On success the descriptor now belongs to the returned
    /// [`BufferedFile`] and is closed by `fclose`.
    ///
    /// # Arguments
    ///
    /// * `mode` - fopen-style mode string, e.g. `"r"` or `"w"`
    ///
    /// # Errors
    ///
    /// Returns [`FdopenError`] ("cannot associate stream with file
    /// descriptor") if `fdopen` fails. The descriptor is not closed: the
    /// error hands this `File` back through [`FdopenError::into_file`].
    pub fn fdopen(self, mode: &str) -> std::result::Result<BufferedFile<A>, FdopenError<A>> {
        const MESSAGE: &str = "cannot associate stream with file descriptor";

        let c_mode = match CString::new(mode) {
            Ok(c_mode) => c_mode,
            Err(_) => {
                let error = SystemError::from_errno(Errno::EINVAL, MESSAGE);
                return Err(FdopenError { file: self, error });
            }
        };

        let opened = retry_on_eintr(|| self.api.fdopen(self.fd, &c_mode));
        match opened {
            Ok(stream) => {
                let (fd, api) = self.into_parts();
                ErrorReporter::trace(|| format!("fdopen fd {} ({:?})", fd, mode));
                Ok(BufferedFile::from_stream(api, stream))
            }
            Err(errno) => Err(FdopenError {
                file: self,
                error: SystemError::from_errno(errno, MESSAGE),
            }),
        }
    }

    /// Give up ownership without closing
    fn into_parts(self) -> (RawFd, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so `api` is moved out exactly once.
        let api = unsafe { ptr::read(&this.api) };
        (this.fd, api)
    }
}

impl<A: PosixApi> Drop for File<A> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            ErrorReporter::report_system_error(err.code(), err.message());
        }
    }
}

impl<A: PosixApi + Default> Default for File<A> {
    fn default() -> Self {
        Self::with_api(A::default())
    }
}

impl<A: PosixApi> fmt::Debug for File<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File").field("fd", &self.fd).finish()
    }
}

impl<A: PosixApi> AsRawFd for File<A> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl<A: PosixApi> IntoRawFd for File<A> {
    fn into_raw_fd(self) -> RawFd {
        self.into_parts().0
    }
}

impl<A: PosixApi + Default> FromRawFd for File<A> {
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self::from_raw_fd_with(A::default(), fd)
    }
}

impl<A: PosixApi> io::Read for File<A> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Self::read(self, buf).map_err(io::Error::from)
    }
}

impl<A: PosixApi> io::Write for File<A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A failed [`File::fdopen`]
///
/// Still owns the `File`; dropping the error closes it.
pub struct FdopenError<A: PosixApi = Posix> {
    file: File<A>,
    error: SystemError,
}

impl<A: PosixApi> FdopenError<A> {
    /// Get the failure
    pub fn error(&self) -> &SystemError {
        &self.error
    }

    /// Recover the `File`, which still owns its descriptor
    pub fn into_file(self) -> File<A> {
        self.file
    }

    /// Split into the `File` and the failure
    pub fn into_parts(self) -> (File<A>, SystemError) {
        (self.file, self.error)
    }
}

impl<A: PosixApi> fmt::Debug for FdopenError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FdopenError")
            .field("file", &self.file)
            .field("error", &self.error)
            .finish()
    }
}

impl<A: PosixApi> fmt::Display for FdopenError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<A: PosixApi> std::error::Error for FdopenError<A> {}

/// Drops the `File`, closing its descriptor.
impl<A: PosixApi> From<FdopenError<A>> for SystemError {
    fn from(err: FdopenError<A>) -> Self {
        err.error
    }
}
