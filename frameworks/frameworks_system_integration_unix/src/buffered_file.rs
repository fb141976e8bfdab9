//! Buffered File Module
//!
//! Provides [`BufferedFile`], the single owner of a C stdio stream.
//! Usually obtained from [`File::fdopen`](crate::File::fdopen); closing the
//! stream also closes the descriptor underneath it.

use adapters_system_integration_unix::{retry_on_eintr, Errno, Posix, PosixApi, RawStream};
use entities_system_integration_common::SystemError;
use infrastructure_debugging::ErrorReporter;
use std::fmt;
use std::os::unix::io::RawFd;
use std::ptr;

type Result<T> = std::result::Result<T, SystemError>;

/// An owned stdio stream (`FILE *`)
pub struct BufferedFile<A: PosixApi = Posix> {
    stream: Option<RawStream>,
    api: A,
}

impl BufferedFile {
    /// Take ownership of a raw stream
    ///
    /// A null `stream` gives a `BufferedFile` that owns nothing.
    ///
    /// # Safety
    ///
    /// `stream` must be null or an open stream that nothing else will close.
    pub unsafe fn from_raw(stream: *mut libc::FILE) -> Self {
        Self::from_raw_with(Posix, stream)
    }
}

impl<A: PosixApi> BufferedFile<A> {
    /// Create a `BufferedFile` that owns nothing and uses `api` for OS calls
    pub fn with_api(api: A) -> Self {
        Self { stream: None, api }
    }

    /// Take ownership of a raw stream, using `api` for OS calls
    ///
    /// # Safety
    ///
    /// See [`BufferedFile::from_raw`].
    pub unsafe fn from_raw_with(api: A, stream: *mut libc::FILE) -> Self {
        Self {
            stream: RawStream::from_ptr(stream),
            api,
        }
    }

    pub(crate) fn from_stream(api: A, stream: RawStream) -> Self {
        Self {
            stream: Some(stream),
            api,
        }
    }

    /// Get the raw `FILE *`, or null if nothing is owned
    pub fn as_ptr(&self) -> *mut libc::FILE {
        self.stream.as_ref().map_or(ptr::null_mut(), RawStream::as_ptr)
    }

    /// Check whether this `BufferedFile` owns a stream
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Close the stream
    ///
    /// Does nothing if nothing is owned. `fclose` is not retried on `EINTR`:
    /// the stream is released by the first call whatever it returns.
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot close file") if `fclose` fails. The
    /// `BufferedFile` owns nothing afterwards either way.
    pub fn close(&mut self) -> Result<()> {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => return Ok(()),
        };

        ErrorReporter::trace(|| format!("fclose stream {:p}", stream.as_ptr()));
        self.api
            .fclose(stream)
            .map_err(|errno| SystemError::from_errno(errno, "cannot close file"))
    }

    /// Get the descriptor backing the stream
    ///
    /// # Errors
    ///
    /// Returns `SystemError` ("cannot get file descriptor") if nothing is
    /// owned (`EBADF`) or `fileno` fails.
    pub fn fileno(&self) -> Result<RawFd> {
        const MESSAGE: &str = "cannot get file descriptor";

        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| SystemError::from_errno(Errno::EBADF, MESSAGE))?;
        retry_on_eintr(|| self.api.fileno(stream))
            .map_err(|errno| SystemError::from_errno(errno, MESSAGE))
    }

    /// Give up ownership and return the raw `FILE *` (null if nothing is owned)
    pub fn into_raw(mut self) -> *mut libc::FILE {
        self.stream.take().map_or(ptr::null_mut(), RawStream::into_ptr)
    }
}

impl<A: PosixApi> Drop for BufferedFile<A> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            ErrorReporter::report_system_error(err.code(), err.message());
        }
    }
}

impl<A: PosixApi + Default> Default for BufferedFile<A> {
    fn default() -> Self {
        Self::with_api(A::default())
    }
}

impl<A: PosixApi> fmt::Debug for BufferedFile<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedFile")
            .field("stream", &self.as_ptr())
            .finish()
    }
}
