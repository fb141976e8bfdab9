//! POSIX Call Module
//!
//! Provides the boundary between the file wrappers and the operating system.
//! Every call reports failure as an [`Errno`] instead of the C `-1`/`NULL`
//! plus `errno` convention, so callers can match on `Errno::EINTR` directly.
//!
//! The trait exists so the wrappers can be driven by a scripted
//! implementation in tests; [`Posix`] is the one that talks to libc.

use nix::errno::Errno;
use std::ffi::CStr;
use std::os::raw::c_int;
use std::os::unix::io::RawFd;
use std::ptr::NonNull;

/// An open C stdio stream (`FILE *`)
///
/// Only obtainable from [`PosixApi::fdopen`] or the unsafe
/// [`RawStream::from_ptr`], and consumed by [`PosixApi::fclose`], so a
/// stream cannot be closed twice through this type.
#[derive(Debug, PartialEq, Eq)]
pub struct RawStream(NonNull<libc::FILE>);

// SAFETY: stdio streams carry their own lock; a `RawStream` has a single owner.
unsafe impl Send for RawStream {}

impl RawStream {
    /// Wrap a raw `FILE *`, returning `None` for null
    ///
    /// # Safety
    ///
    /// `stream` must be null or point to an open stream that nothing else
    /// will close.
    pub unsafe fn from_ptr(stream: *mut libc::FILE) -> Option<Self> {
        NonNull::new(stream).map(Self)
    }

    /// Get the raw `FILE *`
    pub fn as_ptr(&self) -> *mut libc::FILE {
        self.0.as_ptr()
    }

    /// Give up ownership and return the raw `FILE *`
    pub fn into_ptr(self) -> *mut libc::FILE {
        self.0.as_ptr()
    }
}

/// The OS file calls used by `File` and `BufferedFile`
///
/// Each method issues exactly one call; retrying on `EINTR` is the caller's
/// job (see [`retry_on_eintr`](crate::retry_on_eintr)).
pub trait PosixApi {
    /// `open(path, flags)`
    fn open(&self, path: &CStr, flags: c_int) -> Result<RawFd, Errno>;

    /// `close(fd)`
    fn close(&self, fd: RawFd) -> Result<(), Errno>;

    /// `read(fd, buf, buf.len())`, returning the byte count
    fn read(&self, fd: RawFd, buf: &mut [u8]) -> Result<usize, Errno>;

    /// `write(fd, buf, buf.len())`, returning the byte count
    fn write(&self, fd: RawFd, buf: &[u8]) -> Result<usize, Errno>;

    /// `dup(fd)`
    fn dup(&self, fd: RawFd) -> Result<RawFd, Errno>;

    /// `dup2(fd, target)`, returning `target`
    fn dup2(&self, fd: RawFd, target: RawFd) -> Result<RawFd, Errno>;

    /// `pipe()`, returning `(read_end, write_end)`
    fn pipe(&self) -> Result<(RawFd, RawFd), Errno>;

    /// `fdopen(fd, mode)`
    fn fdopen(&self, fd: RawFd, mode: &CStr) -> Result<RawStream, Errno>;

    /// `fclose(stream)`
    ///
    /// The stream is gone after this call whatever it returns.
    fn fclose(&self, stream: RawStream) -> Result<(), Errno>;

    /// `fileno(stream)`
    fn fileno(&self, stream: &RawStream) -> Result<RawFd, Errno>;
}

/// The libc implementation of [`PosixApi`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Posix;

impl PosixApi for Posix {
    fn open(&self, path: &CStr, flags: c_int) -> Result<RawFd, Errno> {
        // SAFETY: `path` is NUL-terminated and outlives the call.
        Errno::result(unsafe { libc::open(path.as_ptr(), flags) })
    }

    fn close(&self, fd: RawFd) -> Result<(), Errno> {
        // SAFETY: closing an arbitrary integer is memory safe; EBADF at worst.
        Errno::result(unsafe { libc::close(fd) }).map(drop)
    }

    fn read(&self, fd: RawFd, buf: &mut [u8]) -> Result<usize, Errno> {
        // SAFETY: the kernel writes at most `buf.len()` bytes into `buf`.
        let n = Errno::result(unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) })?;
        Ok(n as usize)
    }

    fn write(&self, fd: RawFd, buf: &[u8]) -> Result<usize, Errno> {
        // SAFETY: the kernel reads at most `buf.len()` bytes from `buf`.
        let n = Errno::result(unsafe { libc::write(fd, buf.as_ptr().cast(), buf.len()) })?;
        Ok(n as usize)
    }

    fn dup(&self, fd: RawFd) -> Result<RawFd, Errno> {
        // SAFETY: no memory is passed to the kernel.
        Errno::result(unsafe { libc::dup(fd) })
    }

    fn dup2(&self, fd: RawFd, target: RawFd) -> Result<RawFd, Errno> {
        // SAFETY: no memory is passed to the kernel.
        Errno::result(unsafe { libc::dup2(fd, target) })
    }

    fn pipe(&self) -> Result<(RawFd, RawFd), Errno> {
        let mut fds: [c_int; 2] = [-1, -1];
        // SAFETY: `fds` has room for the two descriptors pipe writes.
        Errno::result(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
        Ok((fds[0], fds[1]))
    }

    fn fdopen(&self, fd: RawFd, mode: &CStr) -> Result<RawStream, Errno> {
        // SAFETY: `mode` is NUL-terminated and outlives the call.
        let stream = unsafe { libc::fdopen(fd, mode.as_ptr()) };
        // SAFETY: a non-null result is a fresh stream owned by nobody else.
        unsafe { RawStream::from_ptr(stream) }.ok_or_else(Errno::last)
    }

    fn fclose(&self, stream: RawStream) -> Result<(), Errno> {
        // SAFETY: `RawStream` guarantees an open stream and is consumed here.
        Errno::result(unsafe { libc::fclose(stream.into_ptr()) }).map(drop)
    }

    fn fileno(&self, stream: &RawStream) -> Result<RawFd, Errno> {
        // SAFETY: `RawStream` guarantees an open stream.
        Errno::result(unsafe { libc::fileno(stream.as_ptr()) })
    }
}
