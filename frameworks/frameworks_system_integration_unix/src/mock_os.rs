//! Scripted OS call layer for unit tests

use adapters_system_integration_unix::{Errno, PosixApi, RawStream};
use mockall::mock;
use std::ffi::CStr;
use std::os::raw::c_int;
use std::os::unix::io::RawFd;
use std::ptr::NonNull;

mock! {
    pub Os {}
    impl PosixApi for Os {
        fn open(&self, path: &CStr, flags: c_int) -> Result<RawFd, Errno>;
        fn close(&self, fd: RawFd) -> Result<(), Errno>;
        fn read(&self, fd: RawFd, buf: &mut [u8]) -> Result<usize, Errno>;
        fn write(&self, fd: RawFd, buf: &[u8]) -> Result<usize, Errno>;
        fn dup(&self, fd: RawFd) -> Result<RawFd, Errno>;
        fn dup2(&self, fd: RawFd, target: RawFd) -> Result<RawFd, Errno>;
        fn pipe(&self) -> Result<(RawFd, RawFd), Errno>;
        fn fdopen(&self, fd: RawFd, mode: &CStr) -> Result<RawStream, Errno>;
        fn fclose(&self, stream: RawStream) -> Result<(), Errno>;
        fn fileno(&self, stream: &RawStream) -> Result<RawFd, Errno>;
    }
}

/// A stream that is never dereferenced: every call on it goes to the mock.
pub fn fake_stream_ptr() -> *mut libc::FILE {
    NonNull::dangling().as_ptr()
}

pub fn fake_stream() -> RawStream {
    // SAFETY: only ever handed to `MockOs`.
    unsafe { RawStream::from_ptr(fake_stream_ptr()) }.unwrap()
}
