//! Integration tests for entities_system_integration_common crate
//!
//! These tests exercise the error values the file wrappers hand back to
//! callers.

use entities_system_integration_common::*;
use std::error::Error;
use std::io;

#[test]
fn test_error_code_is_a_plain_value() {
    let a = ErrorCode::new(libc::EPIPE);
    let b = a;
    assert_eq!(a, b);
    assert_eq!(b.get(), libc::EPIPE);
}

#[test]
fn test_system_error_is_std_error() {
    let err = SystemError::new(ErrorCode::new(libc::EBADF), "cannot read from file");
    let dyn_err: &dyn Error = &err;
    assert!(dyn_err.source().is_none());
    assert!(dyn_err.to_string().starts_with("cannot read from file: "));
}

#[test]
fn test_system_error_propagates_through_io_result() {
    fn open_something() -> io::Result<()> {
        let err = SystemError::new(ErrorCode::new(libc::EACCES), "cannot open file /root/secret");
        Err(err.into())
    }

    let err = open_something().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    let inner = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<SystemError>())
        .expect("SystemError should be preserved inside io::Error");
    assert_eq!(inner.code().get(), libc::EACCES);
}

#[test]
fn test_open_modes_are_distinct() {
    let flags = [
        OpenMode::ReadOnly.flags(),
        OpenMode::WriteOnly.flags(),
        OpenMode::ReadWrite.flags(),
    ];
    assert_ne!(flags[0], flags[1]);
    assert_ne!(flags[1], flags[2]);
    assert_ne!(flags[0], flags[2]);
}
