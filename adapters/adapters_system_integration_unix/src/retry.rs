//! EINTR Retry Module
//!
//! A call interrupted by a signal before it did anything reports `EINTR` and
//! must be reissued unchanged.

use nix::errno::Errno;

/// Call `call` until it no longer fails with `EINTR`
///
/// There is no backoff and no bound; the first result that is not
/// `Err(Errno::EINTR)` is returned as is.
///
/// # Examples
///
/// ```rust
/// use adapters_system_integration_unix::{retry_on_eintr, Errno};
///
/// let mut attempts = 0;
/// let result = retry_on_eintr(|| {
///     attempts += 1;
///     if attempts < 3 { Err(Errno::EINTR) } else { Ok(attempts) }
/// });
/// assert_eq!(result, Ok(3));
/// ```
pub fn retry_on_eintr<T, F>(mut call: F) -> Result<T, Errno>
where
    F: FnMut() -> Result<T, Errno>,
{
    loop {
        match call() {
            Err(Errno::EINTR) => continue,
            result => return result,
        }
    }
}
