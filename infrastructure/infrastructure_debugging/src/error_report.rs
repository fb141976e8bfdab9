//! Error Report Module
//!
//! Provides the non-throwing diagnostic sink for OS failures that cannot be
//! returned to a caller, plus trace output for file operations.
//!
//! Output goes to stderr:
//! - `[ERROR] cannot close file: Bad file descriptor`
//! - `[TRACE] open /tmp/data -> fd 3`

use entities_system_integration_common::{format_system_error, ErrorCode};
use std::cell::RefCell;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global reporting state
static REPORTING_ENABLED: AtomicBool = AtomicBool::new(true);
static TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Callback receiving every report made on the thread it is installed on
pub type ReportHook = Box<dyn Fn(ErrorCode, &str)>;

thread_local! {
    static REPORT_HOOK: RefCell<Option<ReportHook>> = RefCell::new(None);
}

/// Error reporting for failures that must not propagate
pub struct ErrorReporter;

impl ErrorReporter {
    /// Enable stderr output for reported errors (the default)
    pub fn enable() {
        REPORTING_ENABLED.store(true, Ordering::Release);
    }

    /// Disable stderr output for reported errors
    ///
    /// Report hooks still run.
    pub fn disable() {
        REPORTING_ENABLED.store(false, Ordering::Release);
    }

    /// Check if reported errors are written to stderr
    pub fn is_enabled() -> bool {
        REPORTING_ENABLED.load(Ordering::Acquire)
    }

    /// Enable trace output for file operations
    pub fn enable_trace() {
        TRACE_ENABLED.store(true, Ordering::Release);
    }

    /// Disable trace output for file operations (the default)
    pub fn disable_trace() {
        TRACE_ENABLED.store(false, Ordering::Release);
    }

    /// Check if trace output is enabled
    pub fn is_trace_enabled() -> bool {
        TRACE_ENABLED.load(Ordering::Acquire)
    }

    /// Install a report hook for the current thread
    ///
    /// # Returns
    ///
    /// The previously installed hook, if any.
    pub fn set_hook(hook: ReportHook) -> Option<ReportHook> {
        REPORT_HOOK.with(|slot| slot.borrow_mut().replace(hook))
    }

    /// Remove the current thread's report hook
    pub fn clear_hook() -> Option<ReportHook> {
        REPORT_HOOK.with(|slot| slot.borrow_mut().take())
    }

    /// Report a system error
    ///
    /// Writes `[ERROR] <message>: <OS error text>` to stderr when reporting
    /// is enabled, then hands `(code, message)` to the current thread's hook.
    /// Never panics and never fails: a broken stderr or a panicking hook is
    /// ignored.
    ///
    /// # Arguments
    ///
    /// * `code` - Platform error number of the failed call
    /// * `message` - Description of the failed operation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_system_integration_common::ErrorCode;
    /// use infrastructure_debugging::ErrorReporter;
    ///
    /// ErrorReporter::report_system_error(ErrorCode::new(9), "cannot close file");
    /// ```
    pub fn report_system_error(code: ErrorCode, message: &str) {
        if Self::is_enabled() {
            let line = format_system_error(code, message);
            let _ = writeln!(io::stderr(), "[ERROR] {}", line);
        }

        // Reports may come from destructors running during thread teardown.
        let _ = REPORT_HOOK.try_with(|slot| {
            if let Ok(hook) = slot.try_borrow() {
                if let Some(hook) = hook.as_ref() {
                    let _ = panic::catch_unwind(AssertUnwindSafe(|| hook(code, message)));
                }
            }
        });
    }

    /// Output a trace line
    ///
    /// The message is only built when tracing is enabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use infrastructure_debugging::ErrorReporter;
    ///
    /// ErrorReporter::trace(|| format!("close fd {}", 3));
    /// ```
    pub fn trace<F>(message: F)
    where
        F: FnOnce() -> String,
    {
        if Self::is_trace_enabled() {
            let _ = writeln!(io::stderr(), "[TRACE] {}", message());
        }
    }

    /// Collect the reports made on this thread while `f` runs
    ///
    /// The previous hook is restored afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_system_integration_common::ErrorCode;
    /// use infrastructure_debugging::ErrorReporter;
    ///
    /// let (_, reports) = ErrorReporter::capture(|| {
    ///     ErrorReporter::report_system_error(ErrorCode::new(9), "cannot close file");
    /// });
    /// assert_eq!(reports, vec![(ErrorCode::new(9), "cannot close file".to_string())]);
    /// ```
    pub fn capture<T, F>(f: F) -> (T, Vec<(ErrorCode, String)>)
    where
        F: FnOnce() -> T,
    {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);
        let previous = Self::set_hook(Box::new(move |code: ErrorCode, message: &str| {
            sink.borrow_mut().push((code, message.to_string()));
        }));

        let result = f();

        match previous {
            Some(hook) => {
                Self::set_hook(hook);
            }
            None => {
                Self::clear_hook();
            }
        }
        let reports = reports.take();
        (result, reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_enable_disable() {
        ErrorReporter::disable_trace();
        assert!(!ErrorReporter::is_trace_enabled());

        ErrorReporter::enable_trace();
        assert!(ErrorReporter::is_trace_enabled());
        ErrorReporter::trace(|| "trace line".to_string());

        ErrorReporter::disable_trace();
        assert!(!ErrorReporter::is_trace_enabled());
    }

    #[test]
    fn test_trace_message_not_built_when_disabled() {
        ErrorReporter::disable_trace();
        ErrorReporter::trace(|| panic!("message should not be built"));
    }

    #[test]
    fn test_hook_receives_reports() {
        let (_, reports) = ErrorReporter::capture(|| {
            ErrorReporter::report_system_error(ErrorCode::new(libc::EBADF), "cannot close file");
            ErrorReporter::report_system_error(ErrorCode::new(libc::EIO), "cannot close file");
        });
        assert_eq!(
            reports,
            vec![
                (ErrorCode::new(libc::EBADF), "cannot close file".to_string()),
                (ErrorCode::new(libc::EIO), "cannot close file".to_string()),
            ]
        );
    }

    #[test]
    fn test_capture_restores_previous_hook() {
        let outer = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&outer);
        ErrorReporter::set_hook(Box::new(move |_: ErrorCode, _: &str| *counter.borrow_mut() += 1));

        let (_, inner) = ErrorReporter::capture(|| {
            ErrorReporter::report_system_error(ErrorCode::new(libc::EIO), "inner");
        });
        assert_eq!(inner.len(), 1);
        assert_eq!(*outer.borrow(), 0);

        ErrorReporter::report_system_error(ErrorCode::new(libc::EIO), "outer");
        assert_eq!(*outer.borrow(), 1);
        ErrorReporter::clear_hook();
    }

    #[test]
    fn test_panicking_hook_is_contained() {
        ErrorReporter::set_hook(Box::new(|_: ErrorCode, _: &str| panic!("hook failure")));
        ErrorReporter::report_system_error(ErrorCode::new(libc::EIO), "cannot close file");
        ErrorReporter::clear_hook();
    }
}
