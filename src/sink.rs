//! The error-sink collaborator for asynchronous windowing-library errors.
//!
//! GLFW reports some failures through a process-wide callback rather than as
//! return values. Instead of a global mutable callback, the sink is injected
//! at [`Platform::initialize`](crate::Platform::initialize) time, so tests
//! and embedders can observe reports deterministically. Reports are
//! informational: the core never retries on them.

use log::error;

/// Receiver for asynchronous windowing-library error reports.
///
/// Implementations must be `Send + Sync`: the callback is registered
/// process-wide for the lifetime of the program.
pub trait ErrorSink: Send + Sync {
    /// Called with the library's numeric error code and a human-readable
    /// description.
    fn report(&self, code: i32, message: &str);
}

/// Default sink that forwards reports to the [`log`] crate at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, code: i32, message: &str) {
        error!("window system error {code}: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CaptureSink {
        reports: Mutex<Vec<(i32, String)>>,
    }

    impl ErrorSink for CaptureSink {
        fn report(&self, code: i32, message: &str) {
            self.reports
                .lock()
                .expect("capture mutex poisoned")
                .push((code, message.to_owned()));
        }
    }

    #[test]
    fn capture_sink_records_reports_in_order() {
        let sink = CaptureSink {
            reports: Mutex::new(Vec::new()),
        };
        sink.report(65543, "GLX: Failed to create context");
        sink.report(65537, "The GLFW library is not initialized");

        let reports = sink.reports.lock().expect("capture mutex poisoned");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].0, 65543);
        assert!(reports[1].1.contains("not initialized"));
    }

    #[test]
    fn sink_usable_through_a_shared_trait_object() {
        let sink: std::sync::Arc<dyn ErrorSink> = std::sync::Arc::new(LogSink);
        // Must not panic; LogSink only forwards to the logger.
        sink.report(0, "benign");
    }
}
