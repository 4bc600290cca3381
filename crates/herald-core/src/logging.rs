//! Logging facilities for Herald.
//!
//! Herald uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("herald::live_region=debug,herald::focus=trace")
//!     .init();
//! ```
//!
//! All events are emitted under the stable target names in [`targets`], so
//! a subsystem can be filtered independently.

/// Span names used throughout Herald for tracing.
pub mod span_names {
    /// Announcement lifecycle span.
    pub const ANNOUNCE: &str = "herald::announce";
    /// Scheduler processing span.
    pub const SCHEDULER: &str = "herald::scheduler";
    /// Focus trap key handling span.
    pub const FOCUS_TRAP: &str = "herald::focus_trap";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "herald_core";
    /// Scheduler target.
    pub const SCHEDULER: &str = "herald_core::scheduler";
    /// Signal/slot target.
    pub const SIGNAL: &str = "herald_core::signal";
    /// Live region and announcer target.
    pub const LIVE_REGION: &str = "herald::live_region";
    /// Focus trap and focus return target.
    pub const FOCUS: &str = "herald::focus";
    /// Form, search and modal consumers.
    pub const FEEDBACK: &str = "herald::feedback";
    /// Configuration loading.
    pub const CONFIG: &str = "herald::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a unit of work such as one focus-trap key press.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "herald::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Trace-level event under the core target.
#[macro_export]
macro_rules! herald_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "herald_core", $($arg)*)
    };
}

/// Debug-level event under the core target.
#[macro_export]
macro_rules! herald_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "herald_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new(span_names::SCHEDULER);
            herald_debug!(target_name = targets::CORE, "inside perf span");
        });
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::SCHEDULER,
            targets::SIGNAL,
            targets::LIVE_REGION,
            targets::FOCUS,
            targets::FEEDBACK,
            targets::CONFIG,
        ] {
            assert!(target.starts_with("herald"));
        }
    }
}
