#![forbid(unsafe_code)]

//! Logging shim.
//!
//! Every goey crate logs through the macros exported here (`goey_core::debug!`
//! and friends). With the `tracing` feature they forward to [`tracing`] under
//! the [`TARGET`] target so a subscriber can filter toast events with a single
//! directive such as `goey=debug`. Without the feature they expand to nothing.

/// Log target shared by all goey events and spans.
pub const TARGET: &str = "goey";

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing as __private_tracing;

#[cfg(feature = "tracing")]
mod forwarding {
    /// Trace-level event under the goey target.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::trace!(target: $crate::logging::TARGET, $($arg)+)
        };
    }

    /// Debug-level event under the goey target.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::debug!(target: $crate::logging::TARGET, $($arg)+)
        };
    }

    /// Info-level event under the goey target.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::info!(target: $crate::logging::TARGET, $($arg)+)
        };
    }

    /// Warn-level event under the goey target.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::warn!(target: $crate::logging::TARGET, $($arg)+)
        };
    }

    /// Error-level event under the goey target.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::error!(target: $crate::logging::TARGET, $($arg)+)
        };
    }

    /// Debug-level span under the goey target.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)+) => {
            $crate::logging::__private_tracing::debug_span!(target: $crate::logging::TARGET, $($arg)+)
        };
    }
}

#[cfg(not(feature = "tracing"))]
mod silent {
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in span returned by `debug_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        f()
    }
}

#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
