//! Lifecycle events, compiled out unless the `tracing` feature is enabled.
//!
//! All events use the `variant::lifecycle` target. Routine transitions are
//! `trace` level; entering the valueless state is `debug` level.

/// Emits a `trace` event for a routine state transition.
macro_rules! transition {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "variant::lifecycle", $($arg)+);
    };
}

/// Emits a `debug` event when a replacement leaves a variant valueless.
macro_rules! became_valueless {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "variant::lifecycle", $($arg)+);
    };
}

pub(crate) use became_valueless;
pub(crate) use transition;
