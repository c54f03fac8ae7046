//! Logging macros.
//!
//! Forward to the `log` facade when the `log` feature is enabled and
//! evaluate (then discard) their arguments otherwise.

macro_rules! rand_trace {
    ($($arg:expr),*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg),*);
        #[cfg(not(feature = "log"))]
        $( let _ = $arg );*;
    }
}

macro_rules! rand_debug {
    ($($arg:expr),*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg),*);
        #[cfg(not(feature = "log"))]
        $( let _ = $arg );*;
    }
}
