//! Logging shim.
//!
//! With the `log` feature the macros are the `log` crate's own. Without it they
//! expand to dead code that still type-checks the format arguments, so values
//! that are only ever logged do not trigger unused warnings.

#![allow(unused_macros, unused_imports)]

#[cfg(feature = "log")]
pub(crate) use ::log::{debug, error, trace};

#[cfg(not(feature = "log"))]
macro_rules! discard {
    ($($arg:tt)+) => {
        if false {
            let _ = ::std::format_args!($($arg)+);
        }
    };
}

#[cfg(not(feature = "log"))]
pub(crate) use discard as debug;
#[cfg(not(feature = "log"))]
pub(crate) use discard as error;
#[cfg(not(feature = "log"))]
pub(crate) use discard as trace;
