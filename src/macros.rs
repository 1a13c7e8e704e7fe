//! Logging macros over the process-wide default logger.
//!
//! The `*f!` macros take a `format!`-style template; the `*w!` macros take
//! a message followed by alternating keys and values, each converted with
//! `FieldValue::from`. Both record the macro's call site as the caller.
//!
//! # Examples
//!
//! ```
//! use xlog::{infof, infow, warnf};
//!
//! let port = 8080;
//! infof!("listening on port {}", port);
//! infow!("request served", "path", "/health", "status", 200u16);
//! warnf!("{} retries left", 2);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// use xlog::{logf, LogLevel};
/// logf!(LogLevel::Info, "Simple message");
/// logf!(LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($level:expr, $($arg:tt)+) => {
        $crate::default_sugared().logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a message with alternating keys and values at an explicit level.
#[macro_export]
macro_rules! logw {
    ($level:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::default_sugared().logw($level, $msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::facade::debugf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::facade::infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::facade::warnf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::facade::errorf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message, then panic with it.
///
/// ```should_panic
/// xlog::panicf!("invariant broken: {}", "queue empty");
/// ```
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::facade::panicf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message, flush, and exit with status 1.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::facade::fatalf(::std::format_args!($($arg)+))
    };
}

/// Log a message with alternating keys and values at debug level.
///
/// # Examples
///
/// ```
/// use xlog::debugw;
/// debugw!("cache miss", "key", "user:42", "ttl_secs", 30u32);
/// // A trailing key without a value is recorded as `ignored`
/// debugw!("odd list", "orphan");
/// ```
#[macro_export]
macro_rules! debugw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::debugw($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! infow {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::infow($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! warnw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::warnw($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! errorw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::errorw($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! panicw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::panicw($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}

#[macro_export]
macro_rules! fatalw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::facade::fatalw($msg, &[$($crate::FieldValue::from($kv)),*])
    };
}
