//! Package-level logging functions over the process-wide default logger
//!
//! Every function resolves the default at call time, so a later
//! [`init`] takes effect immediately. The recorded caller is the line that
//! called these functions.
//!
//! | style     | suffix | arguments                         |
//! |-----------|--------|-----------------------------------|
//! | variadic  | none   | `&[&dyn Display]`, space-joined   |
//! | format    | `f`    | `format_args!(...)`               |
//! | key/value | `w`    | message, alternating keys/values  |
//! | typed     | `z`    | message, `&[Field]`               |
//!
//! `panic*` functions log and then panic with the message. `fatal*`
//! functions log, flush, and exit the process with status 1.

use crate::core::field::{Field, FieldValue};
use std::fmt::{self, Display};

use crate::core::registry::current;
pub use crate::core::registry::{
    default_logger, default_sugared, init, set_default, sync, with_options,
};

#[track_caller]
pub fn debug(args: &[&dyn Display]) {
    current().sugared.debug(args);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    current().sugared.debugf(args);
}

#[track_caller]
pub fn debugw(message: &str, keys_and_values: &[FieldValue]) {
    current().sugared.debugw(message, keys_and_values);
}

#[track_caller]
pub fn debugz(message: &str, fields: &[Field]) {
    current().logger.debug(message, fields);
}

#[track_caller]
pub fn info(args: &[&dyn Display]) {
    current().sugared.info(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    current().sugared.infof(args);
}

#[track_caller]
pub fn infow(message: &str, keys_and_values: &[FieldValue]) {
    current().sugared.infow(message, keys_and_values);
}

#[track_caller]
pub fn infoz(message: &str, fields: &[Field]) {
    current().logger.info(message, fields);
}

#[track_caller]
pub fn warn(args: &[&dyn Display]) {
    current().sugared.warn(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    current().sugared.warnf(args);
}

#[track_caller]
pub fn warnw(message: &str, keys_and_values: &[FieldValue]) {
    current().sugared.warnw(message, keys_and_values);
}

#[track_caller]
pub fn warnz(message: &str, fields: &[Field]) {
    current().logger.warn(message, fields);
}

#[track_caller]
pub fn error(args: &[&dyn Display]) {
    current().sugared.error(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    current().sugared.errorf(args);
}

#[track_caller]
pub fn errorw(message: &str, keys_and_values: &[FieldValue]) {
    current().sugared.errorw(message, keys_and_values);
}

#[track_caller]
pub fn errorz(message: &str, fields: &[Field]) {
    current().logger.error(message, fields);
}

#[track_caller]
pub fn panic(args: &[&dyn Display]) {
    let sugared = current().sugared.clone();
    sugared.panic(args);
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) {
    let sugared = current().sugared.clone();
    sugared.panicf(args);
}

#[track_caller]
pub fn panicw(message: &str, keys_and_values: &[FieldValue]) {
    let sugared = current().sugared.clone();
    sugared.panicw(message, keys_and_values);
}

#[track_caller]
pub fn panicz(message: &str, fields: &[Field]) {
    let logger = current().logger.clone();
    logger.panic(message, fields);
}

#[track_caller]
pub fn fatal(args: &[&dyn Display]) -> ! {
    current().sugared.fatal(args)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    current().sugared.fatalf(args)
}

#[track_caller]
pub fn fatalw(message: &str, keys_and_values: &[FieldValue]) -> ! {
    current().sugared.fatalw(message, keys_and_values)
}

#[track_caller]
pub fn fatalz(message: &str, fields: &[Field]) -> ! {
    current().logger.fatal(message, fields)
}
