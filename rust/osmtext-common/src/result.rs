//! The `Result` alias shared by the osmtext crates, and the precondition checks
//! used on caller arguments and on fetched documents.

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `ErrorKind::InvalidArgument` from the enclosing function unless the
/// condition holds.
///
/// The message is the stringified condition, or the given format arguments.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $cond:expr) => {
        $crate::result::check_arg($cond, stringify!($name), || stringify!($cond).to_string())?
    };
    ($name:expr, $cond:expr, $($fmt:tt)+) => {
        $crate::result::check_arg($cond, stringify!($name), || format!($($fmt)+))?
    };
}

/// Returns `ErrorKind::InvalidFormat` from the enclosing function unless the
/// condition on a document element holds.
#[macro_export]
macro_rules! verify_data {
    ($element:expr, $cond:expr) => {
        $crate::result::check_data($cond, stringify!($element), || stringify!($cond).to_string())?
    };
    ($element:expr, $cond:expr, $($fmt:tt)+) => {
        $crate::result::check_data($cond, stringify!($element), || format!($($fmt)+))?
    };
}

#[inline]
pub fn check_arg(predicate: bool, name: &str, message: impl FnOnce() -> String) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(Error::invalid_arg(name, message()))
    }
}

#[inline]
pub fn check_data(
    predicate: bool,
    element: &str,
    message: impl FnOnce() -> String,
) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(Error::invalid_format(element, message()))
    }
}
