//! Size rules: `min` and `max`.
//!
//! One rule, two readings: numbers compare by value, strings by char
//! count, collections by element count. Null measures zero, so `min=1`
//! rejects an absent value while `max=255` tolerates it. Shapes with no
//! meaningful size (bool, record) are a predicate fault.

use crate::error::Error;
use crate::rules::numeric_param;
use crate::value::Value;

/// `min=N` — magnitude must be at least `N`.
pub(crate) fn min(value: &Value, param: Option<&str>) -> Result<bool, Error> {
    let limit = numeric_param("min", param)?;
    match value.measure() {
        Some(size) => Ok(size >= limit),
        None => Err(Error::rule(
            "min",
            format!("cannot measure a {}", value.type_name()),
        )),
    }
}

/// `max=N` — magnitude must be at most `N`.
pub(crate) fn max(value: &Value, param: Option<&str>) -> Result<bool, Error> {
    let limit = numeric_param("max", param)?;
    match value.measure() {
        Some(size) => Ok(size <= limit),
        None => Err(Error::rule(
            "max",
            format!("cannot measure a {}", value.type_name()),
        )),
    }
}
