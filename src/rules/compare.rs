//! Strict numeric comparison rules: `gt` and `lt`.
//!
//! Unlike `min`/`max` these never fall back to length semantics: a
//! non-numeric operand is a predicate fault.

use crate::error::Error;
use crate::rules::numeric_param;
use crate::value::Value;

fn operand(rule: &'static str, value: &Value) -> Result<f64, Error> {
    value.as_f64().ok_or_else(|| {
        Error::rule(rule, format!("`{}` is not numeric", value.type_name()))
    })
}

/// `gt=N` — strictly greater than `N`.
pub(crate) fn gt(value: &Value, param: Option<&str>) -> Result<bool, Error> {
    let bound = numeric_param("gt", param)?;
    Ok(operand("gt", value)? > bound)
}

/// `lt=N` — strictly less than `N`.
pub(crate) fn lt(value: &Value, param: Option<&str>) -> Result<bool, Error> {
    let bound = numeric_param("lt", param)?;
    Ok(operand("lt", value)? < bound)
}
