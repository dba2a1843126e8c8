//! Presence rule.

use crate::error::Error;
use crate::value::Value;

/// `required` — fails on the zero value of any shape.
///
/// Null, `false`, `0`, `0.0`, the empty string, the empty collection, and
/// a record whose fields are all zero are all "not present".
pub(crate) fn required(value: &Value, _param: Option<&str>) -> Result<bool, Error> {
    Ok(!value.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_values() {
        assert!(!required(&Value::Null, None).unwrap());
        assert!(!required(&Value::from(""), None).unwrap());
        assert!(!required(&Value::from(0i64), None).unwrap());
        assert!(!required(&Value::List(vec![]), None).unwrap());
        assert!(!required(&Value::Bool(false), None).unwrap());
    }

    #[test]
    fn accepts_non_zero_values() {
        assert!(required(&Value::from("joko"), None).unwrap());
        assert!(required(&Value::from(1i64), None).unwrap());
        assert!(required(&Value::Bool(true), None).unwrap());
        assert!(required(&Value::List(vec![Value::Null]), None).unwrap());
    }
}
