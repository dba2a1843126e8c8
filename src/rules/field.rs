//! Cross-field rules.

use crate::error::Error;
use crate::value::Value;

/// `eqfield=Other` — equal to the sibling field named by the parameter.
///
/// The evaluator resolves the sibling from the enclosing record before
/// this predicate runs; comparison is structural equality on the dynamic
/// value.
pub(crate) fn eqfield(value: &Value, sibling: &Value) -> Result<bool, Error> {
    Ok(value == sibling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_pass() {
        assert!(eqfield(&Value::from("rahasia"), &Value::from("rahasia")).unwrap());
        assert!(eqfield(&Value::from(5i64), &Value::from(5i64)).unwrap());
    }

    #[test]
    fn different_values_fail() {
        assert!(!eqfield(&Value::from("rahasia"), &Value::from("rahasisa")).unwrap());
        // different shapes are never equal
        assert!(!eqfield(&Value::from("5"), &Value::from(5i64)).unwrap());
    }
}
