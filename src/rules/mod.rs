//! Built-in rules.
//!
//! The baseline rule set every [`Registry`](crate::registry::Registry)
//! starts from:
//!
//! - **Presence**: `required`
//! - **Size**: `min`, `max` (length for strings and collections, numeric
//!   comparison for numbers)
//! - **Comparison**: `gt`, `lt` (strict numeric)
//! - **Content**: `numeric`, `email`, `oneof`
//! - **Cross-field**: `eqfield`
//!
//! All of them can be shadowed by re-registering the same name.

pub(crate) mod compare;
pub(crate) mod field;
pub(crate) mod presence;
pub(crate) mod size;
pub(crate) mod string;

use crate::error::Error;
use crate::registry::Registry;

/// Installs every built-in into `registry`.
pub(crate) fn install(registry: &mut Registry) {
    registry.register("required", presence::required);
    registry.register("min", size::min);
    registry.register("max", size::max);
    registry.register("gt", compare::gt);
    registry.register("lt", compare::lt);
    registry.register("numeric", string::numeric);
    registry.register("email", string::email);
    registry.register("oneof", string::oneof);
    registry.register_cross_field("eqfield", field::eqfield);
}

/// Parses the numeric parameter rules like `min=5` carry.
///
/// A missing or non-numeric parameter is a predicate fault, not a plain
/// failure — the declaration is broken, not the data.
pub(crate) fn numeric_param(rule: &'static str, param: Option<&str>) -> Result<f64, Error> {
    let raw = param.ok_or_else(|| Error::rule(rule, "missing parameter"))?;
    raw.parse::<f64>()
        .map_err(|_| Error::rule(rule, format!("parameter `{raw}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_param_faults_are_rule_errors() {
        assert!(matches!(
            numeric_param("min", None),
            Err(Error::Rule { .. })
        ));
        assert!(matches!(
            numeric_param("min", Some("abc")),
            Err(Error::Rule { .. })
        ));
        assert_eq!(numeric_param("min", Some("5")).unwrap(), 5.0);
    }
}
