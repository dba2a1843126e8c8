//! Constraint evaluator: runs one level's checks against one leaf.
//!
//! Every rule group in a field's chain runs — there is no short-circuit
//! within a chain, so all of a field's failures surface in one pass. An
//! alternation group passes when any alternative passes; when none do,
//! exactly one failure is recorded, tagged with the first alternative
//! (deterministic tie-break).

use crate::error::Error;
use crate::registry::{Registry, RuleImpl};
use crate::report::{Failure, Report};
use crate::tag::{RuleGroup, RuleSpec};
use crate::value::{Record, Value};
use crate::walk::Leaf;

/// Evaluates every check of a leaf, accumulating failures.
///
/// `sibling_override`, when set, short-wires cross-field resolution to a
/// fixed value (the two-value entry point); otherwise siblings resolve by
/// name from the leaf's enclosing record.
pub(crate) fn eval_leaf(
    leaf: &Leaf<'_>,
    registry: &Registry,
    sibling_override: Option<&Value>,
    report: &mut Report,
) -> Result<(), Error> {
    for group in leaf.checks {
        eval_group(group, leaf, registry, sibling_override, report)?;
    }
    Ok(())
}

fn eval_group(
    group: &RuleGroup,
    leaf: &Leaf<'_>,
    registry: &Registry,
    sibling_override: Option<&Value>,
    report: &mut Report,
) -> Result<(), Error> {
    if let [spec] = group.alternatives.as_slice() {
        if !eval_spec(spec, leaf.value, leaf.enclosing, registry, sibling_override)? {
            tracing::trace!(rule = %spec.name, path = %leaf.path, "rule failed");
            report.push(Failure::new(
                leaf.path.clone(),
                spec.name.clone(),
                spec.param.clone(),
                leaf.value.clone(),
            ));
        }
        return Ok(());
    }

    // every alternative runs, so a fault in any of them surfaces
    // deterministically regardless of which alternatives pass
    let mut passed = false;
    for spec in &group.alternatives {
        if eval_spec(spec, leaf.value, leaf.enclosing, registry, sibling_override)? {
            passed = true;
        }
    }
    if passed {
        return Ok(());
    }
    let first = &group.alternatives[0];
    tracing::trace!(rule = %first.name, path = %leaf.path, "all alternatives failed");
    report.push(Failure::new(
        leaf.path.clone(),
        first.name.clone(),
        first.param.clone(),
        leaf.value.clone(),
    ));
    Ok(())
}

fn eval_spec(
    spec: &RuleSpec,
    value: &Value,
    enclosing: &Record,
    registry: &Registry,
    sibling_override: Option<&Value>,
) -> Result<bool, Error> {
    let outcome = match registry.resolve(&spec.name)? {
        RuleImpl::Value(rule) => rule(value, spec.param.as_deref())?,
        RuleImpl::CrossField(rule) => {
            let sibling = match sibling_override {
                Some(other) => other,
                None => {
                    let field = spec.param.as_deref().ok_or_else(|| {
                        Error::rule(&spec.name, "missing sibling field parameter")
                    })?;
                    enclosing.get(field).ok_or_else(|| Error::FieldNotFound {
                        rule: spec.name.clone(),
                        field: field.to_string(),
                        type_key: enclosing.type_key().to_string(),
                    })?
                }
            };
            rule(value, sibling)?
        }
    };
    Ok(outcome != spec.negated)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{FieldPath, Segment};

    fn leaf_checks(tag: &str) -> Vec<RuleGroup> {
        let aliases = std::collections::HashMap::new();
        crate::tag::parse(tag, &aliases).unwrap().checks
    }

    fn run(tag: &str, value: &Value, enclosing: &Record) -> Result<Report, Error> {
        let registry = Registry::with_builtins();
        let path = FieldPath::root().child(Segment::Field("Field"));
        let checks = leaf_checks(tag);
        let leaf = Leaf {
            path: &path,
            value,
            checks: &checks,
            enclosing,
        };
        let mut report = Report::new();
        eval_leaf(&leaf, &registry, None, &mut report)?;
        Ok(report)
    }

    fn empty_record() -> Record {
        Record::new("Empty")
    }

    #[test]
    fn chain_does_not_short_circuit() {
        // "" fails required, min=1 and oneof in the same pass
        let report = run(
            "required,min=1,oneof=football basketball",
            &Value::from(""),
            &empty_record(),
        )
        .unwrap();
        let rules: Vec<_> = report.iter().map(Failure::rule).collect();
        assert_eq!(rules, vec!["required", "min", "oneof"]);
    }

    #[test]
    fn alternation_passes_when_any_alternative_does() {
        let report = run("email|numeric", &Value::from("123"), &empty_record()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn alternation_failure_is_tagged_with_first_alternative() {
        let report = run("email|numeric", &Value::from("abc"), &empty_record()).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.failures()[0].rule(), "email");
    }

    #[test]
    fn negation_inverts_the_verdict() {
        assert!(run("!numeric", &Value::from("abc"), &empty_record())
            .unwrap()
            .is_empty());
        assert_eq!(
            run("!numeric", &Value::from("123"), &empty_record())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn cross_field_resolves_sibling_by_name() {
        let enclosing = Record::new("RegisterRequest")
            .field("Password", "required", "rahasia")
            .field("ConfirmPassword", "required,eqfield=Password", "rahasia");
        let report = run("eqfield=Password", &Value::from("rahasia"), &enclosing).unwrap();
        assert!(report.is_empty());

        let report = run("eqfield=Password", &Value::from("rahasisa"), &enclosing).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.failures()[0].rule(), "eqfield");
    }

    #[test]
    fn missing_sibling_is_fatal() {
        let err = run("eqfield=Missing", &Value::from("x"), &empty_record()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { .. }));
    }

    #[test]
    fn unknown_rule_is_fatal() {
        let err = run("definitely_not_registered", &Value::from("x"), &empty_record()).unwrap_err();
        assert!(matches!(err, Error::UnknownRule { .. }));
    }

    #[test]
    fn predicate_fault_is_fatal_not_a_failure() {
        let err = run("min=abc", &Value::from("x"), &empty_record()).unwrap_err();
        assert!(matches!(err, Error::Rule { .. }));
    }
}
