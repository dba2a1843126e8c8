//! The non-fatal outcome channel: individual failures and the ordered
//! report a validation call returns.
//!
//! Failures accumulate — one per failing rule — and never abort the run.
//! An empty [`Report`] means the input is valid; callers must not read
//! anything into the distinction between "no report" and "empty report"
//! (there is none: the engine always returns a `Report`).

use std::fmt;

use serde::Serialize;

use crate::path::FieldPath;
use crate::value::Value;

// ============================================================================
// FAILURE
// ============================================================================

/// One rule that one leaf failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    path: FieldPath,
    rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    param: Option<String>,
    actual: Value,
}

impl Failure {
    /// Builds a failure record.
    #[must_use]
    pub fn new(path: FieldPath, rule: impl Into<String>, param: Option<String>, actual: Value) -> Self {
        Self {
            path,
            rule: rule.into(),
            param,
            actual,
        }
    }

    /// Where the rule fired.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The rule name, as written in the tag (first alternative for a
    /// failed alternation group).
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The rule parameter, if the tag carried one.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// The value that failed.
    #[must_use]
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// This failure as a JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path.to_string(),
            "rule": self.rule,
            "param": self.param,
            "actual": self.actual.to_json(),
        })
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "value failed rule `{}`", self.rule)?;
        } else {
            write!(f, "`{}` failed rule `{}`", self.path, self.rule)?;
        }
        if let Some(param) = &self.param {
            write!(f, " (param: {param})")?;
        }
        Ok(())
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// The ordered failure sequence of one validation run.
///
/// Leaf failures come first, in walk order (field declaration order, then
/// element/key order); struct-level failures follow. Re-validating the
/// same input yields an identical report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    failures: Vec<Failure>,
}

impl Report {
    /// An empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one failure.
    pub fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Appends all failures from an iterator.
    pub fn extend(&mut self, failures: impl IntoIterator<Item = Failure>) {
        self.failures.extend(failures);
    }

    /// True when the input validated cleanly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// All failures in order.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Iterates over the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.failures.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// For callers that prefer a `Result` boundary over inspecting the
    /// report.
    pub fn into_result(self) -> Result<(), Report> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// This report as a JSON array.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Array(self.failures.iter().map(Failure::to_json_value).collect())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} failure(s):", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for Report {}

impl IntoIterator for Report {
    type Item = Failure;
    type IntoIter = std::vec::IntoIter<Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

impl FromIterator<Failure> for Report {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;

    fn sample() -> Failure {
        let path = FieldPath::root().child(Segment::Field("Name"));
        Failure::new(path, "max", Some("255".into()), Value::from("x"))
    }

    #[test]
    fn display_includes_path_rule_and_param() {
        let text = sample().to_string();
        assert!(text.contains("Name"));
        assert!(text.contains("max"));
        assert!(text.contains("255"));
    }

    #[test]
    fn root_failure_displays_without_path() {
        let failure = Failure::new(FieldPath::root(), "required", None, Value::Null);
        assert_eq!(failure.to_string(), "value failed rule `required`");
    }

    #[test]
    fn into_result_is_err_only_when_non_empty() {
        assert!(Report::new().into_result().is_ok());

        let mut report = Report::new();
        report.push(sample());
        let err = report.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn report_json_shape() {
        let mut report = Report::new();
        report.push(sample());
        let json = report.to_json_value();
        assert_eq!(json[0]["path"], "Name");
        assert_eq!(json[0]["rule"], "max");
    }
}
