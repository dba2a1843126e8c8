//! Validation engine: the public entry points.
//!
//! A [`Validator`] owns the rule registry and orchestrates walker and
//! evaluator. The intended lifecycle is configure-then-validate:
//! `register*` calls take the registry's write lock, every validation call
//! holds the read lock for its whole run, so concurrent validations read
//! the registry in parallel and a racing registration simply waits — it
//! can never corrupt an in-flight run.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tagcheck::{Describe, Record, Validator};
//!
//! let validator = Validator::new();
//! let report = validator.validate_value("joko", "required,min=3")?;
//! assert!(report.is_empty());
//! ```

use parking_lot::RwLock;

use crate::error::Error;
use crate::eval;
use crate::path::FieldPath;
use crate::registry::{Registry, StructReport};
use crate::report::Report;
use crate::tag;
use crate::value::{Describe, Record, Value};
use crate::walk::{Leaf, Walker};

/// Default bound on value nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

// ============================================================================
// BUILDER
// ============================================================================

/// Configures a [`Validator`].
#[derive(Debug)]
pub struct ValidatorBuilder {
    registry: Registry,
    max_depth: usize,
}

impl ValidatorBuilder {
    /// Starts from the built-in rule set and the default depth bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::with_builtins(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the nesting bound (see [`Error::MaxDepthExceeded`]).
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            registry: RwLock::new(self.registry),
            max_depth: self.max_depth,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// The validation engine.
#[derive(Debug)]
pub struct Validator {
    registry: RwLock<Registry>,
    max_depth: usize,
}

impl Validator {
    /// A validator with the built-in rules and default configuration.
    #[must_use]
    pub fn new() -> Self {
        ValidatorBuilder::new().build()
    }

    /// Starts configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Registers (or overwrites) a value predicate under `name`.
    pub fn register<F>(&self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Value, Option<&str>) -> Result<bool, Error> + Send + Sync + 'static,
    {
        self.registry.write().register(name, rule);
    }

    /// Registers (or overwrites) a cross-field predicate under `name`.
    ///
    /// The rule's tag parameter names the sibling field to resolve; the
    /// predicate receives (candidate, sibling value).
    pub fn register_cross_field<F>(&self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Value, &Value) -> Result<bool, Error> + Send + Sync + 'static,
    {
        self.registry.write().register_cross_field(name, rule);
    }

    /// Registers (or overwrites) a textual alias, expanded at parse time.
    pub fn register_alias(&self, name: impl Into<String>, expansion: impl Into<String>) {
        self.registry.write().register_alias(name, expansion);
    }

    /// Appends a struct-level validator for records with `type_key`.
    ///
    /// Struct-level validators run after leaf validation, for every record
    /// of that type encountered during the walk, in registration order.
    pub fn register_struct_level<F>(&self, type_key: impl Into<String>, rule: F)
    where
        F: Fn(&Record, &mut StructReport) + Send + Sync + 'static,
    {
        self.registry.write().register_struct_level(type_key, rule);
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validates a described record.
    ///
    /// Leaf failures come first in walk order, then struct-level failures
    /// in record-encounter order. `Ok` with an empty report means valid;
    /// `Err` is a fatal fault (broken declaration, unknown rule, missing
    /// sibling, depth bound, predicate fault) with no partial report.
    pub fn validate_struct<T: Describe>(&self, input: &T) -> Result<Report, Error> {
        self.validate_record(&input.describe())
    }

    /// Validates an already-materialized record descriptor.
    pub fn validate_record(&self, record: &Record) -> Result<Report, Error> {
        let registry = self.registry.read();
        let walker = Walker::new(registry.aliases(), self.max_depth);

        let mut report = Report::new();
        let mut encountered: Vec<(FieldPath, &Record)> = Vec::new();
        walker.walk_record(
            record,
            &FieldPath::root(),
            0,
            &mut |leaf: Leaf<'_>| eval::eval_leaf(&leaf, &registry, None, &mut report),
            &mut |path, rec| encountered.push((path.clone(), rec)),
        )?;

        for (path, rec) in encountered {
            for rule in registry.struct_rules(rec.type_key()) {
                let mut struct_report = StructReport::new(path.clone());
                rule(rec, &mut struct_report);
                report.extend(struct_report.into_failures());
            }
        }

        tracing::debug!(
            type_key = record.type_key(),
            failures = report.len(),
            "struct validation finished"
        );
        Ok(report)
    }

    /// Validates a single value against a rule string.
    ///
    /// Cross-field rules have no enclosing record here and fail with
    /// [`Error::FieldNotFound`]; use [`Validator::validate_values`] to
    /// supply the other operand.
    pub fn validate_value(&self, value: impl Into<Value>, rule: &str) -> Result<Report, Error> {
        self.validate_detached(&value.into(), None, rule)
    }

    /// Validates `value` against a rule string, resolving cross-field
    /// rules against `other`.
    pub fn validate_values(
        &self,
        value: impl Into<Value>,
        other: impl Into<Value>,
        rule: &str,
    ) -> Result<Report, Error> {
        self.validate_detached(&value.into(), Some(&other.into()), rule)
    }

    fn validate_detached(
        &self,
        value: &Value,
        sibling: Option<&Value>,
        rule: &str,
    ) -> Result<Report, Error> {
        let registry = self.registry.read();
        let rules = tag::parse(rule, registry.aliases())?;
        let walker = Walker::new(registry.aliases(), self.max_depth);

        let mut report = Report::new();
        let enclosing = Record::new("");
        walker.walk_detached(value, &rules, &enclosing, &mut |leaf: Leaf<'_>| {
            eval::eval_leaf(&leaf, &registry, sibling, &mut report)
        })?;

        tracing::debug!(rule, failures = report.len(), "value validation finished");
        Ok(report)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
