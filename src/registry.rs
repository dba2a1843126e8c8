//! Rule registry: names to predicates, aliases, struct-level validators.
//!
//! The registry is seeded with the built-in rules and extensible at
//! runtime. Registration is last-write-wins per name;
//! struct-level validators append and run in registration order. The
//! intended discipline is configure-once-then-validate — the engine
//! enforces it with a read-write lock (see [`crate::engine::Validator`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::path::{FieldPath, Segment};
use crate::report::Failure;
use crate::value::{Record, Value};

// ============================================================================
// PREDICATE TYPES
// ============================================================================

/// A value predicate: (candidate, rule parameter) → verdict.
///
/// `Err` is the fault channel — a malformed parameter or an inapplicable
/// value shape aborts the whole validation call instead of recording an
/// ordinary failure.
pub type ValueRule = Arc<dyn Fn(&Value, Option<&str>) -> Result<bool, Error> + Send + Sync>;

/// A cross-field predicate: (candidate, resolved sibling value) → verdict.
///
/// The sibling is resolved by the evaluator from the enclosing record
/// using the rule's parameter as the field name.
pub type CrossFieldRule = Arc<dyn Fn(&Value, &Value) -> Result<bool, Error> + Send + Sync>;

/// A struct-level predicate: inspects a whole record and reports any
/// violations through the [`StructReport`] callback.
pub type StructLevelRule = Arc<dyn Fn(&Record, &mut StructReport) + Send + Sync>;

/// A resolved registry entry.
#[derive(Clone)]
pub enum RuleImpl {
    /// Plain value predicate.
    Value(ValueRule),
    /// Cross-field predicate; its tag parameter names the sibling.
    CrossField(CrossFieldRule),
}

// ============================================================================
// STRUCT-LEVEL REPORTING
// ============================================================================

/// Reporting callback handed to struct-level validators.
///
/// Failures reported here are appended after all leaf failures, rooted at
/// the path of the record the validator ran against.
pub struct StructReport {
    base: FieldPath,
    failures: Vec<Failure>,
}

impl StructReport {
    pub(crate) fn new(base: FieldPath) -> Self {
        Self {
            base,
            failures: Vec::new(),
        }
    }

    /// Records one violation.
    ///
    /// `field` names the violating field in the failure path;
    /// `struct_field` is the declared name and is used as a fallback when
    /// `field` is empty. An empty `param` is recorded as no parameter.
    pub fn report(
        &mut self,
        value: impl Into<Value>,
        field: &'static str,
        struct_field: &'static str,
        rule: &str,
        param: &str,
    ) {
        let name = if field.is_empty() { struct_field } else { field };
        let param = if param.is_empty() {
            None
        } else {
            Some(param.to_string())
        };
        let path = self.base.child(Segment::Field(name));
        self.failures.push(Failure::new(path, rule, param, value.into()));
    }

    pub(crate) fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Name → predicate tables plus aliases and struct-level validators.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, RuleImpl>,
    aliases: HashMap<String, String>,
    struct_rules: HashMap<String, Vec<StructLevelRule>>,
}

impl Registry {
    /// An empty registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in rules.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        crate::rules::install(&mut registry);
        registry
    }

    /// Registers (or overwrites) a value predicate under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Value, Option<&str>) -> Result<bool, Error> + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), RuleImpl::Value(Arc::new(rule)));
    }

    /// Registers (or overwrites) a cross-field predicate under `name`.
    pub fn register_cross_field<F>(&mut self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Value, &Value) -> Result<bool, Error> + Send + Sync + 'static,
    {
        self.rules
            .insert(name.into(), RuleImpl::CrossField(Arc::new(rule)));
    }

    /// Registers (or overwrites) a textual alias.
    ///
    /// Aliases are consulted before rule names at parse time, so an alias
    /// shadows a rule of the same name.
    pub fn register_alias(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.aliases.insert(name.into(), expansion.into());
    }

    /// Appends a struct-level validator for records with `type_key`.
    pub fn register_struct_level<F>(&mut self, type_key: impl Into<String>, rule: F)
    where
        F: Fn(&Record, &mut StructReport) + Send + Sync + 'static,
    {
        self.struct_rules
            .entry(type_key.into())
            .or_default()
            .push(Arc::new(rule));
    }

    /// Looks up a predicate by name.
    pub fn resolve(&self, name: &str) -> Result<&RuleImpl, Error> {
        self.rules.get(name).ok_or_else(|| Error::UnknownRule {
            name: name.to_string(),
        })
    }

    /// The alias table, as consumed by the tag parser.
    #[must_use]
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Struct-level validators for a type key, in registration order.
    #[must_use]
    pub fn struct_rules(&self, type_key: &str) -> &[StructLevelRule] {
        self.struct_rules.get(type_key).map_or(&[], Vec::as_slice)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.rules.keys().collect();
        names.sort();
        f.debug_struct("Registry")
            .field("rules", &names)
            .field("aliases", &self.aliases)
            .field("struct_rules", &self.struct_rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
