//! Fatal error taxonomy.
//!
//! These are the faults that abort a validation call outright: a broken
//! rule-tag declaration, a reference to a rule or sibling field that does
//! not exist, unbounded nesting, or a predicate that could not run at all.
//! Expected business outcomes (a value failing a rule) are *not* errors —
//! they accumulate in a [`Report`](crate::report::Report) instead.

use thiserror::Error;

/// A fatal validation fault.
///
/// Returned as the `Err` arm of every engine entry point. When any of
/// these surface, no partial [`Report`](crate::report::Report) is
/// produced — the declaration or the registration must be fixed by the
/// caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The rule string itself is syntactically broken.
    ///
    /// Detected at parse time: empty rule names, `endkeys` without `keys`,
    /// `keys` outside a dive level, alias expansion that never terminates.
    #[error("malformed tag `{tag}`: {reason}")]
    MalformedTag {
        /// The offending rule string, as written in the declaration.
        tag: String,
        /// What exactly is wrong with it.
        reason: String,
    },

    /// A rule name that is neither a built-in nor registered.
    #[error("unknown rule `{name}`")]
    UnknownRule {
        /// The unresolved rule name.
        name: String,
    },

    /// A cross-field rule referenced a sibling that the enclosing record
    /// does not have.
    #[error("rule `{rule}` references field `{field}`, which does not exist on `{type_key}`")]
    FieldNotFound {
        /// The cross-field rule that performed the lookup.
        rule: String,
        /// The missing sibling field name.
        field: String,
        /// Type key of the enclosing record.
        type_key: String,
    },

    /// Value nesting went past the configured recursion bound.
    ///
    /// Guards against self-referential or degenerately deep structures;
    /// raise the bound via
    /// [`ValidatorBuilder::max_depth`](crate::engine::ValidatorBuilder::max_depth)
    /// if legitimate data trips it.
    #[error("value nesting exceeds the maximum depth of {limit}")]
    MaxDepthExceeded {
        /// The configured depth limit.
        limit: usize,
    },

    /// A predicate faulted instead of returning a verdict.
    ///
    /// Distinct from an ordinary `false` result: a malformed parameter
    /// (`min=abc`) or a type the rule cannot operate on ends up here.
    #[error("rule `{rule}` could not run: {reason}")]
    Rule {
        /// The rule that faulted.
        rule: String,
        /// Why it could not produce a verdict.
        reason: String,
    },
}

impl Error {
    /// Builds a [`Error::MalformedTag`].
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`Error::Rule`] predicate fault.
    pub fn rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
