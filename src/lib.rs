//! # tagcheck
//!
//! A declarative rule-tag validation engine for nested data structures.
//!
//! Records describe themselves as ordered `(field, rule tag, value)`
//! tables; the engine parses tags like
//! `"required,dive,keys,required,min=1,endkeys,dive"` and walks the value
//! tree, accumulating every failure with a unique field path.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tagcheck::prelude::*;
//!
//! struct LoginRequest {
//!     username: String,
//!     password: String,
//! }
//!
//! impl Describe for LoginRequest {
//!     fn describe(&self) -> Record {
//!         record!("LoginRequest" {
//!             "Username": "required,email" => &self.username,
//!             "Password": "required,min=5" => &self.password,
//!         })
//!     }
//! }
//!
//! let validator = Validator::new();
//! let report = validator.validate_struct(&login_request)?;
//! assert!(report.is_empty());
//! ```
//!
//! ## Rule strings
//!
//! Comma-separated tokens; `=` introduces a parameter, `|` separates OR
//! alternatives, `!` negates, `oneof` takes a space-separated literal set.
//! `dive` applies the following rules to each element of a collection;
//! `keys … endkeys` scopes rules to the keys of a map. Aliases registered
//! via [`Validator::register_alias`] expand textually at parse time.
//!
//! ## Custom rules
//!
//! - Value predicates: [`Validator::register`] — `(value, param) → bool`.
//! - Cross-field predicates: [`Validator::register_cross_field`] — the tag
//!   parameter names a sibling field (`eqfield=Password`).
//! - Struct-level validators: [`Validator::register_struct_level`] —
//!   whole-record invariants, reported through [`StructReport`].
//!
//! Failures are data, not faults: they accumulate in a [`Report`]. Broken
//! declarations (bad tag syntax, unknown rules, missing siblings, runaway
//! nesting, predicate faults) abort with [`Error`] instead.

pub mod engine;
pub mod error;
mod eval;
mod macros;
pub mod path;
pub mod registry;
pub mod report;
pub(crate) mod rules;
pub mod tag;
pub mod value;
mod walk;

pub mod prelude;

pub use engine::{DEFAULT_MAX_DEPTH, Validator, ValidatorBuilder};
pub use error::Error;
pub use path::{FieldPath, Segment};
pub use registry::{CrossFieldRule, Registry, RuleImpl, StructLevelRule, StructReport, ValueRule};
pub use report::{Failure, Report};
pub use tag::{FieldRules, RuleGroup, RuleSpec};
pub use value::{Describe, Record, RecordField, Value};
