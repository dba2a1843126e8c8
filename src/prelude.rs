//! Prelude module for convenient imports.
//!
//! A single `use tagcheck::prelude::*;` brings in everything needed to
//! describe records, run validations, and register custom rules.

pub use crate::engine::{DEFAULT_MAX_DEPTH, Validator, ValidatorBuilder};
pub use crate::error::Error;
pub use crate::path::{FieldPath, Segment};
pub use crate::record;
pub use crate::registry::{Registry, RuleImpl, StructReport};
pub use crate::report::{Failure, Report};
pub use crate::tag::{FieldRules, RuleGroup, RuleSpec};
pub use crate::value::{Describe, Record, RecordField, Value};
