//! Dynamic value model and the record descriptor surface.
//!
//! Validation operates on [`Value`] trees rather than on Rust types
//! directly: application records implement [`Describe`], which materializes
//! a [`Record`] — an ordered table of `(field name, rule tag, value)`
//! entries plus an explicit type key. This is the descriptor-table approach
//! to generic traversal: no runtime reflection, every shape is declared at
//! the boundary.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tagcheck::{Describe, Record};
//!
//! struct LoginRequest {
//!     username: String,
//!     password: String,
//! }
//!
//! impl Describe for LoginRequest {
//!     fn describe(&self) -> Record {
//!         Record::new("LoginRequest")
//!             .field("Username", "required,email", &self.username)
//!             .field("Password", "required,min=5", &self.password)
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically-typed value under validation.
///
/// Collections are ordered: lists keep element order, maps keep insertion
/// order (conversions from `BTreeMap` arrive sorted). Validating the same
/// tree twice therefore yields the same failures in the same order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absent value (`Option::None`, a missing nested record).
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered collection.
    List(Vec<Value>),
    /// A string-keyed collection in a fixed order.
    Map(Vec<(String, Value)>),
    /// A nested record with its own field tags.
    Record(Record),
}

impl Value {
    /// Builds an ordered map value from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a list of records from a slice of describable items.
    pub fn records<T: Describe>(items: &[T]) -> Self {
        Value::List(
            items
                .iter()
                .map(|item| Value::Record(item.describe()))
                .collect(),
        )
    }

    /// Builds a map of records, keys in sorted order.
    pub fn record_map<T: Describe>(entries: &BTreeMap<String, T>) -> Self {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::Record(v.describe())))
                .collect(),
        )
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload widened to `f64`, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for the zero value of each shape.
    ///
    /// Mirrors zero-value semantics: `null`, `false`, `0`, `0.0`, the empty
    /// string, the empty collection. A record is zero when every field is
    /// zero; an absent record is `Null`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(record) => record.is_zero(),
        }
    }

    /// The magnitude `min`/`max` compare against: the numeric value for
    /// numbers, the length for strings (chars) and collections, 0 for null.
    ///
    /// `None` for shapes that have no meaningful size (bool, record).
    pub(crate) fn measure(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => Some(s.chars().count() as f64),
            Value::List(items) => Some(items.len() as f64),
            Value::Map(entries) => Some(entries.len() as f64),
            Value::Bool(_) | Value::Record(_) => None,
        }
    }

    /// Shape name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Converts a `serde_json::Value` into the engine's value model.
    ///
    /// Objects become ordered maps (serde_json iterates keys in sorted
    /// order); there is no way to produce a `Record` from JSON — attach
    /// tags via [`Describe`] instead.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts this value into a `serde_json::Value`.
    ///
    /// Records serialize as objects of their field values; tags and type
    /// keys are not part of the data representation.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Uint(u) => serde_json::Value::from(*u),
            Value::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Record(record) => serde_json::Value::Object(
                record
                    .fields()
                    .iter()
                    .map(|f| (f.name().to_string(), f.value().to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.fields().len()))?;
                for field in record.fields() {
                    map.serialize_entry(field.name(), field.value())?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! value_from_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

macro_rules! value_from_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Uint(u64::from(v))
            }
        }
    )*};
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&Vec<T>> for Value {
    fn from(items: &Vec<T>) -> Self {
        Value::from(items.as_slice())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
        )
    }
}

impl<T: Clone + Into<Value>> From<&BTreeMap<String, T>> for Value {
    fn from(entries: &BTreeMap<String, T>) -> Self {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().into()))
                .collect(),
        )
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A described record: an explicit type key plus fields in declaration
/// order, each carrying its rule tag.
///
/// The accessor surface (`field_names`, `get`) is what cross-field rules
/// and struct-level validators operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_key: &'static str,
    fields: Vec<RecordField>,
}

/// One field of a [`Record`]: name, rule tag, and the materialized value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    name: &'static str,
    tag: &'static str,
    value: Value,
}

impl Record {
    /// Starts a record with an application-supplied type key.
    ///
    /// The key is the handle struct-level validators are registered
    /// against; it is never inferred from Rust type identity.
    #[must_use]
    pub fn new(type_key: &'static str) -> Self {
        Self {
            type_key,
            fields: Vec::new(),
        }
    }

    /// Appends a field with its rule tag. Declaration order is walk order.
    #[must_use]
    pub fn field(
        mut self,
        name: &'static str,
        tag: &'static str,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.push(RecordField {
            name,
            tag,
            value: value.into(),
        });
        self
    }

    /// The type key supplied at construction.
    #[must_use]
    pub fn type_key(&self) -> &'static str {
        self.type_key
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// True when every field holds its zero value (or there are none).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fields.iter().all(|f| f.value.is_zero())
    }
}

impl RecordField {
    /// The field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared rule tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The materialized value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

// ============================================================================
// DESCRIBE
// ============================================================================

/// Implemented per application record type: materializes the descriptor
/// table the engine walks.
///
/// Nested records are described recursively — see
/// [`Value::records`] / [`Value::record_map`] for collections of them.
pub trait Describe {
    /// Builds the record descriptor for this value.
    fn describe(&self) -> Record;

    /// This value as a [`Value::Record`].
    fn to_value(&self) -> Value {
        Value::Record(self.describe())
    }
}

/// A record describes itself.
impl Describe for Record {
    fn describe(&self) -> Record {
        self.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================
