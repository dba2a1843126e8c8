//! Value walker: turns a record tree into a sequence of addressable leaves.
//!
//! The walker drives two callbacks. `on_leaf` fires once per (path, value,
//! checks) triple, in deterministic order: field declaration order, then
//! element index / map key order, keys before values within a map entry.
//! `on_record` fires once per record encountered (root first, walk order)
//! and feeds the engine's struct-level phase.
//!
//! Traversal modes per level:
//!
//! 1. **Plain field** — checks apply to the value itself; a nested record
//!    descends only when the field's rules carry a `dive` marker,
//!    otherwise it is validated as an opaque value.
//! 2. **Ordered collection + `dive`** — one sub-path per element,
//!    index-suffixed; the post-`dive` rules apply to every element.
//! 3. **Keyed collection + `dive`** — per entry, the `keys … endkeys`
//!    rules run against the key, the remaining rules against the value.
//!
//! A record reached as a collection element descends into its own field
//! tags when the per-element rules are vacuous (the common
//! `"required,dive"` shape) or carry their own `dive` marker.
//!
//! An empty collection simply has no elements to visit, so `required`
//! fires at the container path only; an absent (`Null`) value never
//! descends. Depth is bounded: exceeding `max_depth` aborts the walk with
//! [`Error::MaxDepthExceeded`].

use std::collections::HashMap;

use crate::error::Error;
use crate::path::{FieldPath, Segment};
use crate::tag::{self, FieldRules, RuleGroup};
use crate::value::{Record, Value};

/// One leaf surfaced for evaluation.
pub(crate) struct Leaf<'w> {
    /// Unique location of the leaf within this run.
    pub path: &'w FieldPath,
    /// The value under validation (for map keys, the key as a string).
    pub value: &'w Value,
    /// Checks that apply at this level.
    pub checks: &'w [RuleGroup],
    /// The record whose field declared these rules; cross-field siblings
    /// resolve against it.
    pub enclosing: &'w Record,
}

pub(crate) type LeafSink<'s> = dyn FnMut(Leaf<'_>) -> Result<(), Error> + 's;
pub(crate) type RecordSink<'a, 's> = dyn FnMut(&FieldPath, &'a Record) + 's;

pub(crate) struct Walker<'r> {
    aliases: &'r HashMap<String, String>,
    max_depth: usize,
}

impl<'r> Walker<'r> {
    pub fn new(aliases: &'r HashMap<String, String>, max_depth: usize) -> Self {
        Self { aliases, max_depth }
    }

    /// Walks a record: parses each field's tag, then recurses per the
    /// traversal modes above.
    pub fn walk_record<'a>(
        &self,
        record: &'a Record,
        path: &FieldPath,
        depth: usize,
        on_leaf: &mut LeafSink<'_>,
        on_record: &mut RecordSink<'a, '_>,
    ) -> Result<(), Error> {
        if depth >= self.max_depth {
            return Err(Error::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }
        on_record(path, record);
        for field in record.fields() {
            let rules = tag::parse(field.tag(), self.aliases)?;
            let field_path = path.child(Segment::Field(field.name()));
            self.walk_value(
                field.value(),
                &rules,
                &field_path,
                record,
                depth + 1,
                on_leaf,
                on_record,
            )?;
        }
        Ok(())
    }

    /// Walks a free-standing value against pre-parsed rules (the
    /// `validate_value` entry point).
    pub fn walk_detached(
        &self,
        value: &Value,
        rules: &FieldRules,
        enclosing: &Record,
        on_leaf: &mut LeafSink<'_>,
    ) -> Result<(), Error> {
        let mut ignore_records = |_: &FieldPath, _: &Record| {};
        self.walk_value(
            value,
            rules,
            &FieldPath::root(),
            enclosing,
            0,
            on_leaf,
            &mut ignore_records,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_value<'a>(
        &self,
        value: &'a Value,
        rules: &FieldRules,
        path: &FieldPath,
        enclosing: &'a Record,
        depth: usize,
        on_leaf: &mut LeafSink<'_>,
        on_record: &mut RecordSink<'a, '_>,
    ) -> Result<(), Error> {
        if depth >= self.max_depth {
            return Err(Error::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }
        if !rules.checks.is_empty() {
            on_leaf(Leaf {
                path,
                value,
                checks: &rules.checks,
                enclosing,
            })?;
        }
        match value {
            Value::Record(inner) => {
                if rules.dive.is_some() {
                    self.walk_record(inner, path, depth + 1, on_leaf, on_record)?;
                }
            }
            Value::List(items) => {
                if let Some(sub) = rules.dive.as_deref() {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = path.child(Segment::Index(index));
                        self.walk_element(
                            item, sub, &item_path, enclosing, depth + 1, on_leaf, on_record,
                        )?;
                    }
                }
            }
            Value::Map(entries) => {
                if let Some(sub) = rules.dive.as_deref() {
                    for (key, entry_value) in entries {
                        let entry_path = path.child(Segment::Key(key.clone()));
                        if let Some(key_rules) = sub.keys.as_deref() {
                            if !key_rules.checks.is_empty() {
                                let key_value = Value::Str(key.clone());
                                on_leaf(Leaf {
                                    path: &entry_path,
                                    value: &key_value,
                                    checks: &key_rules.checks,
                                    enclosing,
                                })?;
                            }
                        }
                        self.walk_element(
                            entry_value,
                            sub,
                            &entry_path,
                            enclosing,
                            depth + 1,
                            on_leaf,
                            on_record,
                        )?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Walks one collection element / map value.
    #[allow(clippy::too_many_arguments)]
    fn walk_element<'a>(
        &self,
        value: &'a Value,
        sub: &FieldRules,
        path: &FieldPath,
        enclosing: &'a Record,
        depth: usize,
        on_leaf: &mut LeafSink<'_>,
        on_record: &mut RecordSink<'a, '_>,
    ) -> Result<(), Error> {
        // A record element with vacuous per-element rules is validated by
        // its own field tags.
        if let Value::Record(inner) = value {
            if sub.checks.is_empty() && sub.dive.is_none() {
                return self.walk_record(inner, path, depth, on_leaf, on_record);
            }
        }
        self.walk_value(value, sub, path, enclosing, depth, on_leaf, on_record)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_leaves(record: &Record) -> Vec<String> {
        let aliases = HashMap::new();
        let walker = Walker::new(&aliases, 32);
        let mut leaves = Vec::new();
        walker
            .walk_record(
                record,
                &FieldPath::root(),
                0,
                &mut |leaf: Leaf<'_>| {
                    for group in leaf.checks {
                        leaves.push(format!("{}:{}", leaf.path, group.alternatives[0].name));
                    }
                    Ok(())
                },
                &mut |_, _| {},
            )
            .expect("walk should succeed");
        leaves
    }

    fn address(city: &str, country: &str) -> Record {
        Record::new("Address")
            .field("City", "required,max=255", city)
            .field("Country", "required,max=255", country)
    }

    #[test]
    fn plain_fields_emit_in_declaration_order() {
        let record = Record::new("LoginRequest")
            .field("Username", "required,email", "santoso@gmail.com")
            .field("Password", "required,min=5", "rahasia");
        assert_eq!(
            collect_leaves(&record),
            vec![
                "Username:required",
                "Username:email",
                "Password:required",
                "Password:min",
            ]
        );
    }

    #[test]
    fn nested_record_without_dive_is_opaque() {
        let record = Record::new("User")
            .field("Name", "required", "Joko")
            .field("Address", "required", Value::Record(address("Jakarta", "Indonesia")));
        assert_eq!(collect_leaves(&record), vec!["Name:required", "Address:required"]);
    }

    #[test]
    fn nested_record_with_dive_descends() {
        let record = Record::new("User")
            .field("Address", "required,dive", Value::Record(address("Jakarta", "")));
        assert_eq!(
            collect_leaves(&record),
            vec![
                "Address:required",
                "Address.City:required",
                "Address.City:max",
                "Address.Country:required",
                "Address.Country:max",
            ]
        );
    }

    #[test]
    fn list_dive_emits_indexed_elements() {
        let record = Record::new("User").field(
            "Addresses",
            "required,dive",
            Value::records(&[address("Jakarta", "Indonesia"), address("Bandung", "")]),
        );
        let leaves = collect_leaves(&record);
        assert!(leaves.contains(&"Addresses[0].City:required".to_string()));
        assert!(leaves.contains(&"Addresses[1].Country:required".to_string()));
    }

    #[test]
    fn list_dive_applies_element_checks() {
        let record = Record::new("User").field(
            "Hobbies",
            "required,dive,required,min=1",
            vec!["football", ""],
        );
        assert_eq!(
            collect_leaves(&record),
            vec![
                "Hobbies:required",
                "Hobbies[0]:required",
                "Hobbies[0]:min",
                "Hobbies[1]:required",
                "Hobbies[1]:min",
            ]
        );
    }

    #[test]
    fn map_dive_emits_keys_before_values() {
        let record = Record::new("User").field(
            "Wallet",
            "required,dive,keys,required,endkeys,required,gt=0",
            Value::map([("IDR", 0i64), ("USD", 100i64)]),
        );
        assert_eq!(
            collect_leaves(&record),
            vec![
                "Wallet:required",
                "Wallet[IDR]:required", // the key itself
                "Wallet[IDR]:required",
                "Wallet[IDR]:gt",
                "Wallet[USD]:required",
                "Wallet[USD]:required",
                "Wallet[USD]:gt",
            ]
        );
    }

    #[test]
    fn map_of_records_descends_per_value() {
        let school = Record::new("School").field("Name", "required,max=255", "");
        let record = Record::new("User").field(
            "Schools",
            "required,dive,keys,required,min=1,endkeys,dive",
            Value::map([("SD", Value::Record(school))]),
        );
        let leaves = collect_leaves(&record);
        assert!(leaves.contains(&"Schools[SD]:required".to_string()));
        assert!(leaves.contains(&"Schools[SD]:min".to_string()));
        assert!(leaves.contains(&"Schools[SD].Name:required".to_string()));
    }

    #[test]
    fn empty_collection_emits_container_only() {
        let record = Record::new("User").field(
            "Addresses",
            "required,dive",
            Value::List(vec![]),
        );
        assert_eq!(collect_leaves(&record), vec!["Addresses:required"]);
    }

    #[test]
    fn null_value_never_descends() {
        let record = Record::new("User").field("Address", "required,dive", Value::Null);
        assert_eq!(collect_leaves(&record), vec!["Address:required"]);
    }

    #[test]
    fn records_are_reported_in_walk_order() {
        let record = Record::new("User").field(
            "Addresses",
            "required,dive",
            Value::records(&[address("Jakarta", "Indonesia")]),
        );
        let aliases = HashMap::new();
        let walker = Walker::new(&aliases, 32);
        let mut seen = Vec::new();
        walker
            .walk_record(
                &record,
                &FieldPath::root(),
                0,
                &mut |_: Leaf<'_>| Ok(()),
                &mut |path, rec| seen.push((path.to_string(), rec.type_key())),
            )
            .unwrap();
        assert_eq!(
            seen,
            vec![
                (String::new(), "User"),
                ("Addresses[0]".to_string(), "Address"),
            ]
        );
    }

    #[test]
    fn runaway_nesting_is_bounded() {
        let mut inner = Record::new("Node").field("Leaf", "required", 1i64);
        for _ in 0..40 {
            inner = Record::new("Node").field("Next", "required,dive", inner);
        }
        let aliases = HashMap::new();
        let walker = Walker::new(&aliases, 32);
        let err = walker
            .walk_record(
                &inner,
                &FieldPath::root(),
                0,
                &mut |_: Leaf<'_>| Ok(()),
                &mut |_, _| {},
            )
            .unwrap_err();
        assert!(matches!(err, Error::MaxDepthExceeded { limit: 32 }));
    }
}
