//! Failure addressing: where in a nested structure a rule fired.
//!
//! A [`FieldPath`] is an ordered run of [`Segment`]s — struct field names,
//! collection indices, map keys — rendered in the familiar
//! `Addresses[1].Country` / `Schools[SD].Name` shape.

use std::fmt;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A record field, by declared name.
    Field(&'static str),
    /// An ordered-collection element, by index.
    Index(usize),
    /// A keyed-collection entry, by key.
    Key(String),
}

/// The unique location of a validated leaf within one validation run.
///
/// Paths are cheap to clone: most stay inline in a small vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: SmallVec<[Segment; 4]>,
}

impl FieldPath {
    /// The empty path — the root of the walked value.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// All segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The innermost field name, if the path ends at a named field.
    #[must_use]
    pub fn leaf_field(&self) -> Option<&'static str> {
        match self.segments.last() {
            Some(Segment::Field(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Index(idx) => write!(f, "[{idx}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
