//! Attribute naming and typing.
//!
//! Atom names may encode an attribute and a bucket, e.g. `price__low` belongs
//! to attribute `price`. The mapping is injected through [`AttributeNaming`]
//! rather than hardcoded, so alternative conventions can be plugged in.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default separator between attribute and bucket in an atom name.
pub const DEFAULT_SEPARATOR: &str = "__";

/// Maps an atom name to the attribute it describes.
pub trait AttributeNaming {
    fn attribute<'a>(&self, atom: &'a str) -> &'a str;
}

impl<F> AttributeNaming for F
where
    F: for<'a> Fn(&'a str) -> &'a str,
{
    fn attribute<'a>(&self, atom: &'a str) -> &'a str {
        self(atom)
    }
}

/// Splits atom names on the first occurrence of a separator.
///
/// An atom without the separator is its own attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator(String);

impl Separator {
    pub fn new(sep: impl Into<String>) -> Self {
        Self(sep.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self(DEFAULT_SEPARATOR.to_string())
    }
}

impl AttributeNaming for Separator {
    fn attribute<'a>(&self, atom: &'a str) -> &'a str {
        if self.0.is_empty() {
            return atom;
        }
        match atom.split_once(self.0.as_str()) {
            Some((attr, _bucket)) => attr,
            None => atom,
        }
    }
}

/// The default `get_attr`: split on the first `__`.
pub fn default_attribute(atom: &str) -> &str {
    match atom.split_once(DEFAULT_SEPARATOR) {
        Some((attr, _)) => attr,
        None => atom,
    }
}

/// How an attribute's scores are interpreted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    /// Exact database fact; scores are forced to 0 or 1.
    Db,
    /// Proximity / ordinal bucket score in [0,1].
    #[default]
    Prox,
    /// Text similarity score in [0,1].
    Text,
}

impl AttrType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Db => "db",
            Self::Prox => "prox",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown attribute type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute type '{0}' (expected db, prox or text)")]
pub struct UnknownAttrType(pub String);

impl FromStr for AttrType {
    type Err = UnknownAttrType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "db" => Ok(Self::Db),
            "prox" => Ok(Self::Prox),
            "text" => Ok(Self::Text),
            other => Err(UnknownAttrType(other.to_string())),
        }
    }
}

/// Attribute → type table. Unlisted attributes are [`AttrType::Prox`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSchema {
    types: HashMap<String, AttrType>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, attr: impl Into<String>, ty: AttrType) -> Self {
        self.types.insert(attr.into(), ty);
        self
    }

    pub fn insert(&mut self, attr: impl Into<String>, ty: AttrType) {
        self.types.insert(attr.into(), ty);
    }

    pub fn type_of(&self, attr: &str) -> AttrType {
        self.types.get(attr).copied().unwrap_or_default()
    }

    /// Iterate over the explicitly typed attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AttrType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, AttrType)> for AttributeSchema {
    fn from_iter<I: IntoIterator<Item = (K, AttrType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
