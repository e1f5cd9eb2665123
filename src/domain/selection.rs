//! Active category selection carried in the request.
//!
//! The wire form is a comma-joined token list (`"1,4,7"`). Tokens are opaque:
//! nothing is trimmed or validated, so a malformed token simply never matches
//! a real category.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque category identifier as it appears in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered list of selected category ids.
///
/// Duplicates are tolerated: they are never introduced by [`Selection::union`]
/// but a duplicated incoming token is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<CategoryId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-joined wire form. The empty string is the empty selection.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self {
            ids: raw.split(',').map(CategoryId::from).collect(),
        }
    }

    /// Selection consisting of exactly one id.
    pub fn only(id: &CategoryId) -> Self {
        Self {
            ids: vec![id.clone()],
        }
    }

    pub fn is_active(&self, id: &CategoryId) -> bool {
        self.ids.contains(id)
    }

    /// True when `id` is the one and only selected token.
    pub fn is_sole(&self, id: &CategoryId) -> bool {
        self.ids.len() == 1 && self.ids[0] == *id
    }

    /// Set difference, preserving the order of the remaining ids.
    pub fn without(&self, ids: &[CategoryId]) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .filter(|id| !ids.contains(id))
                .cloned()
                .collect(),
        }
    }

    /// Append `id` unless it is already selected.
    pub fn union(&self, id: &CategoryId) -> Self {
        let mut ids = self.ids.clone();
        if !ids.contains(id) {
            ids.push(id.clone());
        }
        Self { ids }
    }

    /// The subset of `candidates` that is selected, in candidate order.
    pub fn active_among<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a CategoryId>,
    ) -> Vec<CategoryId> {
        candidates
            .into_iter()
            .filter(|id| self.is_active(id))
            .cloned()
            .collect()
    }

    pub fn to_wire(&self) -> String {
        self.ids.iter().join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[CategoryId] {
        &self.ids
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<Vec<CategoryId>> for Selection {
    fn from(ids: Vec<CategoryId>) -> Self {
        Self { ids }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
