//! The flat, parent-pointer form of a tree

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single item in a linear, parent-pointer-addressed collection
///
/// This is the shape records have on the way in from (and out to) a
/// persistence layer. Any extra fields live in `payload`, which the tree
/// carries around without looking at.
///
/// With the `serde` feature the record reads and writes `parentId` in
/// camelCase and the payload is flattened into the same object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlatRecord<P = ()> {
    /// Unique, non-empty identifier
    pub id: String,
    /// Identifier of the parent record, `None` for top-level records
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<String>,
    /// Display name
    pub name: String,
    /// Whether the record is checked (absent means unchecked)
    #[cfg_attr(feature = "serde", serde(default))]
    pub checked: bool,
    /// Opaque caller data
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub payload: P,
}

impl FlatRecord {
    /// Create a record with no payload
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            name: name.into(),
            checked: false,
            payload: (),
        }
    }
}

impl<P> FlatRecord<P> {
    /// Replace the payload, changing the payload type
    pub fn with_payload<Q>(self, payload: Q) -> FlatRecord<Q> {
        FlatRecord {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            checked: self.checked,
            payload,
        }
    }

    /// Set the checked flag
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Returns true if the record declares no parent
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
