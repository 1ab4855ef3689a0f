//! Core node types for the display tree

use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tri-state checkbox value of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CheckState {
    /// Neither the node nor any descendant is checked
    #[default]
    #[display(fmt = "unchecked")]
    Unchecked,

    /// The node and every descendant are checked
    #[display(fmt = "checked")]
    Checked,

    /// Some but not all descendants are checked
    #[display(fmt = "indeterminate")]
    Indeterminate,
}

impl CheckState {
    /// Map a plain boolean onto the two settled states
    pub const fn from_bool(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }

    /// Returns true only for the fully checked state
    pub const fn is_checked(self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Returns true for the partially checked state
    pub const fn is_indeterminate(self) -> bool {
        matches!(self, CheckState::Indeterminate)
    }

    /// Derive a parent's state from its direct children
    ///
    /// Checked if all children are checked, unchecked if all are unchecked,
    /// indeterminate otherwise. Returns `None` when there are no children.
    pub fn from_children<I>(states: I) -> Option<Self>
    where
        I: IntoIterator<Item = CheckState>,
    {
        let mut any = false;
        let mut all_checked = true;
        let mut all_unchecked = true;

        for state in states {
            any = true;
            all_checked &= state == CheckState::Checked;
            all_unchecked &= state == CheckState::Unchecked;
            if !all_checked && !all_unchecked {
                return Some(CheckState::Indeterminate);
            }
        }

        if !any {
            None
        } else if all_checked {
            Some(CheckState::Checked)
        } else {
            Some(CheckState::Unchecked)
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        Self::from_bool(checked)
    }
}

/// A single node in the display tree
///
/// Structure (`key`, `children`, `parent`) is owned by the [`Forest`] and is
/// only readable from here; the display state is public and may be edited
/// through [`Forest::get_mut`].
///
/// [`Forest`]: crate::Forest
/// [`Forest::get_mut`]: crate::Forest::get_mut
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<P> {
    key: String,
    children: Vec<String>,
    parent: Option<String>,
    /// Text shown for the node
    pub title: String,
    /// Checkbox state
    pub checked: CheckState,
    /// Whether the node's children are shown
    pub expanded: bool,
    /// Opaque caller data carried from the record
    pub payload: P,
}

impl<P> TreeNode<P> {
    /// Create a detached node with no children
    pub fn new(key: impl Into<String>, title: impl Into<String>, payload: P) -> Self {
        Self {
            key: key.into(),
            children: Vec::new(),
            parent: None,
            title: title.into(),
            checked: CheckState::Unchecked,
            expanded: false,
            payload,
        }
    }

    /// The node's key (the record id)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Keys of the direct children, in display order
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Key of the parent, `None` at the top level
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<String> {
        &mut self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<String>) {
        self.parent = parent;
    }
}
