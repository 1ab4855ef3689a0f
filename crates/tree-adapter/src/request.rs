//! Request and outcome types for structural edits

use derive_more::Display;
use tree_model::FlatRecord;

/// Replace the children of `key` with a new batch of records
///
/// Records whose `parent_id` is `key`, absent, or does not resolve inside
/// the batch become direct children of `key`; the rest nest under each
/// other as in a normal build.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest<P = ()> {
    /// Node whose children are replaced
    pub key: String,
    /// The new subtree(s), flat
    pub children: Vec<FlatRecord<P>>,
}

impl<P> UpdateRequest<P> {
    pub fn new(key: impl Into<String>, children: Vec<FlatRecord<P>>) -> Self {
        Self {
            key: key.into(),
            children,
        }
    }
}

/// Where a dragged node lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DropPosition {
    /// Sibling immediately before the target
    #[display(fmt = "before")]
    Before,

    /// First child of the target
    #[display(fmt = "inside")]
    Inside,

    /// Sibling immediately after the target
    #[display(fmt = "after")]
    After,
}

impl DropPosition {
    /// Map the usual UI drop offset: negative is before, zero is inside,
    /// positive is after
    pub fn from_offset(offset: i32) -> Self {
        match offset {
            i32::MIN..=-1 => DropPosition::Before,
            0 => DropPosition::Inside,
            _ => DropPosition::After,
        }
    }
}

/// Move the subtree at `drag_key` relative to `drop_key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    pub drag_key: String,
    pub drop_key: String,
    pub position: DropPosition,
}

impl DropRequest {
    pub fn new(
        drag_key: impl Into<String>,
        drop_key: impl Into<String>,
        position: DropPosition,
    ) -> Self {
        Self {
            drag_key: drag_key.into(),
            drop_key: drop_key.into(),
            position,
        }
    }
}

/// Result of a drop that named two existing nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DropOutcome {
    /// The subtree was relocated
    #[display(fmt = "moved")]
    Moved,

    /// The drop was ignored and the tree is unchanged
    #[display(fmt = "rejected: {}", _0)]
    Rejected(DropRejection),
}

impl DropOutcome {
    /// Returns true if the tree changed
    pub fn is_moved(self) -> bool {
        matches!(self, DropOutcome::Moved)
    }
}

/// Why a drop was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DropRejection {
    /// Dragged onto itself
    #[display(fmt = "node dropped onto itself")]
    SameNode,

    /// The target sits inside the dragged subtree
    #[display(fmt = "node dropped into its own subtree")]
    IntoOwnSubtree,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_position_from_offset() {
        assert_eq!(DropPosition::from_offset(-1), DropPosition::Before);
        assert_eq!(DropPosition::from_offset(-7), DropPosition::Before);
        assert_eq!(DropPosition::from_offset(0), DropPosition::Inside);
        assert_eq!(DropPosition::from_offset(1), DropPosition::After);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(DropOutcome::Moved.to_string(), "moved");
        assert_eq!(
            DropOutcome::Rejected(DropRejection::SameNode).to_string(),
            "rejected: node dropped onto itself"
        );
        assert!(!DropOutcome::Rejected(DropRejection::IntoOwnSubtree).is_moved());
    }
}
