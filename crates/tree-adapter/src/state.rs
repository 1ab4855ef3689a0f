//! Per-node display state: checkboxes and expansion

use log::trace;
use tree_model::prelude::*;

use crate::{AdapterError, Result, TreeAdapter};

impl<P> TreeAdapter<P> {
    /// Check or uncheck a node with tri-state propagation
    ///
    /// Every descendant takes the same settled state, then each ancestor
    /// is re-derived from its direct children: checked if all are checked,
    /// unchecked if all are unchecked, indeterminate otherwise. Cost is the
    /// subtree size plus the depth.
    pub fn set_checked(&mut self, key: &str, checked: bool) -> Result<()> {
        self.require(key)?;
        let visited = self.forest.check_subtree(key, checked);
        self.forest.refresh_ancestors(key);
        trace!("Set {key:?} checked={checked} across {visited} nodes");
        Ok(())
    }

    /// Flip the expanded flag of exactly one node, returning the new value
    pub fn toggle_expanded(&mut self, key: &str) -> Result<bool> {
        let node = self.node_mut(key)?;
        node.expanded = !node.expanded;
        Ok(node.expanded)
    }

    /// Set the expanded flag of exactly one node
    pub fn set_expanded(&mut self, key: &str, expanded: bool) -> Result<()> {
        self.node_mut(key)?.expanded = expanded;
        Ok(())
    }

    /// Expand every ancestor of `key` so the node is visible
    ///
    /// Returns the path from the top level to `key`.
    pub fn expand_to(&mut self, key: &str) -> Result<Vec<String>> {
        let path = self.find_path(key)?;
        if let Some((_, ancestors)) = path.split_last() {
            for ancestor in ancestors {
                if let Some(node) = self.forest.get_mut(ancestor) {
                    node.expanded = true;
                }
            }
        }
        Ok(path)
    }

    /// Expand every node
    pub fn expand_all(&mut self) {
        self.forest.iter_mut().for_each(|node| node.expanded = true);
    }

    /// Collapse every node
    pub fn collapse_all(&mut self) {
        self.forest.iter_mut().for_each(|node| node.expanded = false);
    }

    fn node_mut(&mut self, key: &str) -> Result<&mut TreeNode<P>> {
        self.forest
            .get_mut(key)
            .ok_or_else(|| AdapterError::UnknownKey(key.to_string()))
    }
}
