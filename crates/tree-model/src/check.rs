//! Tri-state check propagation over a forest

use crate::traits::{TraversalOrder, TreeTraversal};
use crate::{CheckState, Forest};

impl<P> Forest<P> {
    /// Force `key` and every descendant to checked or unchecked
    ///
    /// Indeterminate is never pushed downward. Returns the number of nodes
    /// visited, zero for an unknown key.
    pub fn check_subtree(&mut self, key: &str, checked: bool) -> usize {
        let state = CheckState::from_bool(checked);
        let mut stack = vec![key.to_string()];
        let mut visited = 0;

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            node.checked = state;
            visited += 1;
            stack.extend(node.children().iter().cloned());
        }

        visited
    }

    /// Re-derive the state of every ancestor of `key`
    ///
    /// Stops at the first ancestor whose state does not change.
    pub fn refresh_ancestors(&mut self, key: &str) {
        let parent = self.nodes.get(key).and_then(|n| n.parent()).map(str::to_string);
        self.refresh_chain(parent);
    }

    /// Re-derive the state of `key` from its children, then its ancestors
    ///
    /// Used after `key`'s set of children changed.
    pub fn refresh_from(&mut self, key: &str) {
        self.refresh_chain(Some(key.to_string()));
    }

    fn refresh_chain(&mut self, start: Option<String>) {
        let mut current = start;

        while let Some(key) = current {
            let Some(next) = self.derived_state(&key) else {
                break;
            };
            let Some(node) = self.nodes.get_mut(&key) else {
                break;
            };
            if node.checked == next {
                break;
            }
            node.checked = next;
            current = node.parent().map(str::to_string);
        }
    }

    /// The state a node should have given its children
    fn derived_state(&self, key: &str) -> Option<CheckState> {
        let node = self.nodes.get(key)?;
        let derived = CheckState::from_children(
            node.children()
                .iter()
                .filter_map(|child| self.nodes.get(child))
                .map(|child| child.checked),
        );

        Some(match derived {
            Some(state) => state,
            // a leaf cannot be partially checked
            None if node.checked.is_indeterminate() => CheckState::Unchecked,
            None => node.checked,
        })
    }

    /// Make every node's state consistent with its record flags
    ///
    /// A checked node forces its subtree to checked, then every parent is
    /// derived from its children bottom-up.
    pub fn normalize_check_states(&mut self) {
        let mut stack: Vec<(String, bool)> =
            self.roots.iter().rev().map(|k| (k.clone(), false)).collect();

        while let Some((key, forced)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&key) else {
                continue;
            };
            if forced {
                node.checked = CheckState::Checked;
            }
            let forced = forced || node.checked.is_checked();
            stack.extend(node.children().iter().rev().map(|k| (k.clone(), forced)));
        }

        let post_order: Vec<String> = self
            .walk(TraversalOrder::PostOrder)
            .map(str::to_string)
            .collect();
        for key in post_order {
            if let Some(state) = self.derived_state(&key) {
                if let Some(node) = self.nodes.get_mut(&key) {
                    node.checked = state;
                }
            }
        }
    }
}
