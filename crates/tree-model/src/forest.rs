//! Arena storage for a forest of display nodes

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use log::trace;

use crate::traits::{TraversalOrder, Tree, TreeTraversal};
use crate::TreeNode;

/// An ordered forest of nodes stored in a flat table keyed by id
///
/// Parent/child links are id references: every node records its parent's
/// key and the ordered keys of its children, and the forest keeps the
/// ordered top-level keys. The table doubles as the id → node index, and
/// the `parent` field of each node is its parent index entry.
///
/// Every node in the table is reachable from exactly one top-level key.
/// The structural methods (`insert`, `move_subtree`, `remove_subtree`,
/// `graft`) keep it that way.
#[derive(Clone)]
pub struct Forest<P> {
    pub(crate) nodes: HashMap<String, TreeNode<P>>,
    pub(crate) roots: Vec<String>,
}

impl<P> Default for Forest<P> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }
}

/// Lists every node once, in pre-order, without nesting
impl<P: fmt::Debug> fmt::Debug for Forest<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.walk(TraversalOrder::PreOrder).filter_map(|key| self.node(key)))
            .finish()
    }
}

impl<P> Forest<P> {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the forest
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if a node with this key exists
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Ordered keys of the top-level nodes
    pub fn root_keys(&self) -> &[String] {
        &self.roots
    }

    /// Mutable access to a node's display state
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TreeNode<P>> {
        self.nodes.get_mut(key)
    }

    /// Iterate over every node in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<P>> + '_ {
        self.nodes.values()
    }

    /// Iterate mutably over every node in unspecified order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TreeNode<P>> + '_ {
        self.nodes.values_mut()
    }

    /// Borrowing view of a node that can walk to its children
    pub fn node(&self, key: &str) -> Option<NodeRef<'_, P>> {
        self.nodes.get(key).map(|node| NodeRef { forest: self, node })
    }

    /// The top-level nodes in order
    pub fn top_level(&self) -> impl Iterator<Item = NodeRef<'_, P>> + '_ {
        self.roots.iter().filter_map(move |key| self.node(key))
    }

    /// The ordered sibling group under `parent` (`None` is the top level)
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn siblings(&self, parent: Option<&str>) -> Option<&[String]> {
        match parent {
            None => Some(&self.roots),
            Some(key) => self.nodes.get(key).map(|n| n.children()),
        }
    }

    /// Position of a node within its sibling group
    pub fn index_in_parent(&self, key: &str) -> Option<usize> {
        let parent = self.nodes.get(key)?.parent();
        self.siblings(parent)?.iter().position(|k| k == key)
    }

    /// Keys of the subtree rooted at `key`, in pre-order
    ///
    /// Returns an empty vector for an unknown key.
    pub fn subtree_keys(&self, key: &str) -> Vec<String> {
        if !self.contains(key) {
            return Vec::new();
        }
        self.walk_from(key, TraversalOrder::PreOrder)
            .map(str::to_string)
            .collect()
    }

    /// Insert a new leaf under `parent` at `index` (clamped to the group size)
    ///
    /// Returns false, dropping the node, if its key is already present or
    /// `parent` does not exist.
    pub fn insert(&mut self, node: TreeNode<P>, parent: Option<&str>, index: usize) -> bool {
        if self.contains(node.key()) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return false;
            }
        }

        let key = node.key().to_string();
        self.nodes.insert(key.clone(), node);
        self.attach(&key, parent, index);
        trace!("Inserted {key:?} under {parent:?}");
        true
    }

    /// Relocate the subtree rooted at `key` under `parent` at `index`
    ///
    /// The index is interpreted after the node has left its old group. The
    /// subtree's own structure is untouched; only its root changes parent.
    /// Returns false with no change if either key is unknown or `parent`
    /// is `key` itself or one of its descendants.
    pub fn move_subtree(&mut self, key: &str, parent: Option<&str>, index: usize) -> bool {
        if !self.contains(key) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) || parent == key || self.is_ancestor_of(key, parent) {
                return false;
            }
        }

        self.detach(key);
        self.attach(key, parent, index);
        trace!("Moved {key:?} under {parent:?} at {index}");
        true
    }

    /// Remove the node at `key` together with its whole subtree
    ///
    /// The removed nodes are returned in pre-order; an unknown key removes
    /// nothing.
    pub fn remove_subtree(&mut self, key: &str) -> Vec<TreeNode<P>> {
        let doomed = self.subtree_keys(key);
        if doomed.is_empty() {
            return Vec::new();
        }

        self.detach(key);
        doomed
            .iter()
            .filter_map(|k| self.nodes.remove(k))
            .collect()
    }

    /// Move every node of `other` into this forest, attaching its top-level
    /// nodes (in order) at the end of the group under `parent`
    ///
    /// Nothing changes on failure. The error carries the offending key: a
    /// key of `other` already present here, or a missing `parent`.
    pub fn graft(&mut self, other: Forest<P>, parent: Option<&str>) -> Result<(), String> {
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(parent.to_string());
            }
        }
        if let Some(conflict) = other
            .walk(TraversalOrder::PreOrder)
            .find(|key| self.contains(key))
        {
            return Err(conflict.to_string());
        }

        let Forest { nodes, roots } = other;
        self.nodes.extend(nodes);
        for key in roots {
            self.attach(&key, parent, usize::MAX);
        }
        Ok(())
    }

    /// Unlink a node from its sibling group, leaving it in the table
    fn detach(&mut self, key: &str) -> Option<usize> {
        let parent = self.nodes.get(key)?.parent().map(str::to_string);
        let index = self.remove_from_group(parent.as_deref(), key);
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_parent(None);
        }
        index
    }

    fn remove_from_group(&mut self, parent: Option<&str>, key: &str) -> Option<usize> {
        let group = self.group_mut(parent)?;
        let index = group.iter().position(|k| k == key)?;
        group.remove(index);
        Some(index)
    }

    /// Link a detached node into the group under `parent`
    fn attach(&mut self, key: &str, parent: Option<&str>, index: usize) {
        if let Some(group) = self.group_mut(parent) {
            let index = index.min(group.len());
            group.insert(index, key.to_string());
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_parent(parent.map(str::to_string));
        }
    }

    fn group_mut(&mut self, parent: Option<&str>) -> Option<&mut Vec<String>> {
        match parent {
            None => Some(&mut self.roots),
            Some(key) => self.nodes.get_mut(key).map(|n| n.children_mut()),
        }
    }
}

impl<P> Tree for Forest<P> {
    type NodeData = P;

    fn roots(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.roots.iter().map(String::as_str))
    }

    fn get(&self, key: &str) -> Option<&TreeNode<P>> {
        self.nodes.get(key)
    }

    fn parent(&self, key: &str) -> Option<&str> {
        self.nodes.get(key)?.parent()
    }

    fn children(&self, key: &str) -> Box<dyn Iterator<Item = &str> + '_> {
        match self.nodes.get(key) {
            Some(node) => Box::new(node.children().iter().map(String::as_str)),
            None => Box::new(std::iter::empty()),
        }
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Read-only, nested view of one node inside a [`Forest`]
///
/// Dereferences to the [`TreeNode`], and walks to children and parent
/// without copying anything.
pub struct NodeRef<'a, P> {
    forest: &'a Forest<P>,
    node: &'a TreeNode<P>,
}

impl<'a, P> Clone for NodeRef<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P> Copy for NodeRef<'a, P> {}

impl<'a, P> NodeRef<'a, P> {
    /// The underlying node, with the forest's lifetime
    pub fn node(&self) -> &'a TreeNode<P> {
        self.node
    }

    /// Direct children in display order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, P>> + 'a {
        let forest = self.forest;
        self.node
            .children()
            .iter()
            .filter_map(move |key| forest.node(key))
    }

    /// The parent node, `None` at the top level
    pub fn parent(&self) -> Option<NodeRef<'a, P>> {
        self.forest.node(self.node.parent()?)
    }

    /// Distance from the top level (top-level nodes are 0)
    pub fn depth(&self) -> usize {
        self.forest.depth(self.node.key())
    }
}

impl<'a, P> Deref for NodeRef<'a, P> {
    type Target = TreeNode<P>;

    fn deref(&self) -> &TreeNode<P> {
        self.node
    }
}

impl<'a, P: fmt::Debug> fmt::Debug for NodeRef<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.node.key())
            .field("title", &self.node.title)
            .field("checked", &self.node.checked)
            .field("expanded", &self.node.expanded)
            .field("payload", &self.node.payload)
            .field("parent", &self.node.parent())
            .field("children", &self.node.children())
            .finish()
    }
}
