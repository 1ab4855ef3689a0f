//! Core tree traits for navigating a forest of keyed nodes

use std::collections::{HashSet, VecDeque};

use crate::TreeNode;

/// A hierarchical forest whose nodes are addressed by string keys
///
/// Implementations provide the basic navigation primitives; the derived
/// methods build ancestor walks, paths and depth on top of them.
///
/// # Example
///
/// ```
/// use tree_model::prelude::*;
///
/// fn print_tree<T: TreeTraversal>(tree: &T) {
///     for key in tree.walk(TraversalOrder::PreOrder) {
///         let depth = tree.depth(key);
///         println!("{:indent$}{}", "", tree.title(key).unwrap(), indent = depth * 2);
///     }
/// }
///
/// let forest = create_tree_from_list(
///     vec![FlatRecord::new("1", None, "Root")],
///     &TreeOptions::default(),
/// );
/// print_tree(&forest);
/// ```
pub trait Tree {
    /// User-defined data stored at each node
    type NodeData;

    /// Iterate over the top-level keys in order
    fn roots(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Get a node by its key
    ///
    /// Returns `None` if the key is unknown.
    fn get(&self, key: &str) -> Option<&TreeNode<Self::NodeData>>;

    /// Get the parent key of a node
    ///
    /// Returns `None` for top-level nodes and unknown keys.
    fn parent(&self, key: &str) -> Option<&str>;

    /// Iterate over the children of a node in order
    ///
    /// Returns an empty iterator for leaves or unknown keys.
    fn children(&self, key: &str) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Count total nodes in the tree
    fn node_count(&self) -> usize;

    /// Check if a node has no children
    ///
    /// Returns false for unknown keys.
    fn is_leaf(&self, key: &str) -> bool {
        self.get(key).map(|n| n.is_leaf()).unwrap_or(false)
    }

    /// Check if a node sits at the top level
    fn is_root(&self, key: &str) -> bool {
        self.get(key).map(|n| n.parent().is_none()).unwrap_or(false)
    }

    /// Get the title of a node
    fn title(&self, key: &str) -> Option<&str> {
        self.get(key).map(|n| n.title.as_str())
    }

    /// Keys from the top level down to `key`, inclusive
    ///
    /// Returns an empty path for unknown keys.
    fn path(&self, key: &str) -> Vec<String> {
        let Some(node) = self.get(key) else {
            return Vec::new();
        };

        let mut components = vec![node.key().to_string()];
        components.extend(self.ancestors(key).into_iter().map(str::to_string));
        components.reverse();
        components
    }

    /// Get the depth of a node (top level = 0)
    ///
    /// Returns 0 for unknown keys.
    fn depth(&self, key: &str) -> usize {
        self.ancestors(key).len()
    }

    /// Count children of a node
    fn child_count(&self, key: &str) -> usize {
        self.children(key).count()
    }

    /// Get all ancestors of a node, from parent to top level
    ///
    /// The walk is bounded by the node count so a corrupted parent chain
    /// cannot loop forever.
    fn ancestors(&self, key: &str) -> Vec<&str> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(key);
        while let Some(parent) = current {
            if ancestors.len() >= self.node_count() {
                break;
            }
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    /// Check if a node is an ancestor of another
    fn is_ancestor_of(&self, ancestor: &str, descendant: &str) -> bool {
        self.ancestors(descendant).iter().any(|key| *key == ancestor)
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    PreOrder,
    /// Visit children before parent (bottom-up)
    PostOrder,
    /// Visit level by level (breadth-first)
    BreadthFirst,
}

/// Extension trait providing tree traversal and search utilities
///
/// This trait is automatically implemented for all types that implement `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk the whole forest in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.roots().collect(), order)
    }

    /// Walk the subtree rooted at a specific node
    fn walk_from<'a>(&'a self, start: &'a str, order: TraversalOrder) -> TreeWalker<'a, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, vec![start], order)
    }

    /// Get all leaf nodes in pre-order
    fn leaves(&self) -> Vec<&str>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|key| self.is_leaf(key))
            .collect()
    }

    /// Find nodes matching a predicate
    fn find<F>(&self, predicate: F) -> Vec<&str>
    where
        F: Fn(&TreeNode<Self::NodeData>) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|key| self.get(key).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Find a node by title (first match in pre-order)
    fn find_by_title(&self, title: &str) -> Option<&str>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .find(|key| self.title(key) == Some(title))
    }
}

// Blanket implementation for all Tree types
impl<T: Tree> TreeTraversal for T {}

/// Iterator for traversing a tree in different orders
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    stack: Vec<&'a str>,
    queue: VecDeque<&'a str>,
    visited: HashSet<&'a str>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker over the given start nodes, in order
    pub fn new(tree: &'a T, starts: Vec<&'a str>, order: TraversalOrder) -> Self {
        let mut stack = Vec::new();
        let mut queue = VecDeque::new();

        // Stack pops from the back, so starts go in reversed
        match order {
            TraversalOrder::BreadthFirst => queue.extend(starts),
            _ => stack.extend(starts.into_iter().rev()),
        }

        Self {
            tree,
            order,
            stack,
            queue,
            visited: HashSet::new(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    fn next_preorder(&mut self) -> Option<&'a str> {
        let current = self.stack.pop()?;

        // Add children in reverse order so they're popped in correct order
        let tree = self.tree;
        let children: Vec<_> = tree.children(current).collect();
        self.stack.extend(children.into_iter().rev());

        Some(current)
    }

    fn next_postorder(&mut self) -> Option<&'a str> {
        while let Some(&current) = self.stack.last() {
            if self.visited.contains(current) {
                self.stack.pop();
                return Some(current);
            }

            self.visited.insert(current);

            let tree = self.tree;
            let children: Vec<_> = tree.children(current).collect();
            self.stack.extend(children.into_iter().rev());
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<&'a str> {
        let current = self.queue.pop_front()?;
        let tree = self.tree;
        self.queue.extend(tree.children(current));
        Some(current)
    }
}
