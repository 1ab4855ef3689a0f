//! Tree Model
//!
//! Pure data structures and conversion utilities for turning a flat,
//! parent-pointer-addressed list of records into a forest of display nodes
//! and back again.
//!
//! # Core Concepts
//!
//! - **FlatRecord**: One item of the caller's linear collection (`id`, `parentId`, `name`)
//! - **TreeNode**: The display form of a record (`key`, `title`, check and expand state)
//! - **Forest**: Arena owning every node, keyed by id, plus the ordered top level
//! - **Tree**: Navigation trait implemented by `Forest`
//!
//! # Example
//!
//! ```
//! use tree_model::prelude::*;
//!
//! let records = vec![
//!     FlatRecord::new("1", None, "Root"),
//!     FlatRecord::new("2", Some("1"), "Child"),
//! ];
//!
//! let forest = create_tree_from_list(records, &TreeOptions::default());
//! assert_eq!(forest.node_count(), 2);
//!
//! for key in forest.walk(TraversalOrder::PreOrder) {
//!     let depth = forest.depth(key);
//!     println!("{:indent$}{}", "", forest.title(key).unwrap(), indent = depth * 2);
//! }
//!
//! let list = create_list_from_tree(&forest);
//! assert_eq!(list[1].parent_id.as_deref(), Some("1"));
//! ```

mod check;
mod convert;
mod forest;
mod node;
mod options;
mod record;
mod traits;

pub use convert::{
    create_list_from_subtree, create_list_from_tree, create_map_from_list, create_tree_from_list,
    dedupe_list,
};
pub use forest::{Forest, NodeRef};
pub use node::{CheckState, TreeNode};
pub use options::{NameResolver, TreeOptions};
pub use record::FlatRecord;
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        create_list_from_subtree, create_list_from_tree, create_map_from_list,
        create_tree_from_list, dedupe_list, CheckState, FlatRecord, Forest, NodeRef,
        TraversalOrder, Tree, TreeNode, TreeOptions, TreeTraversal,
    };
}
