use log::{debug, warn};
use tree_model::prelude::*;

use crate::{AdapterError, Result};

/// Stateful owner of one tree snapshot
///
/// The adapter holds the forest (nodes keyed by id, with parent and child
/// links) and the options it was built with. Renderers read it through
/// [`get_tree`](Self::get_tree) and forward gestures into the mutation
/// methods; hosts read back [`to_list`](Self::to_list) to persist.
#[derive(Debug)]
pub struct TreeAdapter<P = ()> {
    pub(crate) forest: Forest<P>,
    pub(crate) options: TreeOptions<P>,
}

impl<P> Default for TreeAdapter<P> {
    fn default() -> Self {
        Self {
            forest: Forest::new(),
            options: TreeOptions::default(),
        }
    }
}

impl<P> TreeAdapter<P> {
    /// Build an adapter from flat records with default options
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FlatRecord<P>>,
    {
        Self::with_options(records, TreeOptions::default())
    }

    /// Build an adapter from flat records with custom options
    pub fn with_options<I>(records: I, options: TreeOptions<P>) -> Self
    where
        I: IntoIterator<Item = FlatRecord<P>>,
    {
        let forest = create_tree_from_list(records, &options);
        Self { forest, options }
    }

    /// The options used for every build and merge
    pub fn options(&self) -> &TreeOptions<P> {
        &self.options
    }

    /// The current forest
    pub fn get_tree(&self) -> &Forest<P> {
        &self.forest
    }

    /// Nested view of a single node
    pub fn get_node(&self, key: &str) -> Option<NodeRef<'_, P>> {
        self.forest.node(key)
    }

    /// Returns true if the key names a node in the current tree
    pub fn contains(&self, key: &str) -> bool {
        self.forest.contains(key)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Replace the whole tree with one built from `records`
    ///
    /// Expand and check state that the records do not carry is discarded.
    pub fn update_tree_from_list<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = FlatRecord<P>>,
    {
        self.forest = create_tree_from_list(records, &self.options);
        debug!("Rebuilt tree with {} nodes", self.forest.len());
    }

    /// Merge new or changed records into the current tree
    ///
    /// Unknown ids are inserted at the end of their parent's children (or
    /// the top level when the parent does not resolve). Known ids keep
    /// their check and expand state, take the record's title and payload,
    /// and move if the record names a different parent. A move that would
    /// close a cycle is skipped. Duplicate ids in the batch follow the
    /// build rule: the last record wins, placed where the id first appears.
    /// Returns the number of inserted nodes.
    pub fn merge_list<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = FlatRecord<P>>,
    {
        let batch = dedupe_list(records);
        let mut placements: Vec<(String, Option<String>)> = Vec::with_capacity(batch.len());
        let mut newly_checked = Vec::new();
        let mut inserted = 0;

        for record in batch {
            let title = self.options.resolve_title(&record);
            let FlatRecord {
                id,
                parent_id,
                checked,
                payload,
                ..
            } = record;

            match self.forest.get_mut(&id) {
                Some(node) => {
                    node.title = title;
                    node.payload = payload;
                }
                None => {
                    let mut node = TreeNode::new(id.clone(), title, payload);
                    node.checked = CheckState::from_bool(checked);
                    node.expanded = self.options.default_expanded;
                    self.forest.insert(node, None, usize::MAX);
                    if checked {
                        newly_checked.push(id.clone());
                    }
                    inserted += 1;
                }
            }
            placements.push((id, parent_id));
        }

        let mut touched: Vec<String> = Vec::new();
        for (id, parent) in &placements {
            let target = parent
                .as_deref()
                .filter(|p| *p != id.as_str() && self.forest.contains(p));
            let current = self.forest.parent(id).map(str::to_string);
            if current.as_deref() == target {
                continue;
            }
            if !self.forest.move_subtree(id, target, usize::MAX) {
                warn!("Merged record {id:?} would close a cycle under {target:?}; left in place");
                continue;
            }
            touched.extend(current);
            touched.extend(target.map(str::to_string));
        }

        for id in &newly_checked {
            self.forest.check_subtree(id, true);
            self.forest.refresh_ancestors(id);
        }
        for key in &touched {
            self.forest.refresh_from(key);
        }

        debug!(
            "Merged {} records ({inserted} new), tree has {} nodes",
            placements.len(),
            self.forest.len()
        );
        inserted
    }

    /// Keys from the top level down to `key`, inclusive
    pub fn find_path(&self, key: &str) -> Result<Vec<String>> {
        self.require(key)?;
        Ok(self.forest.path(key))
    }

    /// Keys of fully checked nodes, in pre-order
    pub fn checked_keys(&self) -> Vec<&str> {
        self.forest.find(|node| node.checked.is_checked())
    }

    /// Keys of partially checked nodes, in pre-order
    pub fn indeterminate_keys(&self) -> Vec<&str> {
        self.forest.find(|node| node.checked.is_indeterminate())
    }

    pub(crate) fn require(&self, key: &str) -> Result<()> {
        if self.forest.contains(key) {
            Ok(())
        } else {
            Err(AdapterError::UnknownKey(key.to_string()))
        }
    }
}

impl<P: Clone> TreeAdapter<P> {
    /// Flatten the whole tree, in pre-order, for persistence
    pub fn to_list(&self) -> Vec<FlatRecord<P>> {
        create_list_from_tree(&self.forest)
    }

    /// Flatten the subtree rooted at `key`, in pre-order
    pub fn subtree_list(&self, key: &str) -> Result<Vec<FlatRecord<P>>> {
        create_list_from_subtree(&self.forest, key)
            .ok_or_else(|| AdapterError::UnknownKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeAdapter {
        TreeAdapter::new(vec![
            FlatRecord::new("1", None, "Root"),
            FlatRecord::new("2", Some("1"), "Child"),
            FlatRecord::new("3", Some("2"), "Grandchild"),
        ])
    }

    #[test]
    fn test_find_path() {
        let adapter = sample();
        assert_eq!(adapter.find_path("3").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(adapter.find_path("1").unwrap(), vec!["1"]);
        assert_eq!(
            adapter.find_path("9"),
            Err(AdapterError::UnknownKey("9".to_string()))
        );
    }

    #[test]
    fn test_update_tree_from_list_replaces_everything() {
        let mut adapter = sample();
        adapter.toggle_expanded("1").unwrap();

        adapter.update_tree_from_list(vec![
            FlatRecord::new("1", None, "Root"),
            FlatRecord::new("4", None, "Other"),
        ]);

        assert_eq!(adapter.len(), 2);
        assert!(!adapter.contains("2"));
        assert!(!adapter.get_node("1").unwrap().expanded);
    }

    #[test]
    fn test_merge_inserts_under_resolved_parents() {
        let mut adapter = sample();
        let inserted = adapter.merge_list(vec![
            FlatRecord::new("5", Some("4"), "Late child"),
            FlatRecord::new("4", Some("1"), "New"),
            FlatRecord::new("6", Some("ghost"), "Orphan"),
        ]);

        assert_eq!(inserted, 3);
        let tree = adapter.get_tree();
        assert_eq!(tree.get("1").unwrap().children(), ["2", "4"]);
        assert_eq!(tree.parent("5"), Some("4"));
        assert_eq!(tree.root_keys(), ["1", "6"]);
    }

    #[test]
    fn test_merge_updates_and_relocates_known_ids() {
        let mut adapter = sample();
        adapter.toggle_expanded("3").unwrap();

        let inserted = adapter.merge_list(vec![FlatRecord::new("3", Some("1"), "Renamed")]);

        assert_eq!(inserted, 0);
        let node = adapter.get_node("3").unwrap();
        assert_eq!(node.title, "Renamed");
        assert!(node.expanded);
        assert_eq!(adapter.get_tree().parent("3"), Some("1"));
    }

    #[test]
    fn test_merge_duplicates_keep_first_position() {
        let mut adapter = sample();
        let inserted = adapter.merge_list(vec![
            FlatRecord::new("a", Some("1"), "First"),
            FlatRecord::new("b", Some("1"), "Other"),
            FlatRecord::new("a", Some("1"), "Second"),
        ]);

        assert_eq!(inserted, 2);
        assert_eq!(adapter.get_tree().get("1").unwrap().children(), ["2", "a", "b"]);
        assert_eq!(adapter.get_node("a").unwrap().title, "Second");
    }

    #[test]
    fn test_merge_skips_cycles() {
        let mut adapter = sample();
        adapter.merge_list(vec![FlatRecord::new("1", Some("3"), "Root")]);

        assert_eq!(adapter.get_tree().root_keys(), ["1"]);
        assert_eq!(adapter.find_path("3").unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_merge_checked_record_updates_parent() {
        let mut adapter = sample();
        adapter.merge_list(vec![FlatRecord::new("4", Some("1"), "New").with_checked(true)]);

        assert_eq!(adapter.indeterminate_keys(), vec!["1"]);
        assert_eq!(adapter.checked_keys(), vec!["4"]);
    }

    #[test]
    fn test_subtree_list() {
        let adapter = sample();
        let ids: Vec<_> = adapter
            .subtree_list("2")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(adapter.subtree_list("nope").is_err());
    }
}
