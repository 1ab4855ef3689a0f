//! Conversion between flat record lists and forests

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, warn};

use crate::traits::{TraversalOrder, TreeTraversal};
use crate::{CheckState, FlatRecord, Forest, TreeNode, TreeOptions};

/// Build a forest from an unordered flat list of records
///
/// Every distinct id becomes exactly one node. Siblings keep the order in
/// which their records first appear. Malformed input never fails:
///
/// - a duplicate id overwrites the earlier record's data (last write wins)
///   while keeping the position where the id was first seen
/// - a record whose parent is absent, unknown or itself is attached at the
///   top level
/// - a record whose declared ancestor chain leads back to itself is
///   attached at the top level, so `a → b → a` yields two top-level nodes
///
/// Check flags are normalised afterwards: a checked record checks its
/// whole subtree and every parent is derived from its children. The
/// whole build is linear in the number of records.
pub fn create_tree_from_list<P, I>(records: I, options: &TreeOptions<P>) -> Forest<P>
where
    I: IntoIterator<Item = FlatRecord<P>>,
{
    let records = dedupe_list(records);
    let parents = resolve_parents(&records);
    let keys: Vec<String> = records.iter().map(|record| record.id.clone()).collect();

    let mut forest = Forest::new();
    for record in records {
        let title = options.resolve_title(&record);
        let mut node = TreeNode::new(record.id, title, record.payload);
        node.checked = CheckState::from_bool(record.checked);
        node.expanded = options.default_expanded;
        forest.nodes.insert(node.key().to_string(), node);
    }

    for (id, parent) in keys.iter().zip(parents) {
        match parent {
            Some(at) => {
                let parent = &keys[at];
                if let Some(node) = forest.nodes.get_mut(parent) {
                    node.children_mut().push(id.clone());
                }
                if let Some(node) = forest.nodes.get_mut(id) {
                    node.set_parent(Some(parent.clone()));
                }
            }
            None => forest.roots.push(id.clone()),
        }
    }

    forest.normalize_check_states();
    debug!(
        "Built tree with {} nodes ({} top-level)",
        forest.len(),
        forest.roots.len()
    );
    forest
}

/// Collapse duplicate ids: the last record wins, at the first-seen position
pub fn dedupe_list<P, I>(records: I) -> Vec<FlatRecord<P>>
where
    I: IntoIterator<Item = FlatRecord<P>>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<FlatRecord<P>> = Vec::new();

    for record in records {
        match slots.entry(record.id.clone()) {
            Entry::Occupied(slot) => {
                warn!("Duplicate record id {:?}; keeping the later record", record.id);
                unique[*slot.get()] = record;
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

#[derive(Clone, Copy)]
enum Mark {
    Unvisited,
    OnPath(usize),
    Done,
}

/// Decide where each record attaches, as an index into `records`
///
/// `None` means the top level: the declared parent is absent, unknown or
/// the record itself, or the record sits on a declared parent cycle.
/// Every record is marked once, so deep chains cost the same as flat ones.
fn resolve_parents<P>(records: &[FlatRecord<P>]) -> Vec<Option<usize>> {
    let index: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(at, record)| (record.id.as_str(), at))
        .collect();
    let mut parents: Vec<Option<usize>> = records
        .iter()
        .map(|record| declared_parent(record, &index))
        .collect();

    let mut marks = vec![Mark::Unvisited; records.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..records.len() {
        let mut current = Some(start);
        while let Some(at) = current {
            match marks[at] {
                Mark::Done => break,
                Mark::OnPath(depth) => {
                    // path[depth..] is exactly the loop
                    for &member in &path[depth..] {
                        warn!(
                            "Record {:?} closes a parent cycle; attaching at top level",
                            records[member].id
                        );
                        parents[member] = None;
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[at] = Mark::OnPath(path.len());
                    path.push(at);
                    current = parents[at];
                }
            }
        }
        for at in path.drain(..) {
            marks[at] = Mark::Done;
        }
    }

    parents
}

fn declared_parent<P>(record: &FlatRecord<P>, index: &HashMap<&str, usize>) -> Option<usize> {
    let id = record.id.as_str();
    let parent = record.parent_id.as_deref()?;

    if parent == id {
        warn!("Record {id:?} is its own parent; attaching at top level");
        return None;
    }
    match index.get(parent) {
        Some(&at) => Some(at),
        None => {
            debug!("Record {id:?} has unresolved parent {parent:?}; attaching at top level");
            None
        }
    }
}

/// Flatten a forest back into records, in pre-order
///
/// Each record's `parent_id` comes from the forest structure, its `name`
/// from the node title and `checked` is true only for fully checked nodes.
pub fn create_list_from_tree<P: Clone>(forest: &Forest<P>) -> Vec<FlatRecord<P>> {
    forest
        .walk(TraversalOrder::PreOrder)
        .filter_map(|key| forest.nodes.get(key))
        .map(to_record)
        .collect()
}

/// Flatten the subtree rooted at `key`, in pre-order
///
/// Returns `None` for an unknown key.
pub fn create_list_from_subtree<P: Clone>(
    forest: &Forest<P>,
    key: &str,
) -> Option<Vec<FlatRecord<P>>> {
    if !forest.contains(key) {
        return None;
    }
    Some(
        forest
            .walk_from(key, TraversalOrder::PreOrder)
            .filter_map(|k| forest.nodes.get(k))
            .map(to_record)
            .collect(),
    )
}

/// Index records by id; a later duplicate replaces an earlier one
pub fn create_map_from_list<P>(records: &[FlatRecord<P>]) -> HashMap<&str, &FlatRecord<P>> {
    records
        .iter()
        .map(|record| (record.id.as_str(), record))
        .collect()
}

fn to_record<P: Clone>(node: &TreeNode<P>) -> FlatRecord<P> {
    FlatRecord {
        id: node.key().to_string(),
        parent_id: node.parent().map(str::to_string),
        name: node.title.clone(),
        checked: node.checked.is_checked(),
        payload: node.payload.clone(),
    }
}
