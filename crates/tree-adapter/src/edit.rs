//! Structural edits: replace children, drag and drop, remove, rename

use std::collections::HashSet;

use log::{debug, trace, warn};
use tree_model::prelude::*;

use crate::{AdapterError, DropOutcome, DropPosition, DropRejection, DropRequest, Result};
use crate::{TreeAdapter, UpdateRequest};

impl<P> TreeAdapter<P> {
    /// Replace the children of `request.key` with a freshly built subtree
    ///
    /// The old descendants leave the tree and the index entirely. Fails
    /// without changing anything if the key is unknown or an incoming key
    /// already exists outside the replaced subtree. A checked parent stays
    /// checked and checks its new children; otherwise the parent is
    /// re-derived from them.
    pub fn handle_update(&mut self, request: UpdateRequest<P>) -> Result<()> {
        let UpdateRequest { key, children } = request;
        self.require(&key)?;

        let children = children.into_iter().map(|mut record| {
            if record.parent_id.as_deref() == Some(key.as_str()) {
                record.parent_id = None;
            }
            record
        });
        let incoming = create_tree_from_list(children, &self.options);

        let replaced: HashSet<String> = self.forest.subtree_keys(&key).into_iter().skip(1).collect();
        if let Some(conflict) = incoming
            .walk(TraversalOrder::PreOrder)
            .find(|k| self.forest.contains(k) && !replaced.contains(*k))
        {
            return Err(AdapterError::DuplicateKey(conflict.to_string()));
        }

        let old_children: Vec<String> = self
            .forest
            .get(&key)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();
        for child in &old_children {
            self.forest.remove_subtree(child);
        }

        let added = incoming.len();
        self.forest
            .graft(incoming, Some(key.as_str()))
            .map_err(AdapterError::DuplicateKey)?;

        let parent_checked = self.forest.get(&key).is_some_and(|n| n.checked.is_checked());
        if parent_checked {
            self.forest.check_subtree(&key, true);
        } else {
            self.forest.refresh_from(&key);
        }

        debug!(
            "Replaced children of {key:?}: {} nodes out, {added} in",
            replaced.len()
        );
        Ok(())
    }

    /// Move the dragged subtree next to or into the drop target
    ///
    /// Unknown keys are an error. Dropping a node onto itself or into its
    /// own subtree is ignored and reported as [`DropOutcome::Rejected`],
    /// so a drag gesture can never fail mid-way. Only the dragged node's
    /// parent changes; its descendants travel with it unchanged.
    pub fn handle_drop(&mut self, request: DropRequest) -> Result<DropOutcome> {
        let DropRequest {
            drag_key,
            drop_key,
            position,
        } = request;
        self.require(&drag_key)?;
        self.require(&drop_key)?;

        if drag_key == drop_key {
            warn!("Rejected drop of {drag_key:?} onto itself");
            return Ok(DropOutcome::Rejected(DropRejection::SameNode));
        }
        if self.forest.is_ancestor_of(&drag_key, &drop_key) {
            warn!("Rejected drop of {drag_key:?} into its own subtree at {drop_key:?}");
            return Ok(DropOutcome::Rejected(DropRejection::IntoOwnSubtree));
        }

        let (parent, index) = match position {
            DropPosition::Inside => (Some(drop_key.clone()), 0),
            DropPosition::Before | DropPosition::After => {
                let parent = self.forest.parent(&drop_key).map(str::to_string);
                // index among the siblings once the dragged node has left them
                let offset = self
                    .forest
                    .siblings(parent.as_deref())
                    .unwrap_or_default()
                    .iter()
                    .filter(|k| **k != drag_key)
                    .position(|k| *k == drop_key)
                    .unwrap_or(0);
                let index = match position {
                    DropPosition::After => offset + 1,
                    _ => offset,
                };
                (parent, index)
            }
        };

        let old_parent = self.forest.parent(&drag_key).map(str::to_string);
        if !self.forest.move_subtree(&drag_key, parent.as_deref(), index) {
            warn!("Rejected drop of {drag_key:?} under {parent:?}");
            return Ok(DropOutcome::Rejected(DropRejection::IntoOwnSubtree));
        }

        if let Some(old) = &old_parent {
            self.forest.refresh_from(old);
        }
        if let Some(new) = &parent {
            self.forest.refresh_from(new);
        }

        trace!("Dropped {drag_key:?} {position} {drop_key:?}");
        Ok(DropOutcome::Moved)
    }

    /// Remove the node at `key` and its whole subtree
    ///
    /// Idempotent: an unknown or already removed key is a no-op. Returns
    /// true if anything was removed.
    pub fn handle_remove(&mut self, key: &str) -> bool {
        let Some(node) = self.forest.get(key) else {
            trace!("Remove of {key:?} ignored; not in tree");
            return false;
        };
        let parent = node.parent().map(str::to_string);

        let removed = self.forest.remove_subtree(key);
        if let Some(parent) = &parent {
            self.forest.refresh_from(parent);
        }

        trace!("Removed {key:?} with {} nodes", removed.len());
        !removed.is_empty()
    }

    /// Change the title of a single node
    pub fn rename(&mut self, key: &str, title: impl Into<String>) -> Result<()> {
        let node = self
            .forest
            .get_mut(key)
            .ok_or_else(|| AdapterError::UnknownKey(key.to_string()))?;
        node.title = title.into();
        trace!("Renamed {key:?} to {:?}", node.title);
        Ok(())
    }

    /// Replace the payload of a single node, returning the old one
    pub fn set_payload(&mut self, key: &str, payload: P) -> Result<P> {
        let node = self
            .forest
            .get_mut(key)
            .ok_or_else(|| AdapterError::UnknownKey(key.to_string()))?;
        Ok(std::mem::replace(&mut node.payload, payload))
    }
}
