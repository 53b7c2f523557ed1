//! Expansion state for the organisation tree.
//!
//! A branch is visible only while its id is in this set. Collapsing a node
//! cascades to its whole subtree so a later re-expand starts from a clean
//! slate instead of resurrecting whatever was open before.

use std::collections::HashSet;

use crate::model::OrgNode;
use crate::query;

/// The set of node ids whose children are currently shown.
///
/// Holds exactly the root id right after construction. Mutated only by
/// [`ExpansionState::toggle`] and [`ExpansionState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new(root: &OrgNode) -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(root.id.clone());
        Self { expanded }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Drop all state and start over with only the root expanded.
    ///
    /// Used when the dataset is replaced: ids are not assumed stable
    /// across independent loads, so stale entries are discarded rather
    /// than reconciled against the new tree.
    pub fn reset(&mut self, root: &OrgNode) {
        self.expanded.clear();
        self.expanded.insert(root.id.clone());
    }

    /// Flip a node between expanded and collapsed.
    ///
    /// Collapsing removes the node's id and every descendant id in one
    /// step. Expanding inserts only the node's own id: its children come
    /// back collapsed. Ids not present in the tree, and leaves, are
    /// silent no-ops.
    pub fn toggle(&mut self, root: &OrgNode, id: &str) {
        let Some(node) = query::find(root, id) else {
            return;
        };
        if !node.has_reports() {
            return;
        }
        if self.expanded.remove(id) {
            for descendant in node.descendant_ids() {
                self.expanded.remove(&descendant);
            }
        } else {
            self.expanded.insert(id.to_string());
        }
    }
}
