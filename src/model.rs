use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One entry in the organisational tree: a person and the role they hold.
///
/// The tree is built once per load and never mutated in place; views and
/// the expansion state borrow it read-only. `level` always equals the
/// node's actual depth from the root (the loader rewrites it, root = 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn has_reports(&self) -> bool {
        !self.children.is_empty()
    }

    /// Ids of every strict descendant, in document order.
    ///
    /// Walks with an explicit stack and a visited guard: an id seen twice
    /// is skipped, so a tree that slipped past loader validation cannot
    /// loop or double-count the walk.
    pub fn descendant_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(self.id.as_str());

        let mut stack: Vec<&OrgNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if !visited.insert(node.id.as_str()) {
                continue;
            }
            ids.push(node.id.clone());
            stack.extend(node.children.iter().rev());
        }
        ids
    }
}
