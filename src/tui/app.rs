use anyhow::{Context, Result};

use crate::load;
use crate::model::OrgNode;
use crate::output::NodeDetail;
use crate::query;
use crate::ui::{self, TreeView};

/// Resolve the subtree being browsed. Falls back to the whole tree when
/// no root id is configured.
fn subtree_root<'a>(org: &'a OrgNode, root_id: Option<&str>) -> &'a OrgNode {
    root_id.and_then(|id| query::find(org, id)).unwrap_or(org)
}

#[derive(Debug)]
pub struct App {
    path: String,
    org: OrgNode,
    root_id: Option<String>,
    pub tree: TreeView,
    pub show_detail: bool,
}

impl App {
    pub fn new(path: &str, org: OrgNode, root_id: Option<&str>) -> Result<Self> {
        if let Some(id) = root_id {
            query::find(&org, id).with_context(|| format!("no node with id '{id}'"))?;
        }
        let tree = TreeView::new(subtree_root(&org, root_id));
        let mut app = App {
            path: path.to_string(),
            org,
            root_id: root_id.map(str::to_string),
            tree,
            show_detail: false,
        };
        app.refresh();
        Ok(app)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rebuild display rows from the current tree and expansion state.
    pub fn refresh(&mut self) {
        let rows = ui::flatten_tree(
            subtree_root(&self.org, self.root_id.as_deref()),
            &self.tree.expanded,
        );
        self.tree.rows = rows;
        self.tree.clamp_cursor();
    }

    /// Expand or collapse the node with this id, then rebuild rows.
    pub fn toggle(&mut self, id: &str) {
        let root = subtree_root(&self.org, self.root_id.as_deref());
        self.tree.expanded.toggle(root, id);
        self.refresh();
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    /// Detail for the person under the cursor. Looked up against the full
    /// tree so the manager shows even for the configured subtree root.
    pub fn selected_detail(&self) -> Option<NodeDetail<'_>> {
        let id = self.tree.selected_id()?;
        let node = query::find(&self.org, id)?;
        Some(NodeDetail::new(&self.org, node))
    }

    /// Replace the dataset from disk.
    ///
    /// On success the expansion state is reset to the root only: ids are
    /// not assumed stable across independent loads, so nothing is
    /// reconciled against the new tree. On failure the previous dataset
    /// stays and the error is surfaced in the status line.
    pub fn reload(&mut self) {
        match load::load(&self.path) {
            Ok(org) => {
                if let Some(id) = self.root_id.as_deref() {
                    if query::find(&org, id).is_none() {
                        self.tree.error = Some(format!("node '{id}' missing from reloaded data"));
                        return;
                    }
                }
                self.org = org;
                let root = subtree_root(&self.org, self.root_id.as_deref());
                self.tree.expanded.reset(root);
                self.tree.error = None;
                self.refresh();
            }
            Err(e) => {
                self.tree.error = Some(format!("reload failed: {e:#}"));
            }
        }
    }
}
