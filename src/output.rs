use serde::Serialize;

use crate::model::OrgNode;
use crate::query;

/// Detail view of one person, for `show` and the TUI detail panel.
#[derive(Serialize)]
pub struct NodeDetail<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub level: u32,
    pub manager: Option<&'a str>,
    pub direct_reports: usize,
    pub total_reports: usize,
    /// Names from the root down to this person.
    pub chain: Vec<&'a str>,
}

impl<'a> NodeDetail<'a> {
    pub fn new(root: &'a OrgNode, node: &'a OrgNode) -> Self {
        NodeDetail {
            id: &node.id,
            name: &node.name,
            role: &node.role,
            level: node.level,
            manager: query::manager_of(root, &node.id).map(|m| m.name.as_str()),
            direct_reports: node.children.len(),
            total_reports: query::total_reports(node),
            chain: query::chain_of_command(root, &node.id)
                .map(|nodes| nodes.iter().map(|n| n.name.as_str()).collect())
                .unwrap_or_default(),
        }
    }
}

pub fn format_node_detail(detail: &NodeDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name:     {}\n", detail.name));
    out.push_str(&format!("Role:     {}\n", detail.role));
    out.push_str(&format!("Id:       {}\n", detail.id));
    out.push_str(&format!("Level:    {}\n", detail.level));
    if let Some(manager) = detail.manager {
        out.push_str(&format!("Manager:  {}\n", manager));
    }
    if detail.chain.len() > 1 {
        out.push_str(&format!("Chain:    {}\n", detail.chain.join(" > ")));
    }
    out.push_str(&format!(
        "Reports:  {} direct, {} total\n",
        detail.direct_reports, detail.total_reports
    ));
    out
}

/// One line of the flat directory listing.
#[derive(Serialize)]
pub struct DirectoryEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub level: u32,
    pub manager: Option<&'a str>,
}

impl<'a> DirectoryEntry<'a> {
    pub fn new(root: &'a OrgNode, node: &'a OrgNode) -> Self {
        DirectoryEntry {
            id: &node.id,
            name: &node.name,
            role: &node.role,
            level: node.level,
            manager: query::manager_of(root, &node.id).map(|m| m.name.as_str()),
        }
    }
}

pub fn format_directory(entries: &[DirectoryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let manager_info = entry
            .manager
            .map(|m| format!("  (reports to {m})"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}  {}{}\n",
            entry.name, entry.role, manager_info
        ));
    }
    out
}

/// Full printed tree with connector glyphs, optionally depth-limited.
/// `max_depth` counts from the root: 0 prints the root line only.
pub fn format_org_tree(root: &OrgNode, max_depth: Option<u32>) -> String {
    let mut out = String::new();
    write_tree(&mut out, root, "", "", max_depth);
    out
}

/// Write a node line and recurse into children.
/// `line_prefix` is what goes before the name on this node's line.
/// `child_prefix` is the base prefix for this node's children's connectors.
fn write_tree(
    out: &mut String,
    node: &OrgNode,
    line_prefix: &str,
    child_prefix: &str,
    max_depth: Option<u32>,
) {
    out.push_str(&format!("{}{}  {}\n", line_prefix, node.name, node.role));

    if let Some(limit) = max_depth {
        if node.level >= limit {
            return;
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let last = i == node.children.len() - 1;
        let (branch, cont) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        write_tree(
            out,
            child,
            &format!("{child_prefix}{branch}"),
            &format!("{child_prefix}{cont}"),
            max_depth,
        );
    }
}

pub fn format_search_results(root: &OrgNode, matches: &[&OrgNode]) -> String {
    let mut out = String::new();
    for node in matches {
        let manager_info = query::manager_of(root, &node.id)
            .map(|m| format!("  (reports to {})", m.name))
            .unwrap_or_default();
        out.push_str(&format!("{}  {}{}\n", node.name, node.role, manager_info));
    }
    out
}
