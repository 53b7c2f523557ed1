//! Read-only lookups over a loaded organisation tree.

use crate::model::OrgNode;

/// Find a node by id anywhere in the tree.
pub fn find<'a>(root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter());
    }
    None
}

/// The manager a node reports to. None for the root and for unknown ids.
pub fn manager_of<'a>(root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.children.iter().any(|c| c.id == id) {
            return Some(node);
        }
        stack.extend(node.children.iter());
    }
    None
}

/// Nodes from the root down to the given node, inclusive.
pub fn chain_of_command<'a>(root: &'a OrgNode, id: &str) -> Option<Vec<&'a OrgNode>> {
    fn walk<'a>(node: &'a OrgNode, id: &str, path: &mut Vec<&'a OrgNode>) -> bool {
        path.push(node);
        if node.id == id {
            return true;
        }
        for child in &node.children {
            if walk(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Every node in the tree, in document order.
pub fn directory(root: &OrgNode) -> Vec<&OrgNode> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Case-insensitive substring match on name or role, in document order.
pub fn search<'a>(root: &'a OrgNode, query: &str) -> Vec<&'a OrgNode> {
    let query = query.to_lowercase();
    directory(root)
        .into_iter()
        .filter(|n| {
            n.name.to_lowercase().contains(&query) || n.role.to_lowercase().contains(&query)
        })
        .collect()
}

/// Number of people anywhere under this node.
pub fn total_reports(node: &OrgNode) -> usize {
    let mut count = 0;
    let mut stack: Vec<&OrgNode> = node.children.iter().collect();
    while let Some(n) = stack.pop() {
        count += 1;
        stack.extend(n.children.iter());
    }
    count
}
