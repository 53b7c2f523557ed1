//! Loading boundary for organisational data.
//!
//! External documents are not trusted: ids are checked for emptiness and
//! duplicates before anything else sees the tree, and `level` values are
//! rewritten from actual depth rather than taken from the input.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};

use crate::model::OrgNode;

/// Load and validate an organisational dataset from a JSON file.
pub fn load(path: &str) -> Result<OrgNode> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    from_json(&data).with_context(|| format!("invalid organisation data in {path}"))
}

/// Parse, validate, and normalise a JSON document into a tree.
pub fn from_json(data: &str) -> Result<OrgNode> {
    let mut root: OrgNode = serde_json::from_str(data).context("failed to parse JSON")?;
    validate_ids(&root)?;
    assign_levels(&mut root);
    Ok(root)
}

/// Every id must be non-empty and unique across the whole tree.
fn validate_ids(root: &OrgNode) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id.is_empty() {
            bail!("node '{}' has an empty id", node.name);
        }
        if !seen.insert(node.id.as_str()) {
            bail!("duplicate node id '{}'", node.id);
        }
        stack.extend(node.children.iter());
    }
    Ok(())
}

fn assign_levels(root: &mut OrgNode) {
    let mut stack: Vec<(&mut OrgNode, u32)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        node.level = depth;
        for child in node.children.iter_mut() {
            stack.push((child, depth + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_node() {
        let org = from_json(r#"{"id": "ceo", "name": "Ada", "role": "CEO"}"#).unwrap();
        assert_eq!(org.id, "ceo");
        assert_eq!(org.name, "Ada");
        assert_eq!(org.level, 0);
        assert!(org.children.is_empty());
    }

    #[test]
    fn parses_nested_children() {
        let org = from_json(
            r#"{
                "id": "ceo", "name": "Ada", "role": "CEO",
                "children": [
                    {"id": "eng", "name": "Grace", "role": "VP Engineering",
                     "children": [{"id": "fe", "name": "Ken", "role": "Frontend Lead"}]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(org.children.len(), 1);
        assert_eq!(org.children[0].children[0].name, "Ken");
    }

    #[test]
    fn levels_rewritten_from_depth() {
        // Input levels are wrong on purpose; the loader must not trust them.
        let org = from_json(
            r#"{
                "id": "ceo", "name": "Ada", "role": "CEO", "level": 7,
                "children": [
                    {"id": "eng", "name": "Grace", "role": "VP", "level": 0,
                     "children": [{"id": "fe", "name": "Ken", "role": "Lead", "level": 9}]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(org.level, 0);
        assert_eq!(org.children[0].level, 1);
        assert_eq!(org.children[0].children[0].level, 2);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = from_json(
            r#"{
                "id": "ceo", "name": "Ada", "role": "CEO",
                "children": [
                    {"id": "x", "name": "B", "role": "r"},
                    {"id": "x", "name": "C", "role": "r"}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate node id 'x'"));
    }

    #[test]
    fn empty_id_rejected() {
        let err = from_json(
            r#"{
                "id": "ceo", "name": "Ada", "role": "CEO",
                "children": [{"id": "", "name": "Nameless", "role": "r"}]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty id"));
        assert!(err.to_string().contains("Nameless"));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(from_json("{not json").is_err());
    }

    #[test]
    fn load_missing_file_errors() {
        let err = load("/nonexistent/org.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write as _;
        write!(tmp, r#"{{"id": "ceo", "name": "Ada", "role": "CEO"}}"#).unwrap();
        let org = load(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(org.id, "ceo");
    }
}
