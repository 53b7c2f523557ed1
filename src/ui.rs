//! Shared view primitives for orgtree rendering.
//!
//! Used by the `watch` TUI; the flatten/prefix helpers also back the unit
//! tests that pin down what is and is not visible for a given expansion
//! state.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{ListItem, ListState};

use crate::expand::ExpansionState;
use crate::model::OrgNode;

/// A flattened tree row for display.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub depth: usize,
    pub has_children: bool,
    pub is_last_at_depth: Vec<bool>,
}

/// Flatten the tree into displayable rows.
///
/// A node's own row is always produced; its children are walked only when
/// its id is in the expansion set.
pub fn flatten_tree(root: &OrgNode, expanded: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    flatten_node(&mut rows, root, expanded, 0, &mut vec![true]);
    rows
}

fn flatten_node(
    rows: &mut Vec<TreeRow>,
    node: &OrgNode,
    expanded: &ExpansionState,
    depth: usize,
    is_last_at_depth: &mut Vec<bool>,
) {
    rows.push(TreeRow {
        id: node.id.clone(),
        name: node.name.clone(),
        role: node.role.clone(),
        depth,
        has_children: node.has_reports(),
        is_last_at_depth: is_last_at_depth.clone(),
    });

    if node.has_reports() && expanded.is_expanded(&node.id) {
        for (i, child) in node.children.iter().enumerate() {
            let child_is_last = i == node.children.len() - 1;
            is_last_at_depth.push(child_is_last);
            flatten_node(rows, child, expanded, depth + 1, is_last_at_depth);
            is_last_at_depth.pop();
        }
    }
}

// ── Rendering helpers ──────────────────────────────────────────────────

/// Colour bucket per depth. Depths past the end of the palette clamp to
/// the last entry, so the mapping stays stable however deep the tree goes.
const DEPTH_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
];

pub fn depth_style(depth: usize) -> Style {
    let color = DEPTH_PALETTE[depth.min(DEPTH_PALETTE.len() - 1)];
    Style::default().fg(color)
}

/// Build the tree connector prefix string for a row.
pub fn tree_prefix(row: &TreeRow) -> String {
    let mut prefix = String::new();
    for d in 1..row.depth + 1 {
        if d == row.depth {
            if row.is_last_at_depth[d] {
                prefix.push_str("└── ");
            } else {
                prefix.push_str("├── ");
            }
        } else if row.is_last_at_depth[d] {
            prefix.push_str("    ");
        } else {
            prefix.push_str("│   ");
        }
    }
    prefix
}

/// Expand affordance: nodes with reports show whether they are open.
pub fn expand_indicator(row: &TreeRow, expanded: &ExpansionState) -> &'static str {
    if row.has_children {
        if expanded.is_expanded(&row.id) {
            "v "
        } else {
            "> "
        }
    } else {
        "  "
    }
}

/// Build ListItems for all tree rows.
pub fn build_tree_items(rows: &[TreeRow], expanded: &ExpansionState) -> Vec<ListItem<'static>> {
    rows.iter()
        .map(|row| {
            let line = Line::from(vec![
                Span::raw(tree_prefix(row)),
                Span::raw(expand_indicator(row, expanded)),
                Span::styled(row.name.clone(), depth_style(row.depth).bold()),
                Span::styled(
                    format!("  {}", row.role),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect()
}

/// Center a rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Modal state for the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMode {
    Normal,
    Help,
}

/// Action returned by `TreeView::handle_key()`.
pub enum TreeKeyAction {
    /// Quit the application.
    Quit,
    /// Expand or collapse this node; caller applies it against the tree
    /// and rebuilds the rows.
    Toggle(String),
    /// Key was not handled; caller should check app-specific bindings.
    Unhandled,
    /// Handled, no further action needed.
    Continue,
}

/// Cursor, expansion, and modal state for the interactive tree.
#[derive(Debug)]
pub struct TreeView {
    pub rows: Vec<TreeRow>,
    pub cursor: usize,
    pub list_state: ListState,
    pub expanded: ExpansionState,
    pub error: Option<String>,
    pub mode: TreeMode,
}

impl TreeView {
    pub fn new(root: &OrgNode) -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
            expanded: ExpansionState::new(root),
            error: None,
            mode: TreeMode::Normal,
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.cursor < self.rows.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.rows.get(self.cursor).map(|r| r.id.as_str())
    }

    /// Clamp cursor after rows change (toggle, reload).
    pub fn clamp_cursor(&mut self) {
        if self.rows.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            if self.cursor >= self.rows.len() {
                self.cursor = self.rows.len() - 1;
            }
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Handle a key press. Returns an action for the caller.
    ///
    /// Handles shared keys (navigation, expand/collapse, help, quit) and
    /// help dismissal. Returns `Unhandled` for keys the caller should
    /// process (app-specific bindings).
    pub fn handle_key(&mut self, key: KeyEvent) -> TreeKeyAction {
        match self.mode {
            TreeMode::Help => {
                match key.code {
                    KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                        self.mode = TreeMode::Normal;
                    }
                    _ => {}
                }
                TreeKeyAction::Continue
            }
            TreeMode::Normal => {
                self.error = None;
                match key.code {
                    KeyCode::Char('q') => TreeKeyAction::Quit,
                    KeyCode::Char('j') | KeyCode::Down => {
                        self.move_down();
                        TreeKeyAction::Continue
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        self.move_up();
                        TreeKeyAction::Continue
                    }
                    KeyCode::Char(' ') => match self.rows.get(self.cursor) {
                        Some(row) if row.has_children => TreeKeyAction::Toggle(row.id.clone()),
                        _ => TreeKeyAction::Continue,
                    },
                    KeyCode::Char('?') => {
                        self.mode = TreeMode::Help;
                        TreeKeyAction::Continue
                    }
                    _ => TreeKeyAction::Unhandled,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load;

    fn org() -> OrgNode {
        load::from_json(
            r#"{
                "id": "ceo", "name": "Ada", "role": "CEO",
                "children": [
                    {"id": "m1", "name": "Grace", "role": "VP Engineering",
                     "children": [
                        {"id": "d1", "name": "Ken", "role": "Director",
                         "children": [{"id": "l1", "name": "Barbara", "role": "Lead"}]}
                     ]},
                    {"id": "m2", "name": "Edsger", "role": "VP Research"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn row_ids(rows: &[TreeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    // ── flatten_tree ──

    #[test]
    fn initial_state_shows_root_and_direct_reports() {
        let org = org();
        let expanded = ExpansionState::new(&org);
        let rows = flatten_tree(&org, &expanded);
        assert_eq!(row_ids(&rows), vec!["ceo", "m1", "m2"]);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn collapsed_node_children_not_rendered() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "ceo");
        let rows = flatten_tree(&org, &expanded);
        assert_eq!(row_ids(&rows), vec!["ceo"]);
        assert!(rows[0].has_children);
    }

    #[test]
    fn expanding_down_to_leaf_renders_whole_branch() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "m1");
        expanded.toggle(&org, "d1");
        let rows = flatten_tree(&org, &expanded);
        assert_eq!(row_ids(&rows), vec!["ceo", "m1", "d1", "l1", "m2"]);
    }

    #[test]
    fn cascade_collapse_hides_whole_branch() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "m1");
        expanded.toggle(&org, "d1");
        expanded.toggle(&org, "m1");

        let rows = flatten_tree(&org, &expanded);
        assert_eq!(row_ids(&rows), vec!["ceo", "m1", "m2"]);
        // m1 is back to the collapsed affordance
        assert_eq!(expand_indicator(&rows[1], &expanded), "> ");
    }

    #[test]
    fn reexpand_shows_children_collapsed_not_restored() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "m1");
        expanded.toggle(&org, "d1");
        expanded.toggle(&org, "m1");
        expanded.toggle(&org, "m1");

        let rows = flatten_tree(&org, &expanded);
        // d1 reappears collapsed; l1 stays hidden
        assert_eq!(row_ids(&rows), vec!["ceo", "m1", "d1", "m2"]);
        assert_eq!(expand_indicator(&rows[2], &expanded), "> ");
    }

    #[test]
    fn leaf_toggle_has_no_rendering_effect() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "m1");
        expanded.toggle(&org, "d1");
        let rows_before = flatten_tree(&org, &expanded);
        let before: Vec<String> = rows_before.iter().map(|r| r.id.clone()).collect();

        expanded.toggle(&org, "l1");
        let after = flatten_tree(&org, &expanded);
        assert_eq!(row_ids(&after), before);
    }

    #[test]
    fn leaf_rows_show_no_affordance() {
        let org = org();
        let expanded = ExpansionState::new(&org);
        let rows = flatten_tree(&org, &expanded);
        // m2 has no reports
        assert_eq!(expand_indicator(&rows[2], &expanded), "  ");
    }

    // ── tree_prefix ──

    #[test]
    fn tree_prefix_root_is_empty() {
        let org = org();
        let rows = flatten_tree(&org, &ExpansionState::new(&org));
        assert_eq!(tree_prefix(&rows[0]), "");
    }

    #[test]
    fn tree_prefix_middle_and_last_child() {
        let org = org();
        let rows = flatten_tree(&org, &ExpansionState::new(&org));
        assert_eq!(tree_prefix(&rows[1]), "├── ");
        assert_eq!(tree_prefix(&rows[2]), "└── ");
    }

    #[test]
    fn tree_prefix_nested_depth_2() {
        let org = org();
        let mut expanded = ExpansionState::new(&org);
        expanded.toggle(&org, "m1");
        let rows = flatten_tree(&org, &expanded);
        // d1 sits under m1, which is not the last child of ceo
        assert_eq!(row_ids(&rows), vec!["ceo", "m1", "d1", "m2"]);
        assert_eq!(tree_prefix(&rows[2]), "│   └── ");
    }

    // ── depth_style ──

    #[test]
    fn depth_style_is_stable() {
        assert_eq!(depth_style(2), depth_style(2));
        assert_ne!(depth_style(0), depth_style(1));
    }

    #[test]
    fn depth_style_clamps_past_palette() {
        let last = depth_style(DEPTH_PALETTE.len() - 1);
        assert_eq!(depth_style(17), last);
        assert_eq!(depth_style(usize::MAX), last);
    }

    // ── centered_rect ──

    #[test]
    fn centered_rect_centers_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(40, 10, area);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 7);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(40, 20, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 10);
    }

    // ── TreeView ──

    fn view() -> (OrgNode, TreeView) {
        let org = org();
        let mut tv = TreeView::new(&org);
        tv.rows = flatten_tree(&org, &tv.expanded);
        tv.clamp_cursor();
        (org, tv)
    }

    #[test]
    fn move_down_clamps_at_end() {
        let (_org, mut tv) = view();
        tv.move_down();
        tv.move_down();
        assert_eq!(tv.cursor, 2);
        tv.move_down();
        assert_eq!(tv.cursor, 2);
    }

    #[test]
    fn move_up_clamps_at_start() {
        let (_org, mut tv) = view();
        tv.move_up();
        assert_eq!(tv.cursor, 0);
    }

    #[test]
    fn clamp_cursor_after_rows_shrink() {
        let (org, mut tv) = view();
        tv.cursor = 2;
        tv.expanded.toggle(&org, "ceo");
        tv.rows = flatten_tree(&org, &tv.expanded);
        tv.clamp_cursor();
        assert_eq!(tv.cursor, 0);
        assert_eq!(tv.list_state.selected(), Some(0));
    }

    #[test]
    fn clamp_cursor_empty_rows() {
        let (_org, mut tv) = view();
        tv.rows.clear();
        tv.cursor = 5;
        tv.clamp_cursor();
        assert_eq!(tv.cursor, 0);
        assert_eq!(tv.list_state.selected(), None);
    }

    #[test]
    fn handle_key_quit() {
        let (_org, mut tv) = view();
        let key = KeyEvent::from(KeyCode::Char('q'));
        assert!(matches!(tv.handle_key(key), TreeKeyAction::Quit));
    }

    #[test]
    fn handle_key_space_toggles_selected_branch() {
        let (_org, mut tv) = view();
        tv.move_down(); // m1
        let key = KeyEvent::from(KeyCode::Char(' '));
        match tv.handle_key(key) {
            TreeKeyAction::Toggle(id) => assert_eq!(id, "m1"),
            _ => panic!("expected Toggle"),
        }
    }

    #[test]
    fn handle_key_space_on_leaf_is_continue() {
        let (_org, mut tv) = view();
        tv.move_down();
        tv.move_down(); // m2, a leaf
        let key = KeyEvent::from(KeyCode::Char(' '));
        assert!(matches!(tv.handle_key(key), TreeKeyAction::Continue));
    }

    #[test]
    fn handle_key_help_toggle() {
        let (_org, mut tv) = view();
        tv.handle_key(KeyEvent::from(KeyCode::Char('?')));
        assert_eq!(tv.mode, TreeMode::Help);
        tv.handle_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(tv.mode, TreeMode::Normal);
    }

    #[test]
    fn handle_key_in_help_swallows_other_keys() {
        let (_org, mut tv) = view();
        tv.mode = TreeMode::Help;
        let action = tv.handle_key(KeyEvent::from(KeyCode::Char('j')));
        assert!(matches!(action, TreeKeyAction::Continue));
        assert_eq!(tv.cursor, 0);
        assert_eq!(tv.mode, TreeMode::Help);
    }

    #[test]
    fn handle_key_unhandled_for_unknown() {
        let (_org, mut tv) = view();
        let key = KeyEvent::from(KeyCode::Enter);
        assert!(matches!(tv.handle_key(key), TreeKeyAction::Unhandled));
    }

    #[test]
    fn build_tree_items_one_per_row() {
        let org = org();
        let expanded = ExpansionState::new(&org);
        let rows = flatten_tree(&org, &expanded);
        let items = build_tree_items(&rows, &expanded);
        assert_eq!(items.len(), rows.len());
    }
}
