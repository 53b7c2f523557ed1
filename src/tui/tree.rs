use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, Paragraph, Wrap};

use super::app::App;
use crate::ui;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if app.show_detail {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        render_tree(frame, app, chunks[0]);
        render_detail(frame, app, chunks[1]);
    } else {
        render_tree(frame, app, area);
    }

    if app.tree.mode == ui::TreeMode::Help {
        render_help(frame);
    }
}

fn render_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let tree_area = chunks[0];
    let footer_area = chunks[1];

    let items = ui::build_tree_items(&app.tree.rows, &app.tree.expanded);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Organisation "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, tree_area, &mut app.tree.list_state);

    render_footer(frame, app, footer_area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(err) = &app.tree.error {
        Line::from(vec![Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )])
    } else {
        Line::from(vec![
            Span::styled("j/k", Style::default().fg(Color::Cyan)),
            Span::raw(":nav  "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(":expand/collapse  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(":detail  "),
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::raw(":reload  "),
            Span::styled("?", Style::default().fg(Color::Cyan)),
            Span::raw(":help  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(":quit"),
        ])
    };

    frame.render_widget(Paragraph::new(text), area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Detail ");

    let Some(detail) = app.selected_detail() else {
        frame.render_widget(Paragraph::new("Nothing selected.").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            detail.name.to_string(),
            Style::default().bold(),
        )),
        Line::raw(detail.role.to_string()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Id:      ", label),
            Span::raw(detail.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Level:   ", label),
            Span::raw(detail.level.to_string()),
        ]),
    ];
    if let Some(manager) = detail.manager {
        lines.push(Line::from(vec![
            Span::styled("Manager: ", label),
            Span::raw(manager.to_string()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Reports: ", label),
        Span::raw(format!(
            "{} direct, {} total",
            detail.direct_reports, detail.total_reports
        )),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_help(frame: &mut Frame) {
    let term = frame.area();
    let width = 46.min(term.width.saturating_sub(4));
    let height = 12.min(term.height.saturating_sub(2));
    let area = ui::centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help_text = vec![
        Line::from(vec![
            Span::styled("j/Down  ", Style::default().fg(Color::Cyan)),
            Span::raw("Move down"),
        ]),
        Line::from(vec![
            Span::styled("k/Up    ", Style::default().fg(Color::Cyan)),
            Span::raw("Move up"),
        ]),
        Line::from(vec![
            Span::styled("Space   ", Style::default().fg(Color::Cyan)),
            Span::raw("Expand/collapse branch"),
        ]),
        Line::from(vec![
            Span::styled("Enter/d ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle detail panel"),
        ]),
        Line::from(vec![
            Span::styled("r       ", Style::default().fg(Color::Cyan)),
            Span::raw("Reload dataset from disk"),
        ]),
        Line::from(vec![
            Span::styled("?       ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle help"),
        ]),
        Line::from(vec![
            Span::styled("q/Esc   ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
