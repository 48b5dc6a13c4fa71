//! TUI rendering
//!
//! Draws a [`View`] top to bottom: prompt, message line, branch list, page
//! indicator and key hints.

mod colors;


use crate::app::{Mode, Row, View};
use crate::config::keys::format_hints;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the full selection UI
pub fn render(frame: &mut Frame<'_>, view: &View) {
    let message_height = u16::from(view.error.is_some() || view.status.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(message_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_prompt(frame, view, chunks[0]);
    render_message(frame, view, chunks[1]);
    render_list(frame, view, chunks[2]);
    render_pager(frame, view, chunks[3]);
    render_footer(frame, view, chunks[4]);
}

fn render_prompt(frame: &mut Frame<'_>, view: &View, area: Rect) {
    let label = match view.mode {
        Mode::Select => "Select #: > ",
        Mode::Filter => "Filter: ",
    };
    let value_style = match view.mode {
        Mode::Select => Style::default().fg(colors::SELECTED),
        Mode::Filter => Style::default().fg(colors::TEXT_PRIMARY).bg(colors::INPUT_BG),
    };

    let line = if view.mode == Mode::Filter && view.prompt.is_empty() {
        Line::from(vec![
            Span::styled(label, Style::default().fg(colors::TEXT_DIM)),
            Span::styled("type to filter", Style::default().fg(colors::TEXT_MUTED)),
        ])
    } else {
        Line::from(vec![
            Span::styled(label, Style::default().fg(colors::TEXT_DIM)),
            Span::styled(view.prompt.as_str(), value_style),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);

    if let Some(caret) = view.caret {
        let offset = label.chars().count().saturating_add(caret);
        let x = area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

fn render_message(frame: &mut Frame<'_>, view: &View, area: Rect) {
    let span = match (&view.error, &view.status) {
        (Some(error), _) => Span::styled(
            format!("Error: {error}"),
            Style::default()
                .fg(colors::ERROR)
                .add_modifier(Modifier::BOLD),
        ),
        (None, Some(status)) => {
            Span::styled(status.as_str(), Style::default().fg(colors::PENDING))
        }
        (None, None) => return,
    };
    frame.render_widget(Paragraph::new(Line::from(span)), area);
}

fn render_list(frame: &mut Frame<'_>, view: &View, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(colors::BORDER));

    let lines: Vec<Line<'_>> = if view.rows.is_empty() {
        vec![Line::from(Span::styled(
            "  No branches",
            Style::default().fg(colors::TEXT_MUTED),
        ))]
    } else {
        view.rows.iter().map(row_line).collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row_line(row: &Row) -> Line<'_> {
    let marker = if row.is_cursor { "> " } else { "  " };
    let current = if row.is_current { "* " } else { "" };

    let name_color = if row.is_current {
        colors::CURRENT_BRANCH
    } else if row.is_remote {
        colors::REMOTE_BRANCH
    } else {
        colors::TEXT_PRIMARY
    };
    let name_style = if row.is_cursor {
        Style::default().fg(name_color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(name_color)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(colors::SELECTED)),
        Span::styled(
            format!("{:>3}. ", row.number),
            Style::default().fg(colors::TEXT_DIM),
        ),
        Span::styled(format!("{current}{}", row.name), name_style),
    ];
    if let Some(sha) = &row.short_sha {
        spans.push(Span::styled(
            format!("  {sha}"),
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    if let Some(at) = row.committed_at {
        spans.push(Span::styled(
            format!("  {}", at.format("%Y-%m-%d")),
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    if let Some(subject) = &row.subject {
        spans.push(Span::styled(
            format!("  {subject}"),
            Style::default().fg(colors::TEXT_DIM),
        ));
    }

    let line = Line::from(spans);
    if row.is_cursor {
        line.style(Style::default().bg(colors::SURFACE_HIGHLIGHT))
    } else {
        line
    }
}

fn render_pager(frame: &mut Frame<'_>, view: &View, area: Rect) {
    let noun = if view.total == 1 { "branch" } else { "branches" };
    let text = format!(
        "page {}/{} • {} {noun}",
        view.page, view.total_pages, view.total
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(colors::TEXT_DIM),
        ))),
        area,
    );
}

fn render_footer(frame: &mut Frame<'_>, view: &View, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", format_hints(view.hints)),
        Style::default().fg(colors::TEXT_DIM),
    )))
    .style(Style::default().bg(colors::SURFACE));
    frame.render_widget(footer, area);
}
