use markdown_liveview_engine::{InlineStyle, ViewRole};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::App,
    layout::{Row, RowStyle},
};

fn inner_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn row_style(style: RowStyle) -> Style {
    match style {
        RowStyle::Heading => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RowStyle::Code => Style::default().fg(Color::Green),
        RowStyle::Rule => Style::default().fg(Color::DarkGray),
        RowStyle::Text | RowStyle::Blank => Style::default(),
    }
}

fn inline_style(style: InlineStyle) -> Style {
    let mut out = Style::default();
    if style.strong {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.emphasis {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.strikethrough {
        out = out.add_modifier(Modifier::CROSSED_OUT);
    }
    if style.code {
        out = out.fg(Color::Green);
    }
    if style.link {
        out = out.fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
    }
    if style.image {
        out = out.fg(Color::Magenta);
    }
    out
}

fn row_line(row: &Row) -> Line<'static> {
    let base = row_style(row.style);
    Line::from(
        row.runs
            .iter()
            .map(|run| Span::styled(run.text.clone(), base.patch(inline_style(run.style))))
            .collect::<Vec<_>>(),
    )
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(outer[0]);

    app.resize(
        inner_rows(panes[0]),
        panes[1].x,
        panes[1].width.saturating_sub(2) as usize,
        inner_rows(panes[1]),
    );

    let file_name = app
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Source pane
    if let Some(source) = app.source() {
        let gutter = source.lines().len().max(1).to_string().len();
        let lines: Vec<Line> = source
            .visible_lines()
            .map(|(i, text)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>gutter$} ", i + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(text.to_string()),
                ])
            })
            .collect();
        let block = pane_block(
            format!("Source: {file_name}"),
            app.focus() == ViewRole::Source,
        );
        f.render_widget(Paragraph::new(lines).block(block), panes[0]);
    }

    // Preview pane
    if let Some(preview) = app.preview() {
        let lines: Vec<Line> = preview
            .visible_rows()
            .map(row_line)
            .collect();
        let block = pane_block(
            format!("Preview: {} blocks", preview.block_count()),
            app.focus() == ViewRole::Rendered,
        );
        f.render_widget(Paragraph::new(lines).block(block), panes[1]);
    }

    // Status bar
    let sync_state = if app.is_sync_enabled() { "on" } else { "off" };
    let status = Line::from(vec![
        Span::styled(
            format!(" sync {sync_state} | offset {} ", app.line_offset()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw(format!(" {} ", app.status())),
        Span::styled(
            "| Tab: Focus | ↑↓ PgUp PgDn: Scroll | s: Sync | +/-: Offset | w: Save | r: Reload | q: Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(vec![status]), outer[1]);
}
