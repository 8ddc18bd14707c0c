//! UI rendering

use super::app::{App, LoadState};
use fairway_core::Page;
use fairway_engine::engine::{AnnotatedCell, AnnotatedRow, AnnotatedTable, Tier, Trend};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

pub(crate) const TAB_BAR_HEIGHT: u16 = 3;
pub(crate) const BODY_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const COLUMN_SPACING: usize = 2;

const CROWN: &str = "\u{1F451}";

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &App) {
    let [tabs_area, body_area, status_area] = split_main_chunks(f.area());
    draw_tabs(f, app, tabs_area);
    draw_body(f, app, body_area);
    draw_status_bar(f, app, status_area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = app.pages.iter().map(|p| p.label()).collect();
    let tabs = Tabs::new(titles)
        .select(app.current)
        .block(Block::default().borders(Borders::ALL).title(" Fairway "))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_body(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let paragraph = match &app.state {
        LoadState::Loading => Paragraph::new(format!("Loading {}\u{2026}", app.page().label()))
            .style(Style::default().fg(Color::DarkGray)),
        LoadState::Failed(message) => Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Error: {}", message),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry.",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        LoadState::Ready(page) => Paragraph::new(page_lines(page)).scroll((app.scroll, 0)),
    };
    f.render_widget(paragraph.block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = match &app.state {
        _ if app.is_loading() => "loading",
        LoadState::Loading => "idle",
        LoadState::Ready(_) => "ready",
        LoadState::Failed(_) => "error",
    };
    let text = format!(
        " {} [{}] | \u{2190}/\u{2192} page  j/k scroll  r reload  q quit",
        app.page().label(),
        state
    );
    let status = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(status, area);
}

/// Lay out a whole page as styled lines: heading, then each table.
pub(crate) fn page_lines(page: &Page) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        page.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &page.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if page.tables.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No tables to show",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for table in &page.tables {
        lines.push(Line::from(""));
        lines.extend(table_lines(table));
    }
    lines
}

fn table_lines(table: &AnnotatedTable) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        table.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))];

    if table.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No data",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let widths = column_widths(table);
    for row in &table.rows {
        let mut spans = Vec::with_capacity(widths.len() * 2);
        for (col, width) in widths.iter().enumerate() {
            let (text, style) = match row.cells.get(col) {
                Some(cell) => (cell_text(cell), cell_style(row, cell)),
                None => (String::new(), row_style(row)),
            };
            spans.push(Span::styled(pad(&text, *width), style));
            spans.push(Span::raw(" ".repeat(COLUMN_SPACING)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn cell_text(cell: &AnnotatedCell) -> String {
    if cell.style.champion && !cell.text.is_empty() {
        format!("{} {}", cell.text, CROWN)
    } else {
        cell.text.clone()
    }
}

fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn column_widths(table: &AnnotatedTable) -> Vec<usize> {
    let mut widths = vec![0; table.width()];
    for row in &table.rows {
        for (col, cell) in row.cells.iter().enumerate() {
            widths[col] = widths[col].max(display_width(&cell_text(cell)));
        }
    }
    widths
}

pub(crate) fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Gold => Color::Rgb(255, 215, 0),
        Tier::Silver => Color::Rgb(192, 192, 192),
        Tier::Bronze => Color::Rgb(205, 127, 50),
    }
}

fn row_style(row: &AnnotatedRow) -> Style {
    match row.medal {
        Some(tier) => Style::default().fg(Color::Black).bg(tier_color(tier)),
        None => Style::default(),
    }
}

pub(crate) fn cell_style(row: &AnnotatedRow, cell: &AnnotatedCell) -> Style {
    let mut style = row_style(row);
    let flags = &cell.style;

    if flags.header {
        style = style.add_modifier(Modifier::BOLD);
    }
    style = match flags.trend {
        Some(Trend::Up) => style.fg(Color::Green),
        Some(Trend::Down) => style.fg(Color::Red),
        Some(Trend::Unchanged) => style.fg(Color::Yellow),
        None => style,
    };
    if let Some(tier) = flags.matchplay {
        style = style.fg(Color::Black).bg(tier_color(tier));
    }
    if flags.total {
        style = style.add_modifier(Modifier::BOLD);
    }
    if flags.alternate {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}
