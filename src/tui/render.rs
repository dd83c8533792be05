//! UI rendering
//!
//! Layout, top to bottom: query line, row list (with the preview pane to its
//! right when visible), status line. Modal output is drawn on top.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, Mode};

const CURSOR_MARKER: &str = "> ";
const SELECTED_MARKER: &str = "* ";
const BLANK_MARKER: &str = "  ";

/// Main render entry point. Called each frame by the event loop.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_prompt(app, frame, chunks[0]);

    if app.preview.is_visible() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        render_list(app, frame, body[0]);
        render_preview(app, frame, body[1]);
    } else {
        render_list(app, frame, chunks[1]);
    }

    render_status(app, frame, chunks[2]);

    if let Some(display) = app.display() {
        let area = centered_rect(80, 80, frame.area());
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Output (esc to close)");
        frame.render_widget(
            Paragraph::new(display.text.as_str())
                .block(block)
                .scroll((clamp_u16(display.scroll), 0)),
            area,
        );
    }
}

fn render_prompt(app: &App, frame: &mut Frame, area: Rect) {
    let (prefix, text) = match app.ui.mode {
        Mode::Command => (":", app.ui.command_line.as_str()),
        Mode::Search => ("/", app.ui.query.as_str()),
        Mode::Normal => (">", app.ui.query.as_str()),
    };
    let prefix_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(format!("{} ", prefix), prefix_style),
        Span::raw(text),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if app.ui.mode != Mode::Normal {
        let x = area.x + 2 + clamp_u16(text.chars().count());
        frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

/// First display index shown so the cursor stays inside `height` rows
pub fn list_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        (cursor + 1).saturating_sub(height)
    }
}

fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let picker = &app.picker;
    let height = area.height as usize;
    let offset = list_offset(picker.cursor(), height);

    let lines: Vec<Line> = picker
        .filter()
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(display_idx, &original)| {
            let focused = display_idx == picker.cursor();
            let cursor_marker = if focused { CURSOR_MARKER } else { BLANK_MARKER };
            let selected_marker = if picker.is_selected(original) {
                SELECTED_MARKER
            } else {
                BLANK_MARKER
            };
            let label = picker
                .labels()
                .get(original)
                .map(String::as_str)
                .unwrap_or_default();

            let style = if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(cursor_marker, Style::default().fg(Color::Yellow)),
                Span::styled(selected_marker, Style::default().fg(Color::Green)),
                Span::styled(label.to_string(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_preview(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(app.preview.content())
            .block(block)
            .scroll((clamp_u16(app.preview.scroll()), 0)),
        area,
    );
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let picker = &app.picker;
    let mut counts = format!("{}/{}", picker.len(), picker.rows().len());
    if !picker.selections().is_empty() {
        counts.push_str(&format!(" [{} selected]", picker.selections().len()));
    }
    if let Some(chord) = app.keymap.pending_chord_display() {
        counts.push_str(&format!(" {}-", chord));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(clamp_u16(counts.chars().count())),
        ])
        .split(area);

    let status = app.status().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(counts).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    let x = r.x + (r.width.saturating_sub(popup_width)) / 2;
    let y = r.y + (r.height.saturating_sub(popup_height)) / 2;
    Rect::new(x, y, popup_width, popup_height)
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
