use parkcraft_core::Cell;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::app::{AppMode, EditorApp};

pub fn render(frame: &mut Frame, app: &EditorApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Message
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_message(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.mode == AppMode::PickKind {
        render_kind_popup(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &EditorApp, area: Rect) {
    let kind = app
        .current_kind()
        .map(|k| format!("{} ({}x{})", k.display_name, k.width, k.height))
        .unwrap_or_default();
    let selection = match app.selected_object() {
        Some(placed) => format!("  selected: {} at {}", placed.kind, placed.anchor),
        None => String::new(),
    };

    let export = if app.has_target() {
        format!("  export: {}", app.export.path.display())
    } else {
        String::new()
    };

    let title = format!(
        "parkcraft - {}  rot {}°  cursor ({}, {}){}{}",
        kind, app.rotation, app.cursor.0, app.cursor.1, selection, export
    );

    let header =
        Paragraph::new(title).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

/// Two characters per cell: the first letter of the occupying kind, or a dot.
fn render_grid(frame: &mut Frame, app: &EditorApp, area: Rect) {
    let grid = app.layout.grid();
    let preview = app.preview();
    let selected = app
        .selected_object()
        .and_then(|p| p.footprint(app.layout.catalog()).ok());

    let mut lines: Vec<Line> = Vec::with_capacity(grid.rows());
    for y in 0..grid.rows() as i32 {
        let mut spans = Vec::with_capacity(grid.cols());
        for x in 0..grid.cols() as i32 {
            let (glyph, mut style) = match grid.get(x, y) {
                Some(Cell::Occupied { kind, .. }) => {
                    let letter = kind.chars().next().unwrap_or('?').to_ascii_uppercase();
                    (format!("{letter} "), Style::default().fg(Color::White))
                }
                _ => (". ".to_string(), Style::default().fg(Color::DarkGray)),
            };

            if selected.is_some_and(|f| f.contains(x, y)) {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            if let Some((footprint, fits)) = preview {
                if footprint.contains(x, y) {
                    style = style.bg(if fits { Color::Green } else { Color::Red });
                }
            }
            if (x, y) == app.cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(glyph, style));
        }
        lines.push(Line::from(spans));
    }

    let title = format!(
        "Grid {}x{}  objects: {}",
        grid.cols(),
        grid.rows(),
        app.layout.registry().len()
    );
    let paragraph =
        Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(paragraph, area);
}

fn render_message(frame: &mut Frame, app: &EditorApp, area: Rect) {
    let line = if let Some(ref error) = app.last_error {
        Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(ref message) = app.last_message {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, app: &EditorApp, area: Rect) {
    let status = match app.mode {
        AppMode::Edit => {
            "←↑↓→/hjkl: Move  Tab/F2: Kind  r: Rotate  Enter: Place  Space: Select  d: Delete  e: Export  q/Esc: Quit"
        }
        AppMode::PickKind => "↑/↓: Navigate  Enter: Select  Esc: Cancel",
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

/// Kind picker sized to its entries, centered over the grid.
fn render_kind_popup(frame: &mut Frame, app: &EditorApp) {
    let labels: Vec<String> = app
        .layout
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let marker = if i == app.kind_index { " ✓" } else { "" };
            format!("{} {}x{}{}", kind.display_name, kind.width, kind.height, marker)
        })
        .collect();

    let widest = labels.iter().map(|l| Line::from(l.as_str()).width()).max().unwrap_or(0);
    // two border columns plus the highlight symbol
    let area = popup_area(frame.area(), widest + 4, labels.len() + 2);

    let items: Vec<ListItem> = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == app.kind_index {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Select Kind"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.popup_selected));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

/// A `width` x `height` rectangle centered in `outer`, clamped to fit.
fn popup_area(outer: Rect, width: usize, height: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(outer.width);
    let height = u16::try_from(height).unwrap_or(u16::MAX).min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_clamped() {
        let outer = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_area(outer, 20, 9), Rect::new(30, 7, 20, 9));
        assert_eq!(popup_area(outer, 200, 100), outer);

        let offset = Rect::new(10, 5, 11, 4);
        assert_eq!(popup_area(offset, 5, 2), Rect::new(13, 6, 5, 2));
    }
}
