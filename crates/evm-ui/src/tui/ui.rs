//! UI rendering

use super::app::{App, Popup};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use ratatui_image::StatefulImage;

/// Rows reserved for the photo in the voter panel
const PHOTO_ROWS: u16 = 12;
/// Columns for the photo; terminal cells are about twice as tall as wide
const PHOTO_COLS: u16 = 24;

/// Render the entire UI
pub fn render<S, D>(frame: &mut Frame, app: &mut App<S, D>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panels
            Constraint::Length(1), // Toast line
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    let tally_rows = app.parties.len().max(1) as u16 + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(tally_rows)])
        .split(columns[1]);

    render_search_input(frame, app, left[0]);
    render_voter_list(frame, app, left[1]);
    render_voter_panel(frame, app, right[0]);
    render_tallies(frame, app, right[1]);
    render_toast_line(frame, app, rows[1]);
    render_status_bar(frame, app, rows[2]);

    // Dialogs last, on top of everything
    if let Some(popup) = &app.popup {
        render_popup(frame, popup);
    }
}

fn render_search_input<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect) {
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let input = &app.search_input;
    let (before, after) = input.text.split_at(input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = cursor_char.map(|c| &after[c.len_utf8()..]).unwrap_or("");

    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];
    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled("█", text_style)),
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor, text_style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_voter_list<S, D>(frame: &mut Frame, app: &mut App<S, D>, area: Rect) {
    let selected_id = app.selection.current().map(|v| v.id.clone());

    let items: Vec<ListItem> = app
        .voters
        .iter()
        .map(|voter| {
            let is_selected = selected_id.as_deref() == Some(voter.id.as_str());
            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(
                    format!("{:>4}  ", voter.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(voter.name.as_str(), name_style),
            ];
            if voter.has_voted {
                spans.push(Span::styled("  voted", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(format!(" Voters [{}] ", app.voters.len())),
        )
        .highlight_style(Style::default().bg(Color::Rgb(38, 38, 38)))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_voter_panel<S, D>(frame: &mut Frame, app: &mut App<S, D>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Voter ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(voter) = app.selection.current() else {
        let hint = Paragraph::new("Highlight a voter and press Enter").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(hint, inner);
        return;
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);
    let voted_style = if voter.has_voted {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("ID        ", label_style),
            Span::styled(voter.id.clone(), value_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Name      ", label_style),
            Span::styled(voter.name.clone(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Has voted ", label_style),
            Span::styled(voter.voted_label(), voted_style),
        ]),
    ];
    if app.selection.can_mark_voted() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Ctrl+V: mark as voted",
            Style::default().fg(Color::Yellow),
        )));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(PHOTO_ROWS), Constraint::Min(3)])
        .split(inner);
    let photo_area = Rect {
        width: chunks[0].width.min(PHOTO_COLS),
        ..chunks[0]
    };

    frame.render_widget(Paragraph::new(lines), chunks[1]);
    render_photo(frame, app, photo_area);
}

fn render_photo<S, D>(frame: &mut Frame, app: &mut App<S, D>, area: Rect) {
    if let Some(protocol) = app.photo_protocol.as_mut() {
        frame.render_stateful_widget(StatefulImage::default(), area, protocol);
        return;
    }

    let label = match &app.photo {
        Some(img) => format!("{}x{} photo", img.width(), img.height()),
        None => "No photo".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top_pad = inner.height.saturating_sub(1) / 2;
    let placeholder = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        placeholder,
        Rect {
            y: inner.y + top_pad,
            height: inner.height.min(1),
            ..inner
        },
    );
}

fn render_tallies<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect) {
    let total: u64 = app.parties.iter().map(|p| p.votes).sum();

    let items: Vec<ListItem> = if app.parties.is_empty() {
        vec![ListItem::new(Span::styled(
            "No parties registered",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.parties
            .iter()
            .map(|party| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<16}", party.name), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("{:>6}", party.votes),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Tallies [{total}] ")),
    );
    frame.render_widget(list, area);
}

/// Render the toast notification line
fn render_toast_line<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect) {
    if let Some(ref toast) = app.toast {
        let bracket = Style::default().fg(Color::DarkGray);
        let toast_style = if toast.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Blue)
        };

        let spans = vec![
            Span::styled(" [", bracket),
            Span::styled(toast.message.as_str(), toast_style),
            Span::styled("]", bracket),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_status_bar<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect) {
    let status_text = format!(
        " {} voters │ {} │ Enter: select │ Ctrl+V: mark voted │ Ctrl+E: end voting │ Ctrl+R: refresh │ Esc: quit",
        app.voters.len(),
        app.options.device_label
    );
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Centered dialog over a cleared background
fn render_popup(frame: &mut Frame, popup: &Popup) {
    let (title, color, body): (&str, Color, Vec<String>) = match popup {
        Popup::Info(message) => (" Info ", Color::Green, vec![message.clone()]),
        Popup::Error(message) => (" Error ", Color::Red, vec![message.clone()]),
        Popup::Results(result) => (" Voting Results ", Color::Cyan, result.summary_lines()),
    };

    let area = frame.area();
    let width = (area.width * 50 / 100)
        .max(40)
        .min(area.width.saturating_sub(4));
    // Body, blank line and hint, plus borders
    let height = (body.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_area = Rect::new(
        area.width.saturating_sub(width) / 2,
        area.height.saturating_sub(height) / 3,
        width,
        height,
    );

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(color))
        .title(title);

    let mut lines: Vec<Line> = body.into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc: close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
