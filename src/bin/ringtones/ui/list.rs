//! Ringtone list widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use rtttl_player::catalog::RingtoneRecord;

/// Render the catalog, marking every row for which `is_playing` holds.
///
/// `is_playing` is asked again for each row on every frame, so a row can
/// never show stale state after a play, stop, or completion.
pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    records: &[RingtoneRecord],
    is_playing: impl Fn(&str) -> bool,
    selected: usize,
) {
    let block = Block::default()
        .title(format!(" Ringtones ({}) ", records.len()))
        .borders(Borders::ALL);

    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            let playing = is_playing(&record.id);
            let marker = if playing { "▶ " } else { "  " };
            let style = if playing {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            let mut spans = vec![Span::styled(format!("{marker}{}", record.title()), style)];
            if let Some(name) = record.rtttl_name.as_deref().filter(|n| *n != record.title()) {
                spans.push(Span::styled(
                    format!("  ({name})"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
