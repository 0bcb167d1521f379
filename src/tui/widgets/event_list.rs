use crate::models::Event;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::truncate;
use crate::Config;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;
use std::collections::HashSet;

/// Second line of a list card: date, time, city and moods
pub fn event_subtitle(event: &Event) -> String {
    let mut parts = Vec::new();
    if !event.date.is_empty() {
        parts.push(event.date.clone());
    }
    match (&event.start_time, &event.end_time) {
        (Some(start), Some(end)) => parts.push(format!("{}-{}", start, end)),
        (Some(start), None) => parts.push(start.clone()),
        _ => {}
    }
    if !event.city.is_empty() {
        parts.push(event.city.clone());
    }
    if event.is_free {
        parts.push("free".to_string());
    }
    if !event.moods.is_empty() {
        parts.push(format!("[{}]", event.moods));
    }
    parts.join(" · ")
}

pub fn render_event_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    events: &[Event],
    favorites: &HashSet<String>,
    list_state: &mut ListState,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    // borders and scrollbar
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = events
        .iter()
        .map(|event| {
            let marker = if favorites.contains(&event.id) { "★ " } else { "  " };
            let first = truncate(&format!("{}{}", marker, event.display_name()), max_width);
            let second = truncate(&format!("  {}", event_subtitle(event)), max_width);
            ListItem::new(vec![
                Line::from(Span::styled(first, Style::default().fg(accent))),
                Line::from(Span::styled(second, Style::default().fg(muted))),
            ])
        })
        .collect();

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let list_area = areas[0];
    let scrollbar_area = areas[1];

    let total_items = items.len();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    f.render_stateful_widget(list, list_area, list_state);

    // two lines per event
    let visible_items = (list_area.height.saturating_sub(2) / 2) as usize;
    if total_items > visible_items && list_area.height > 2 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );
        let mut scrollbar_state = ScrollbarState::new(total_items)
            .viewport_content_length(visible_items)
            .position(list_state.selected().unwrap_or(0));
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodSet;

    #[test]
    fn subtitle_skips_missing_parts() {
        let mut event = Event::new("Teatro".into(), "Cali".into(), "2024-07-01".into());
        assert_eq!(event_subtitle(&event), "2024-07-01 · Cali");
        event.start_time = Some("19:00".into());
        event.end_time = Some("21:00".into());
        event.is_free = true;
        event.moods = MoodSet::parse("cultural, family");
        assert_eq!(
            event_subtitle(&event),
            "2024-07-01 · 19:00-21:00 · Cali · free · [cultural, family]"
        );
    }
}
