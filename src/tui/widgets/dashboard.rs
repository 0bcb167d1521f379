use crate::models::Mood;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::popup_area;
use crate::Config;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

/// Headline numbers shown above the breakdowns
pub struct DashboardStats {
    pub published: usize,
    pub drafts: usize,
    pub saved: usize,
    pub upcoming: usize,
}

/// `label  ████ 4`, bar scaled against `max`
pub fn bar_line(label: &str, count: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { count * width / max };
    format!("{:<12} {} {}", label, "█".repeat(filled), count)
}

pub fn render_mood_list(f: &mut Frame, area: Rect, moods: &[Mood], list_state: &mut ListState, config: &Config) {
    let theme = config.get_active_theme();
    let highlight_bg = parse_color(&theme.highlight_bg);
    let items: Vec<ListItem> = moods
        .iter()
        .map(|m| {
            let icon = m.icon.as_deref().unwrap_or("•");
            let suffix = if m.is_active { "" } else { " (inactive)" };
            ListItem::new(format!("{} {}{}", icon, m.name, suffix))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("Moods ({})", moods.len())))
        .style(Style::default().fg(parse_color(&theme.fg)))
        .highlight_style(Style::default().fg(get_contrast_text_color(highlight_bg)).bg(highlight_bg));
    f.render_stateful_widget(list, area, list_state);
}

pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    stats: &DashboardStats,
    mood_counts: &[(String, usize)],
    city_counts: &[(String, usize)],
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let heading = Style::default()
        .fg(parse_color(&theme.accent))
        .add_modifier(Modifier::BOLD);

    let block = Block::default().borders(Borders::ALL).title("Dashboard");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [top, bottom] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);
    let [left, right] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Published ", heading),
            Span::raw(format!("{}   ", stats.published)),
            Span::styled("Upcoming ", heading),
            Span::raw(format!("{}   ", stats.upcoming)),
            Span::styled("Saved ", heading),
            Span::raw(format!("{}   ", stats.saved)),
            Span::styled("Drafts ", heading),
            Span::raw(stats.drafts.to_string()),
        ]),
    ])
    .style(Style::default().fg(fg));
    f.render_widget(summary, top);

    for (title, counts, target) in [("By mood", mood_counts, left), ("By city", city_counts, right)] {
        let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let bar_width = (target.width as usize).saturating_sub(18);
        let mut lines = vec![Line::from(Span::styled(title, heading))];
        lines.extend(
            counts
                .iter()
                .map(|(label, count)| Line::from(bar_line(label, *count, max, bar_width))),
        );
        f.render_widget(Paragraph::new(lines).style(Style::default().fg(fg)), target);
    }
}

/// Single-line prompt for a new mood name
pub fn render_mood_input(f: &mut Frame, area: Rect, input: &str, config: &Config) {
    let theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&theme.fg))
        .bg(parse_color(&theme.bg));
    let popup = popup_area(area, 40, 20);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("New mood (Enter to add, Esc to cancel)")
        .title_alignment(Alignment::Center)
        .style(style);
    let inner = block.inner(popup);
    f.render_widget(Paragraph::new(input.to_string()).block(block).style(style), popup);

    let x = inner.x + (input.chars().count() as u16).min(inner.width.saturating_sub(1));
    if inner.height > 0 {
        f.set_cursor_position((x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_count() {
        assert_eq!(bar_line("party", 4, 4, 8), format!("{:<12} {} 4", "party", "█".repeat(8)));
        assert_eq!(bar_line("family", 1, 4, 8), format!("{:<12} {} 1", "family", "██"));
        assert_eq!(bar_line("none", 0, 0, 8), format!("{:<12}  0", "none"));
    }
}
