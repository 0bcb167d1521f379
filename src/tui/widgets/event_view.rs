use crate::models::Event;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::Config;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

fn field(label: &str, value: String, label_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), label_style),
        Span::raw(value),
    ])
}

/// Full description of an event as styled lines
pub fn event_lines(event: &Event, favorite: bool, config: &Config) -> Vec<Line<'static>> {
    let theme = config.get_active_theme();
    let label = Style::default()
        .fg(parse_color(&theme.accent))
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(parse_color(&theme.muted));

    let mut title = event.display_name();
    if favorite {
        title.push_str("  ★");
    }
    let mut lines = vec![
        Line::from(Span::styled(title, label)),
        Line::from(""),
        field("Date", or_dash(&event.date), label),
    ];

    let time = match (&event.start_time, &event.end_time) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(start), None) => start.clone(),
        (None, Some(end)) => format!("until {}", end),
        (None, None) => "-".to_string(),
    };
    lines.push(field("Time", time, label));
    lines.push(field("City", or_dash(&event.city), label));
    lines.push(field("Entry", if event.is_free { "Free" } else { "Paid" }.to_string(), label));
    lines.push(field("Moods", or_dash(&event.moods.to_joined()), label));
    if let Some(ref link) = event.link {
        lines.push(field("Link", link.clone(), label));
    }
    if let Some(ref image) = event.image_url {
        lines.push(field("Image", image.clone(), label));
    }
    if event.is_draft {
        lines.push(field("Status", "Draft".to_string(), label));
    }
    if let Some(ref notes) = event.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes", label)));
        lines.extend(notes.lines().map(|l| Line::from(l.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Created {} · Updated {}", event.created_at, event.updated_at),
        muted,
    )));
    lines.push(Line::from(Span::styled(format!("ID {}", event.id), muted)));
    lines
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

pub fn render_event_view(f: &mut Frame, area: Rect, event: Option<&Event>, favorite: bool, config: &Config) {
    let fg_color = parse_color(&config.get_active_theme().fg);
    let block = Block::default().borders(Borders::ALL).title("Event");
    let paragraph = match event {
        Some(event) => Paragraph::new(event_lines(event, favorite, config)),
        None => Paragraph::new("No event selected"),
    };
    f.render_widget(
        paragraph
            .block(block)
            .style(Style::default().fg(fg_color))
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Detail popup opened with the select key
pub fn render_event_popup(f: &mut Frame, area: Rect, event: &Event, favorite: bool, config: &Config) {
    let theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&theme.fg))
        .bg(parse_color(&theme.bg));
    let popup_area = popup_area(area, 70, 70);
    f.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(event_lines(event, favorite, config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Event Details (Esc to close)")
                .title_alignment(Alignment::Center)
                .style(style),
        )
        .style(style)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lines_cover_optional_fields() {
        let mut event = Event::new("Teatro".into(), "Cali".into(), "2024-07-01".into());
        event.notes = Some("bring cash\nno pets".into());
        event.is_draft = true;
        let text = text_of(&event_lines(&event, true, &Config::default()));
        assert!(text.starts_with("Teatro (Cali)  ★"));
        assert!(text.contains("Time     -"));
        assert!(text.contains("Status   Draft"));
        assert!(text.contains("bring cash\nno pets"));
        assert!(!text.contains("Link"));
    }
}
