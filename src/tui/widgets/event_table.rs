use crate::models::Event;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;
use std::collections::HashSet;

const HEADERS: [&str; 7] = ["", "Date", "Time", "Place", "City", "Moods", "Entry"];

fn event_row(event: &Event, favorite: bool) -> Row<'static> {
    Row::new(vec![
        Cell::from(if favorite { "★" } else { "" }),
        Cell::from(event.date.clone()),
        Cell::from(event.start_time.clone().unwrap_or_default()),
        Cell::from(event.place.clone()),
        Cell::from(event.city.clone()),
        Cell::from(event.moods.to_joined()),
        Cell::from(if event.is_free { "free" } else { "" }),
    ])
}

pub fn render_event_table(
    f: &mut Frame,
    area: Rect,
    events: &[Event],
    favorites: &HashSet<String>,
    selected: Option<usize>,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = events
        .iter()
        .map(|e| event_row(e, favorites.contains(&e.id)))
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(30),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Events ({})", events.len())),
        )
        .style(Style::default().fg(fg_color))
        .row_highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg))
        .column_spacing(1);

    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}
