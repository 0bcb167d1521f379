use crate::calendar::{DayCell, MonthCursor, CELL_EVENT_LIMIT, DAY_NAMES};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::truncate;
use crate::Config;
use chrono::NaiveDate;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Text of one grid square: day number, up to `CELL_EVENT_LIMIT` places, then "+N more"
pub fn cell_lines(cell: &DayCell, width: usize) -> Vec<String> {
    let mut lines = vec![if cell.is_today {
        format!("{} •", cell.day())
    } else {
        cell.day().to_string()
    }];
    lines.extend(
        cell.events
            .iter()
            .take(CELL_EVENT_LIMIT)
            .map(|e| truncate(&e.place, width)),
    );
    if cell.overflow() > 0 {
        lines.push(format!("+{} more", cell.overflow()));
    }
    lines
}

pub fn render_calendar(
    f: &mut Frame,
    area: Rect,
    cursor: &MonthCursor,
    cells: &[DayCell],
    selected: NaiveDate,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let muted = parse_color(&theme.muted);
    let accent = parse_color(&theme.accent);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(cursor.label())
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let weeks = (cells.len() / 7).max(1) as u32;
    let mut rows = vec![Constraint::Length(1)];
    rows.extend((0..weeks).map(|_| Constraint::Ratio(1, weeks)));
    let row_areas = Layout::vertical(rows).split(inner);
    let columns = [Constraint::Ratio(1, 7); 7];

    for (col, name) in Layout::horizontal(columns).split(row_areas[0]).iter().zip(DAY_NAMES) {
        let header = Paragraph::new(name)
            .alignment(Alignment::Center)
            .style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
        f.render_widget(header, *col);
    }

    for (week, row_area) in cells.chunks(7).zip(row_areas.iter().skip(1)) {
        let col_areas = Layout::horizontal(columns).split(*row_area);
        for (cell, cell_area) in week.iter().zip(col_areas.iter()) {
            let style = if cell.in_current_month && cell.date == selected {
                Style::default().fg(highlight_fg).bg(highlight_bg)
            } else if !cell.in_current_month {
                Style::default().fg(muted)
            } else if cell.is_today {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(fg)
            };
            let width = cell_area.width.saturating_sub(2) as usize;
            let lines: Vec<Line> = cell_lines(cell, width).into_iter().map(Line::from).collect();
            let paragraph = Paragraph::new(lines)
                .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(muted)))
                .style(style);
            f.render_widget(paragraph, *cell_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    #[test]
    fn busy_cells_show_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let events: Vec<Event> = (0..5)
            .map(|i| Event::new(format!("Evento {}", i), "Cali".into(), "2024-07-04".into()))
            .collect();
        let cell = DayCell {
            date,
            in_current_month: true,
            is_today: true,
            events,
        };
        let lines = cell_lines(&cell, 6);
        assert_eq!(lines, vec!["4 •", "Eve...", "Eve...", "Eve...", "+2 more"]);
    }
}
