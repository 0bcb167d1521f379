use crate::filter::TimeOfDay;
use crate::tui::app::{FilterFormField, FilterFormState};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::popup_area;
use crate::tui::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

struct Palette {
    fg: Color,
    bg: Color,
    highlight_fg: Color,
    highlight_bg: Color,
}

impl Palette {
    fn block_style(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.highlight_fg).bg(self.highlight_bg)
        } else {
            Style::default().fg(self.fg).bg(self.bg)
        }
    }

    fn item_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn label(text: &str, active: bool) -> String {
    format!("{}{}", if active { "> " } else { "  " }, text)
}

/// Filter modal: mood checkboxes, time-of-day and city radios, actions
pub fn render_filter_modal(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.config.get_active_theme();
    let highlight_bg = parse_color(&theme.highlight_bg);
    let palette = Palette {
        fg: parse_color(&theme.fg),
        bg: parse_color(&theme.bg),
        highlight_fg: get_contrast_text_color(highlight_bg),
        highlight_bg,
    };

    let popup_area = popup_area(area, 70, 70);
    f.render_widget(Clear, popup_area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Filters")
        .title_alignment(Alignment::Center)
        .style(palette.item_style());
    let inner = outer.inner(popup_area);
    f.render_widget(outer, popup_area);

    let Some(ref state) = app.filter.form_state else {
        return;
    };

    let [fields_area, buttons_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(5)]).areas(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(fields_area);

    render_moods(f, columns[0], app, state, &palette);

    let times: Vec<String> = TimeOfDay::ALL.iter().map(|t| t.label().to_string()).collect();
    let time_index = TimeOfDay::ALL
        .iter()
        .position(|t| *t == state.time_of_day)
        .unwrap_or(0);
    render_radio(
        f,
        columns[1],
        "Time of day:",
        &times,
        time_index,
        state.current_field == FilterFormField::TimeOfDay,
        &palette,
    );

    let mut cities = vec!["any".to_string()];
    cities.extend(app.config.cities.iter().cloned());
    render_radio(
        f,
        columns[2],
        "City:",
        &cities,
        state.city_index,
        state.current_field == FilterFormField::City,
        &palette,
    );

    render_buttons(f, buttons_area, state, &palette);
}

fn render_moods(f: &mut Frame, area: Rect, app: &App, state: &FilterFormState, palette: &Palette) {
    let active = state.current_field == FilterFormField::Moods;
    let items: Vec<ListItem> = app
        .moods
        .iter()
        .map(|m| {
            let mark = if state.moods.contains(&m.name) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, m.name))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label("Moods (Space):", active))
                .style(palette.block_style(active)),
        )
        .style(palette.item_style())
        .highlight_style(
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default();
    if active && !app.moods.is_empty() {
        list_state.select(Some(state.mood_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_radio(
    f: &mut Frame,
    area: Rect,
    title: &str,
    options: &[String],
    selected: usize,
    active: bool,
    palette: &Palette,
) {
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(idx, opt)| {
            let radio = if idx == selected { "●" } else { "○" };
            ListItem::new(format!("{} {}", radio, opt))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label(title, active))
                .style(palette.block_style(active)),
        )
        .style(palette.item_style())
        .highlight_style(
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_buttons(f: &mut Frame, area: Rect, state: &FilterFormState, palette: &Palette) {
    let buttons = [
        (FilterFormField::Apply, "Apply"),
        (FilterFormField::Clear, "Clear"),
        (FilterFormField::Cancel, "Cancel"),
    ];
    let any_active = buttons.iter().any(|(field, _)| *field == state.current_field);
    let spans: Vec<Span> = buttons
        .iter()
        .flat_map(|(field, text)| {
            let active = *field == state.current_field;
            let style = if active {
                Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg)
            } else {
                palette.item_style()
            };
            [Span::styled(label(text, active), style), Span::raw("   ")]
        })
        .collect();

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label("Actions", any_active))
                .style(palette.block_style(any_active)),
        )
        .style(palette.item_style())
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
