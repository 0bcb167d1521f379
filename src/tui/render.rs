use crate::tui::app::{Mode, Tab};
use crate::tui::widgets::{
    calendar_view::render_calendar,
    color::parse_color,
    confirm_delete::render_confirm_delete,
    dashboard::{render_dashboard, render_mood_input, render_mood_list, DashboardStats},
    event_list::render_event_list,
    event_table::render_event_table,
    event_view::{render_event_popup, render_event_view},
    filter_modal::render_filter_modal,
    filters_box::render_filters_box,
    help::render_help,
    status_bar::render_status_bar,
    tabs::render_tabs,
};
use crate::tui::{App, Layout};
use crate::utils::{format_key_binding_for_display as key, parse_date};
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let area = f.area();
    let active_theme = app.config.get_active_theme();
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Parchify")
        .title_alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(parse_color(&active_theme.fg))
                .bg(parse_color(&active_theme.bg)),
        );
    f.render_widget(outer_block, area);

    render_tabs(f, layout.tabs_area, app.ui.current_tab, app.drafts.len(), &app.config);

    let items = &app.view.items;
    let selected = items.get(app.ui.selected_index);
    let selected_favorite = selected.map(|e| app.is_favorite(e)).unwrap_or(false);

    match app.ui.current_tab {
        Tab::Cards | Tab::Saved | Tab::Drafts => {
            let title = match app.ui.current_tab {
                Tab::Saved => format!("Saved ({})", items.len()),
                Tab::Drafts => format!("Drafts ({})", items.len()),
                _ => format!("Events ({} of {})", items.len(), app.events.len()),
            };
            render_event_list(
                f,
                layout.sidebar_area,
                &title,
                items,
                &app.favorites,
                &mut app.ui.list_state,
                &app.config,
            );
            render_event_view(f, layout.main_area, selected, selected_favorite, &app.config);
        }
        Tab::Table => {
            let selected_row = if items.is_empty() { None } else { Some(app.ui.selected_index) };
            render_event_table(f, layout.main_area, items, &app.favorites, selected_row, &app.config);
        }
        Tab::Calendar => {
            let title = app.calendar.selected.format("%a %d %b").to_string();
            render_event_list(
                f,
                layout.sidebar_area,
                &title,
                items,
                &app.favorites,
                &mut app.ui.list_state,
                &app.config,
            );
            let cells = &app.view.grid;
            render_calendar(
                f,
                layout.main_area,
                &app.calendar.cursor,
                cells,
                app.calendar.selected,
                &app.config,
            );
        }
        Tab::Dashboard => {
            render_mood_list(f, layout.sidebar_area, &app.moods, &mut app.ui.list_state, &app.config);
            let stats = DashboardStats {
                published: app.events.len(),
                drafts: app.drafts.len(),
                saved: app.events.iter().filter(|e| app.is_favorite(e)).count(),
                upcoming: app
                    .events
                    .iter()
                    .filter(|e| parse_date(&e.date).map(|d| d >= app.today).unwrap_or(false))
                    .count(),
            };
            render_dashboard(
                f,
                layout.main_area,
                &stats,
                &app.mood_counts(),
                &app.city_counts(),
                &app.config,
            );
        }
    }

    render_filters_box(f, layout.filters_area, &app.get_filter_summary(), &app.config);

    // Overlays go on top of the normal content
    match app.ui.mode {
        Mode::Help => render_help(f, area, &app.config),
        Mode::Filter => render_filter_modal(f, area, app),
        Mode::MoodInput => render_mood_input(f, area, &app.mood_input, &app.config),
        Mode::Detail => {
            if let Some(event) = selected {
                render_event_popup(f, area, event, selected_favorite, &app.config);
            }
        }
        Mode::View | Mode::Search => {}
    }

    if let Some(ref pending) = app.modals.delete_confirmation {
        render_confirm_delete(f, area, pending, app.modals.delete_modal_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &key_hints, &app.config);
}

pub fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Close help", key(&kb.help))],
        Mode::Search => vec![
            format!("Search: {}_", app.filter.spec.search_text),
            "Enter: Keep".to_string(),
            "Esc: Clear".to_string(),
        ],
        Mode::Filter => vec![
            "Tab/Shift+Tab: Fields".to_string(),
            "↑/↓: Choose".to_string(),
            "Space: Toggle mood".to_string(),
            "Enter: Apply".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::MoodInput => vec!["Enter: Add mood".to_string(), "Esc: Cancel".to_string()],
        Mode::Detail => vec![
            "Esc: Close".to_string(),
            format!("{}: Save", key(&kb.toggle_favorite)),
        ],
        Mode::View => {
            let mut hints = vec![
                format!("{}: Quit", key(&kb.quit)),
                format!("{}/{}: Views", key(&kb.tab_left), key(&kb.tab_right)),
            ];
            match app.ui.current_tab {
                Tab::Calendar => {
                    hints.push(format!("{}/{}: Month", key(&kb.prev_month), key(&kb.next_month)));
                    hints.push(format!("{}: Today", key(&kb.today)));
                }
                Tab::Drafts => hints.push(format!("{}: Publish", key(&kb.publish))),
                Tab::Dashboard => hints.push(format!("{}: New mood", key(&kb.new_mood))),
                _ => {}
            }
            if app.ui.current_tab != Tab::Dashboard {
                hints.push(format!("{}: Save", key(&kb.toggle_favorite)));
            }
            hints.push(format!("{}: Delete", key(&kb.delete)));
            hints.push(format!("{}: Search", key(&kb.search)));
            hints.push(format!("{}: Filters", key(&kb.filter)));
            hints.push(format!("{}: Theme", key(&kb.cycle_theme)));
            hints.push(format!("{}: Help", key(&kb.help)));
            hints
        }
    }
}
