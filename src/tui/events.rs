use crate::tui::app::{FilterFormField, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::confirm_delete::DELETE_OPTIONS;
use crate::tui::App;
use crate::utils::{has_primary_modifier, parse_key_binding, ParsedKeyBinding};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

/// Restores the terminal on drop, panics included. A terminal left in raw
/// mode or the alternate screen is unusable for the user.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore on normal exit; drop is a no-op afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Checked before the alternate screen so the message stays visible
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    log::info!("event=tui_start tab={} size={}x{}", app.ui.current_tab.title(), width, height);

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect, !app.ui.current_tab.shows_sidebar());
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(16))? {
            // Press only: Windows also reports releases
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    log::info!("event=tui_stop status=ok");
    Ok(())
}

/// Dispatch a key press; returns true when the app should quit
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if app.modals.delete_confirmation.is_some() {
        return handle_delete_confirmation_modal(app, key_event);
    }

    match app.ui.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Search => handle_search_mode(app, key_event),
        Mode::Filter => handle_filter_mode(app, key_event),
        Mode::MoodInput => handle_mood_input_mode(app, key_event),
        Mode::Detail => handle_detail_mode(app, key_event),
        Mode::View => handle_global_key_bindings(app, key_event),
    }
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let options = DELETE_OPTIONS.len();
    match key_event.code {
        KeyCode::Up => {
            app.modals.delete_modal_selection = (app.modals.delete_modal_selection + options - 1) % options;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.modals.delete_modal_selection = (app.modals.delete_modal_selection + 1) % options;
        }
        KeyCode::Enter => {
            if app.modals.delete_modal_selection == 0 {
                if let Err(e) = app.confirm_delete() {
                    log::error!("event=delete status=error error={}", e);
                    app.set_status_message(format!("Failed to delete: {}", e));
                }
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let help_binding = binding(&app.config.key_bindings.help)?;
    if key_event.code == KeyCode::Esc || matches_key_event(key_event, &help_binding) {
        app.exit_to_view();
    }
    Ok(false)
}

fn handle_detail_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let favorite_binding = binding(&app.config.key_bindings.toggle_favorite)?;
    if matches_key_event(key_event, &favorite_binding) {
        toggle_favorite(app);
    } else if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter) {
        app.exit_to_view();
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.exit_search_mode(false),
        KeyCode::Enter => app.exit_search_mode(true),
        KeyCode::Char(c) => app.add_to_search(c),
        KeyCode::Backspace => app.remove_from_search(),
        _ => {}
    }
    Ok(false)
}

fn handle_filter_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let current_field = app.filter.form_state.as_ref().map(|s| s.current_field);
    match key_event.code {
        KeyCode::Esc => app.exit_filter_mode(),
        KeyCode::Tab => app.navigate_filter_field(true),
        KeyCode::BackTab => app.navigate_filter_field(false),
        KeyCode::Up => app.move_filter_option(false),
        KeyCode::Down => app.move_filter_option(true),
        KeyCode::Char(' ') => app.toggle_filter_mood(),
        KeyCode::Enter => match current_field {
            Some(FilterFormField::Clear) => {
                app.clear_filters();
                app.exit_filter_mode();
            }
            Some(FilterFormField::Cancel) => app.exit_filter_mode(),
            // Enter applies from any field, like submitting a form
            Some(_) => app.apply_filters(),
            None => app.exit_filter_mode(),
        },
        _ => {}
    }
    Ok(false)
}

fn handle_mood_input_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.exit_mood_input(),
        KeyCode::Enter => app.submit_mood()?,
        KeyCode::Backspace => {
            app.mood_input.pop();
        }
        KeyCode::Char(c) => app.mood_input.push(c),
        _ => {}
    }
    Ok(false)
}

fn toggle_favorite(app: &mut App) {
    if let Err(e) = app.toggle_favorite_selected() {
        log::error!("event=favorite_toggle status=error error={}", e);
        app.set_status_message(format!("Failed to update saved events: {}", e));
    }
}

fn handle_global_key_bindings(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if matches_key_event(key_event, &binding(&kb.quit)?) {
        return Ok(true);
    }

    if matches_key_event(key_event, &binding(&kb.help)?) {
        app.enter_help_mode();
    } else if matches_key_event(key_event, &binding(&kb.tab_left)?) {
        app.switch_tab(app.ui.current_tab.prev());
    } else if matches_key_event(key_event, &binding(&kb.tab_right)?) {
        app.switch_tab(app.ui.current_tab.next());
    } else if matches_key_event(key_event, &binding(&kb.search)?) {
        app.enter_search_mode();
    } else if matches_key_event(key_event, &binding(&kb.filter)?) {
        app.enter_filter_mode();
    } else if matches_key_event(key_event, &binding(&kb.clear_filters)?) {
        app.clear_filters();
    } else if matches_key_event(key_event, &binding(&kb.cycle_theme)?) {
        if let Err(e) = app.cycle_theme() {
            app.set_status_message(format!("Failed to save theme: {}", e));
        }
    } else if matches_key_event(key_event, &binding(&kb.delete)?) {
        app.request_delete();
    } else if app.ui.current_tab == Tab::Calendar {
        handle_calendar_keys(app, key_event, &kb)?;
    } else if matches_key_event(key_event, &binding(&kb.list_up)?) || key_event.code == KeyCode::Up {
        app.move_selection_up();
    } else if matches_key_event(key_event, &binding(&kb.list_down)?) || key_event.code == KeyCode::Down {
        app.move_selection_down();
    } else if matches_key_event(key_event, &binding(&kb.select)?) {
        app.enter_detail_mode();
    } else if matches_key_event(key_event, &binding(&kb.toggle_favorite)?) {
        toggle_favorite(app);
    } else if matches_key_event(key_event, &binding(&kb.publish)?) {
        if let Err(e) = app.publish_selected() {
            log::error!("event=draft_publish status=error error={}", e);
            app.set_status_message(format!("Failed to publish: {}", e));
        }
    } else if matches_key_event(key_event, &binding(&kb.new_mood)?) && app.ui.current_tab == Tab::Dashboard {
        app.enter_mood_input();
    }

    Ok(false)
}

/// Calendar: list keys move by day, arrows by week, brackets by month.
/// PageUp/PageDown walk the selected day's events.
fn handle_calendar_keys(
    app: &mut App,
    key_event: KeyEvent,
    kb: &crate::config::KeyBindings,
) -> Result<(), TuiError> {
    if matches_key_event(key_event, &binding(&kb.prev_month)?) {
        app.prev_month();
    } else if matches_key_event(key_event, &binding(&kb.next_month)?) {
        app.next_month();
    } else if matches_key_event(key_event, &binding(&kb.today)?) {
        app.jump_to_today();
    } else if matches_key_event(key_event, &binding(&kb.list_up)?) {
        app.move_calendar_day(-1);
    } else if matches_key_event(key_event, &binding(&kb.list_down)?) {
        app.move_calendar_day(1);
    } else if key_event.code == KeyCode::Up {
        app.move_calendar_day(-7);
    } else if key_event.code == KeyCode::Down {
        app.move_calendar_day(7);
    } else if key_event.code == KeyCode::PageUp {
        app.move_selection_up();
    } else if key_event.code == KeyCode::PageDown {
        app.move_selection_down();
    } else if matches_key_event(key_event, &binding(&kb.select)?) {
        app.enter_detail_mode();
    } else if matches_key_event(key_event, &binding(&kb.toggle_favorite)?) {
        toggle_favorite(app);
    }
    Ok(())
}

fn binding(key_str: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(key_str).map_err(TuiError::KeyBindingError)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Ctrl or Option on macOS
    binding.requires_ctrl == has_primary_modifier(key_event.modifiers)
        && binding.key_code == key_event.code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::EventStore;
    use crate::models::Event;
    use crate::{Config, Database, Profile};
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn app() -> App {
        let db = Database::open_in_memory().unwrap();
        db.seed_moods_if_empty(&Config::default().default_moods).unwrap();
        let mut e = Event::new("Club".into(), "Cali".into(), "2024-07-04".into());
        e.start_time = Some("23:00".into());
        db.create(&e).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        App::with_today(Config::default(), Profile::Dev, db, today).unwrap()
    }

    #[test]
    fn quit_key_ends_loop() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('j')));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn typing_in_search_does_not_trigger_bindings() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        for c in "q d".chars() {
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        assert_eq!(app.filter.spec.search_text, "q d");
        assert!(app.modals.delete_confirmation.is_none());
        press(&mut app, KeyCode::Esc);
        assert!(app.filter.spec.search_text.is_empty());
    }

    #[test]
    fn delete_can_be_cancelled_then_confirmed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.events.len(), 1);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert!(app.events.is_empty());
    }

    #[test]
    fn calendar_keys_navigate_days_and_months() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.ui.current_tab, Tab::Calendar);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.calendar.selected, NaiveDate::from_ymd_opt(2024, 7, 11).unwrap());
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.calendar.cursor.month0(), 7);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.get_current_items().len(), 1);
    }

    #[test]
    fn filter_modal_enter_applies() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, Mode::View);
        // morning excludes the 23:00 event
        assert!(app.get_current_items().is_empty());
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.get_current_items().len(), 1);
    }
}
