use crate::calendar::{DayCell, MonthCursor};
use crate::config::ConfigError;
use crate::database::{DatabaseError, EventStore};
use crate::filter::{filter_events, FilterSpec, TimeOfDay};
use crate::models::{Event, Mood, MoodSet};
use crate::utils::{self, Profile};
use crate::views::{saved_events, sorted_drafts};
use crate::{Config, Database};
use chrono::{Duration, NaiveDate};
use ratatui::widgets::ListState;
use std::collections::HashSet;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Cards,
    Table,
    Calendar,
    Saved,
    Drafts,
    Dashboard,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Cards,
        Tab::Table,
        Tab::Calendar,
        Tab::Saved,
        Tab::Drafts,
        Tab::Dashboard,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Cards => "Cards",
            Tab::Table => "Table",
            Tab::Calendar => "Calendar",
            Tab::Saved => "Saved",
            Tab::Drafts => "Drafts",
            Tab::Dashboard => "Dashboard",
        }
    }

    /// Tab named by `default_view` in the config; unknown names open Cards
    pub fn from_config(name: &str) -> Tab {
        Tab::ALL
            .into_iter()
            .find(|t| t.title().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(Tab::Cards)
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab to the right; stays put on the last one
    pub fn next(self) -> Tab {
        Tab::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    pub fn prev(self) -> Tab {
        match self.index() {
            0 => self,
            i => Tab::ALL[i - 1],
        }
    }

    /// Tabs whose list goes through the search and filter pipeline
    pub fn uses_filters(self) -> bool {
        matches!(self, Tab::Cards | Tab::Table)
    }

    /// The table view spans the whole content area
    pub fn shows_sidebar(self) -> bool {
        self != Tab::Table
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Filter,
    Help,
    Detail,
    MoodInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFormField {
    Moods,
    TimeOfDay,
    City,
    Apply,
    Clear,
    Cancel,
}

impl FilterFormField {
    const ORDER: [FilterFormField; 6] = [
        FilterFormField::Moods,
        FilterFormField::TimeOfDay,
        FilterFormField::City,
        FilterFormField::Apply,
        FilterFormField::Clear,
        FilterFormField::Cancel,
    ];
}

/// Working copy of the filters while the modal is open
#[derive(Debug, Clone)]
pub struct FilterFormState {
    pub current_field: FilterFormField,
    pub mood_cursor: usize,
    pub moods: MoodSet,
    pub time_of_day: TimeOfDay,
    pub city_index: usize, // 0 = Any, 1+ = config.cities
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub cursor: MonthCursor,
    pub selected: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub spec: FilterSpec,
    pub form_state: Option<FilterFormState>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Event(Event),
    Mood(String),
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<PendingDelete>,
    pub delete_modal_selection: usize, // 0 = Delete, 1 = Cancel
}

/// Derived lists for the current tab, rebuilt by `refresh_view`
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    pub items: Vec<Event>,
    pub grid: Vec<DayCell>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub profile: Profile,
    pub database: Database,

    pub events: Vec<Event>,
    pub drafts: Vec<Event>,
    pub favorites: HashSet<String>,
    pub moods: Vec<Mood>,
    pub today: NaiveDate,

    pub ui: UiState,
    pub calendar: CalendarState,
    pub filter: FilterState,
    pub modals: ModalState,
    pub status: StatusState,
    pub view: ViewCache,
    pub mood_input: String,
}

impl App {
    pub fn new(config: Config, profile: Profile, database: Database) -> Result<Self, DatabaseError> {
        Self::with_today(config, profile, database, utils::today())
    }

    /// Build the app with a fixed notion of "today"
    pub fn with_today(
        config: Config,
        profile: Profile,
        database: Database,
        today: NaiveDate,
    ) -> Result<Self, DatabaseError> {
        let current_tab = Tab::from_config(&config.default_view);
        let mut app = Self {
            config,
            profile,
            database,
            events: Vec::new(),
            drafts: Vec::new(),
            favorites: HashSet::new(),
            moods: Vec::new(),
            today,
            ui: UiState {
                current_tab,
                mode: Mode::View,
                selected_index: 0,
                list_state: ListState::default(),
            },
            calendar: CalendarState {
                cursor: MonthCursor::from_date(today),
                selected: today,
            },
            filter: FilterState::default(),
            modals: ModalState::default(),
            status: StatusState::default(),
            view: ViewCache::default(),
            mood_input: String::new(),
        };
        app.load_data()?;
        Ok(app)
    }

    pub fn load_data(&mut self) -> Result<(), DatabaseError> {
        self.events = self.database.list_events()?;
        self.drafts = self.database.list_drafts()?;
        self.favorites = self.database.favorite_ids()?;
        self.moods = self.database.list_moods()?;
        log::debug!(
            "event=tui_reload events={} drafts={} favorites={} moods={}",
            self.events.len(),
            self.drafts.len(),
            self.favorites.len(),
            self.moods.len()
        );
        self.refresh_view();
        Ok(())
    }

    /// Rebuild the month grid and the current tab's list. Called whenever
    /// the data, the filters, the tab or the calendar position change.
    pub fn refresh_view(&mut self) {
        self.view.grid = match self.calendar.cursor.grid(&self.events, self.today) {
            Ok(cells) => cells,
            Err(e) => {
                log::error!("event=calendar_build status=error error={}", e);
                Vec::new()
            }
        };
        self.view.items = match self.ui.current_tab {
            Tab::Cards | Tab::Table => filter_events(&self.events, &self.filter.spec),
            Tab::Calendar => self.selected_day_events(),
            Tab::Saved => saved_events(&self.events, &self.favorites),
            Tab::Drafts => sorted_drafts(&self.drafts),
            Tab::Dashboard => Vec::new(),
        };
        self.adjust_selected_index();
    }

    /// Events listed by the current tab, in display order
    pub fn get_current_items(&self) -> &[Event] {
        &self.view.items
    }

    /// Number of selectable rows on the current tab
    pub fn list_len(&self) -> usize {
        match self.ui.current_tab {
            Tab::Dashboard => self.moods.len(),
            _ => self.get_current_items().len(),
        }
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.view.items.get(self.ui.selected_index).cloned()
    }

    pub fn selected_mood(&self) -> Option<&Mood> {
        if self.ui.current_tab != Tab::Dashboard {
            return None;
        }
        self.moods.get(self.ui.selected_index)
    }

    pub fn month_grid(&self) -> &[DayCell] {
        &self.view.grid
    }

    pub fn selected_day_events(&self) -> Vec<Event> {
        self.view
            .grid
            .iter()
            .find(|cell| cell.in_current_month && cell.date == self.calendar.selected)
            .map(|cell| cell.events.clone())
            .unwrap_or_default()
    }

    pub fn is_favorite(&self, event: &Event) -> bool {
        self.favorites.contains(&event.id)
    }

    pub fn adjust_selected_index(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.ui.selected_index = 0;
            self.ui.list_state.select(None);
        } else {
            self.ui.selected_index = self.ui.selected_index.min(len - 1);
            self.sync_list_state();
        }
    }

    pub fn sync_list_state(&mut self) {
        self.ui.list_state.select(Some(self.ui.selected_index));
    }

    pub fn reset_selection(&mut self) {
        self.ui.selected_index = 0;
        self.refresh_view();
    }

    pub fn move_selection_up(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.ui.selected_index < self.list_len().saturating_sub(1) {
            self.ui.selected_index += 1;
            self.sync_list_state();
        }
    }

    pub fn switch_tab(&mut self, new_tab: Tab) {
        self.ui.current_tab = new_tab;
        self.reset_selection();
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Clear the status message after 3 seconds
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    // Search edits the live filter text, so the list narrows while typing.

    pub fn enter_search_mode(&mut self) {
        if !self.ui.current_tab.uses_filters() {
            self.switch_tab(Tab::Cards);
        }
        self.ui.mode = Mode::Search;
    }

    /// Leave search; `keep` retains the query, otherwise it is cleared
    pub fn exit_search_mode(&mut self, keep: bool) {
        if !keep {
            self.filter.spec.search_text.clear();
            self.reset_selection();
        }
        self.ui.mode = Mode::View;
    }

    pub fn add_to_search(&mut self, ch: char) {
        self.filter.spec.search_text.push(ch);
        self.reset_selection();
    }

    pub fn remove_from_search(&mut self) {
        self.filter.spec.search_text.pop();
        self.reset_selection();
    }

    pub fn enter_filter_mode(&mut self) {
        if !self.ui.current_tab.uses_filters() {
            self.switch_tab(Tab::Cards);
        }
        let city_index = self
            .filter
            .spec
            .city
            .as_ref()
            .and_then(|c| self.config.cities.iter().position(|x| x == c))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.filter.form_state = Some(FilterFormState {
            current_field: FilterFormField::Moods,
            mood_cursor: 0,
            moods: self.filter.spec.selected_moods.clone(),
            time_of_day: self.filter.spec.time_of_day,
            city_index,
        });
        self.ui.mode = Mode::Filter;
    }

    pub fn exit_filter_mode(&mut self) {
        self.ui.mode = Mode::View;
        self.filter.form_state = None;
    }

    pub fn navigate_filter_field(&mut self, forward: bool) {
        if let Some(ref mut state) = self.filter.form_state {
            let order = FilterFormField::ORDER;
            let idx = order
                .iter()
                .position(|f| *f == state.current_field)
                .unwrap_or(0);
            let next = if forward {
                (idx + 1) % order.len()
            } else {
                (idx + order.len() - 1) % order.len()
            };
            state.current_field = order[next];
        }
    }

    /// Up/down inside the active filter field
    pub fn move_filter_option(&mut self, down: bool) {
        let mood_count = self.moods.len();
        let city_count = self.config.cities.len() + 1;
        if let Some(ref mut state) = self.filter.form_state {
            match state.current_field {
                FilterFormField::Moods if mood_count > 0 => {
                    state.mood_cursor = if down {
                        (state.mood_cursor + 1).min(mood_count - 1)
                    } else {
                        state.mood_cursor.saturating_sub(1)
                    };
                }
                FilterFormField::TimeOfDay => {
                    state.time_of_day = if down {
                        state.time_of_day.cycle()
                    } else {
                        // cycling four more times steps back once
                        (0..TimeOfDay::ALL.len() - 1).fold(state.time_of_day, |t, _| t.cycle())
                    };
                }
                FilterFormField::City => {
                    state.city_index = if down {
                        (state.city_index + 1) % city_count
                    } else {
                        (state.city_index + city_count - 1) % city_count
                    };
                }
                _ => {}
            }
        }
    }

    /// Toggle the mood under the cursor in the filter modal
    pub fn toggle_filter_mood(&mut self) {
        let Some(ref mut state) = self.filter.form_state else {
            return;
        };
        if state.current_field != FilterFormField::Moods {
            return;
        }
        if let Some(mood) = self.moods.get(state.mood_cursor) {
            if !state.moods.remove(&mood.name) {
                state.moods.insert(&mood.name);
            }
        }
    }

    pub fn apply_filters(&mut self) {
        if let Some(state) = self.filter.form_state.take() {
            self.filter.spec.selected_moods = state.moods;
            self.filter.spec.time_of_day = state.time_of_day;
            self.filter.spec.city = match state.city_index {
                0 => None,
                i => self.config.cities.get(i - 1).cloned(),
            };
            self.reset_selection();
            log::debug!("event=filters_apply summary=\"{}\"", self.filter.spec.summary());
            self.set_status_message("Filters applied".to_string());
        }
        self.exit_filter_mode();
    }

    pub fn clear_filters(&mut self) {
        self.filter.spec = FilterSpec::default();
        self.reset_selection();
        self.set_status_message("Filters cleared".to_string());
    }

    pub fn get_filter_summary(&self) -> String {
        let shown = self.get_current_items().len();
        if self.ui.current_tab.uses_filters() {
            format!(
                "{} ({} of {} events)",
                self.filter.spec.summary(),
                shown,
                self.events.len()
            )
        } else {
            format!("{} ({} shown, filters apply to Cards/Table)", self.filter.spec.summary(), shown)
        }
    }

    pub fn prev_month(&mut self) {
        self.set_month(self.calendar.cursor.prev());
    }

    pub fn next_month(&mut self) {
        self.set_month(self.calendar.cursor.next());
    }

    /// Show `cursor`'s month, keeping the selected day number where it exists
    fn set_month(&mut self, cursor: MonthCursor) {
        use chrono::Datelike;
        let day = self.calendar.selected.day();
        let selected = (1..=day)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(cursor.year(), cursor.month0() + 1, d));
        self.calendar.cursor = cursor;
        if let Some(selected) = selected {
            self.calendar.selected = selected;
        }
        self.reset_selection();
    }

    pub fn jump_to_today(&mut self) {
        self.calendar.selected = self.today;
        self.calendar.cursor = MonthCursor::from_date(self.today);
        self.reset_selection();
    }

    /// Move the selected calendar day, following it across months
    pub fn move_calendar_day(&mut self, days: i64) {
        if let Some(date) = self.calendar.selected.checked_add_signed(Duration::days(days)) {
            self.calendar.selected = date;
            self.calendar.cursor = MonthCursor::from_date(date);
            self.reset_selection();
        }
    }

    pub fn toggle_favorite_selected(&mut self) -> Result<(), DatabaseError> {
        let Some(event) = self.selected_event() else {
            return Ok(());
        };
        if event.is_draft {
            self.set_status_message("Drafts cannot be saved".to_string());
            return Ok(());
        }
        let favorited = self.database.toggle_favorite(&event.id)?;
        self.load_data()?;
        self.set_status_message(if favorited {
            format!("Saved: {}", event.display_name())
        } else {
            format!("Removed from saved: {}", event.display_name())
        });
        Ok(())
    }

    /// Ask for confirmation before deleting the selected event or mood
    pub fn request_delete(&mut self) {
        let pending = if self.ui.current_tab == Tab::Dashboard {
            self.selected_mood().map(|m| PendingDelete::Mood(m.name.clone()))
        } else {
            self.selected_event().map(PendingDelete::Event)
        };
        if pending.is_some() {
            self.modals.delete_confirmation = pending;
            self.modals.delete_modal_selection = 0;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.modals.delete_confirmation = None;
        self.modals.delete_modal_selection = 0;
    }

    pub fn confirm_delete(&mut self) -> Result<(), DatabaseError> {
        let Some(pending) = self.modals.delete_confirmation.take() else {
            return Ok(());
        };
        self.modals.delete_modal_selection = 0;
        match pending {
            PendingDelete::Event(event) => {
                self.database.delete(&event.id)?;
                self.load_data()?;
                self.set_status_message(format!("Deleted: {}", event.display_name()));
            }
            PendingDelete::Mood(name) => {
                self.database.delete_mood(&name)?;
                self.filter.spec.selected_moods.remove(&name);
                self.load_data()?;
                self.set_status_message(format!("Mood removed: {}", name));
            }
        }
        Ok(())
    }

    /// Publish the selected draft; validation errors become a status message
    pub fn publish_selected(&mut self) -> Result<(), DatabaseError> {
        if self.ui.current_tab != Tab::Drafts {
            return Ok(());
        }
        let Some(draft) = self.selected_event() else {
            return Ok(());
        };
        match self.database.publish_draft(&draft.id) {
            Ok(event) => {
                self.load_data()?;
                self.set_status_message(format!("Published: {}", event.display_name()));
            }
            Err(DatabaseError::InvalidEvent(e)) => {
                self.set_status_message(format!("Cannot publish: {}", e));
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    pub fn enter_mood_input(&mut self) {
        self.mood_input.clear();
        self.ui.mode = Mode::MoodInput;
    }

    pub fn exit_mood_input(&mut self) {
        self.mood_input.clear();
        self.ui.mode = Mode::View;
    }

    /// Add the typed mood; duplicates and empty names are reported, not fatal
    pub fn submit_mood(&mut self) -> Result<(), DatabaseError> {
        let name = self.mood_input.trim().to_string();
        match self.database.add_mood(&Mood::new(name.clone())) {
            Ok(()) => {
                self.load_data()?;
                self.set_status_message(format!("Mood added: {}", name));
                self.exit_mood_input();
            }
            Err(e @ (DatabaseError::DuplicateMood(_) | DatabaseError::InvalidMood)) => {
                self.set_status_message(e.to_string());
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn enter_detail_mode(&mut self) {
        if self.selected_event().is_some() {
            self.ui.mode = Mode::Detail;
        }
    }

    pub fn exit_to_view(&mut self) {
        self.ui.mode = Mode::View;
    }

    /// Switch to the next theme and persist the choice
    pub fn cycle_theme(&mut self) -> Result<(), ConfigError> {
        let name = self.config.next_theme_name();
        self.config.set_theme(&name)?;
        self.config.save_with_profile(self.profile)?;
        self.set_status_message(format!("Theme changed to: {}", name));
        Ok(())
    }

    /// Event counts per mood over published events, in taxonomy order
    pub fn mood_counts(&self) -> Vec<(String, usize)> {
        self.moods
            .iter()
            .map(|m| {
                let count = self.events.iter().filter(|e| e.moods.contains(&m.name)).count();
                (m.name.clone(), count)
            })
            .collect()
    }

    /// Event counts per configured city, unknown cities last
    pub fn city_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .config
            .cities
            .iter()
            .map(|c| (c.clone(), self.events.iter().filter(|e| &e.city == c).count()))
            .collect();
        let other = self
            .events
            .iter()
            .filter(|e| !self.config.cities.contains(&e.city))
            .count();
        if other > 0 {
            counts.push(("Other".to_string(), other));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(place: &str, date: &str, moods: &str, start: &str) -> Event {
        let mut e = Event::new(place.into(), "Cali".into(), date.into());
        e.moods = MoodSet::parse(moods);
        e.start_time = Some(start.into());
        e
    }

    fn app_with(events: &[Event]) -> App {
        let db = Database::open_in_memory().unwrap();
        db.seed_moods_if_empty(&Config::default().default_moods).unwrap();
        for e in events {
            db.create(e).unwrap();
        }
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        App::with_today(Config::default(), Profile::Dev, db, today).unwrap()
    }

    #[test]
    fn tab_navigation_stops_at_edges() {
        assert_eq!(Tab::Cards.prev(), Tab::Cards);
        assert_eq!(Tab::Cards.next(), Tab::Table);
        assert_eq!(Tab::Dashboard.next(), Tab::Dashboard);
        assert_eq!(Tab::from_config("calendar"), Tab::Calendar);
        assert_eq!(Tab::from_config("nope"), Tab::Cards);
    }

    #[test]
    fn search_narrows_cards_and_escape_clears() {
        let mut app = app_with(&[
            event("Parque", "2024-07-01", "family", "10:00"),
            event("Club", "2024-07-02", "party", "23:00"),
        ]);
        app.enter_search_mode();
        for c in "club".chars() {
            app.add_to_search(c);
        }
        assert_eq!(app.get_current_items().len(), 1);
        app.exit_search_mode(false);
        assert_eq!(app.get_current_items().len(), 2);
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn filter_modal_applies_moods_time_and_city() {
        let mut app = app_with(&[
            event("Parque", "2024-07-01", "family", "10:00"),
            event("Club", "2024-07-02", "party", "23:30"),
        ]);
        app.enter_filter_mode();
        // moods are seeded in order: party, cultural, ...
        app.toggle_filter_mood();
        app.navigate_filter_field(true);
        for _ in 0..4 {
            app.move_filter_option(true);
        }
        app.apply_filters();
        assert_eq!(app.filter.spec.time_of_day, TimeOfDay::Night);
        assert!(app.filter.spec.selected_moods.contains("party"));
        let shown = app.get_current_items();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].place, "Club");

        app.enter_filter_mode();
        app.navigate_filter_field(true);
        app.navigate_filter_field(true);
        assert_eq!(
            app.filter.form_state.as_ref().map(|s| s.current_field),
            Some(FilterFormField::City)
        );
        app.move_filter_option(true);
        app.apply_filters();
        assert_eq!(app.filter.spec.city.as_deref(), Some("Cali"));

        app.clear_filters();
        assert!(app.filter.spec.is_unset());
    }

    #[test]
    fn calendar_lists_events_of_selected_day() {
        let mut app = app_with(&[
            event("Feria", "2024-07-04", "", "10:00"),
            event("Cine", "2024-07-05", "", "19:00"),
        ]);
        app.switch_tab(Tab::Calendar);
        assert_eq!(app.get_current_items()[0].place, "Feria");
        app.move_calendar_day(1);
        assert_eq!(app.get_current_items()[0].place, "Cine");
        app.move_calendar_day(30);
        assert_eq!(app.calendar.cursor, MonthCursor::new(2024, 7).unwrap());
        app.jump_to_today();
        assert_eq!(app.calendar.selected, app.today);
    }

    #[test]
    fn cached_view_follows_tab_search_and_month() {
        let mut app = app_with(&[
            event("Feria", "2024-07-04", "family", "10:00"),
            event("Cine", "2024-08-01", "", "19:00"),
        ]);
        assert_eq!(app.view.items.len(), 2);
        assert_eq!(app.view.grid.iter().filter(|c| c.in_current_month).count(), 31);

        app.add_to_search('c');
        app.add_to_search('i');
        assert_eq!(app.view.items.len(), 1);
        assert_eq!(app.selected_event().map(|e| e.place), Some("Cine".to_string()));

        app.switch_tab(Tab::Calendar);
        assert_eq!(app.view.items.len(), 1);
        assert_eq!(app.view.items[0].place, "Feria");

        app.next_month();
        assert!(app.view.items.is_empty());
        let bucketed: usize = app.month_grid().iter().map(|c| c.events.len()).sum();
        assert_eq!(bucketed, 1);

        app.switch_tab(Tab::Dashboard);
        assert!(app.view.items.is_empty());
        assert_eq!(app.list_len(), app.moods.len());
    }

    #[test]
    fn month_change_clamps_selected_day() {
        let mut app = app_with(&[]);
        app.calendar.selected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        app.calendar.cursor = MonthCursor::from_date(app.calendar.selected);
        app.next_month();
        assert_eq!(app.calendar.selected, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn delete_requires_confirmation_and_drops_favorite() {
        let mut app = app_with(&[event("Club", "2024-07-02", "party", "23:30")]);
        app.toggle_favorite_selected().unwrap();
        assert_eq!(app.favorites.len(), 1);
        app.request_delete();
        assert!(matches!(app.modals.delete_confirmation, Some(PendingDelete::Event(_))));
        app.confirm_delete().unwrap();
        assert!(app.events.is_empty());
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn publishing_incomplete_draft_reports_error() {
        let mut draft = Event::new("Taller".into(), String::new(), String::new());
        draft.is_draft = true;
        let mut app = app_with(&[draft]);
        app.switch_tab(Tab::Drafts);
        app.publish_selected().unwrap();
        assert_eq!(app.drafts.len(), 1);
        assert!(app.status.message.as_deref().unwrap_or("").starts_with("Cannot publish"));
    }

    #[test]
    fn duplicate_mood_is_rejected_in_place() {
        let mut app = app_with(&[]);
        app.switch_tab(Tab::Dashboard);
        app.enter_mood_input();
        app.mood_input = "party".into();
        app.submit_mood().unwrap();
        assert_eq!(app.ui.mode, Mode::MoodInput);
        app.mood_input = "sunset".into();
        app.submit_mood().unwrap();
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.moods.last().map(|m| m.name.as_str()), Some("sunset"));
    }
}
