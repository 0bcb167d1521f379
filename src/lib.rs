pub mod calendar;
pub mod cli;
pub mod config;
pub mod database;
pub mod filter;
pub mod logging;
pub mod models;
pub mod tui;
pub mod utils;
pub mod views;

pub use calendar::{build_month_grid, CalendarError, DayCell, MonthCursor};
pub use config::Config;
pub use database::{Database, EventStore};
pub use filter::{filter_events, FilterSpec, TimeOfDay};
pub use models::{Event, Mood, MoodSet};
pub use utils::Profile;
