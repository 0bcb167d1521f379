use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::{CalendarError, DayCell, MonthCursor, CELL_EVENT_LIMIT, DAY_NAMES};
use crate::database::{Database, DatabaseError, EventStore};
use crate::filter::{filter_events, start_hour, FilterSpec, TimeOfDay};
use crate::models::{Event, Mood, MoodSet};
use crate::utils::{parse_date, today};

#[derive(Parser)]
#[command(name = "parchify")]
#[command(about = "Parchify - plan and discover local events from the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Create a new event (or draft with --draft)
    Add(EventFields),
    /// Update fields of an existing event
    Edit {
        /// Event ID
        id: String,
        #[command(flatten)]
        fields: EventFields,
    },
    /// Publish a draft
    Publish {
        /// Draft ID
        id: String,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// Toggle the favorite flag of an event
    Favorite {
        /// Event ID
        id: String,
    },
    /// List events matching the given filters, newest first
    List(ListArgs),
    /// Print a month calendar with event counts
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Manage the mood taxonomy
    Moods {
        #[command(subcommand)]
        action: MoodCommand,
    },
    /// Export all events as JSON
    Export {
        /// Output file
        file: PathBuf,
    },
    /// Import events from JSON (upserts by id)
    Import {
        /// Input file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct EventFields {
    /// Venue or place name
    #[arg(long)]
    pub place: Option<String>,
    /// City
    #[arg(long)]
    pub city: Option<String>,
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Start time (HH:MM, 24-hour)
    #[arg(long)]
    pub start: Option<String>,
    /// End time (HH:MM, 24-hour)
    #[arg(long)]
    pub end: Option<String>,
    /// Comma-separated moods
    #[arg(long)]
    pub mood: Option<String>,
    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Link to the event page
    #[arg(long)]
    pub link: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
    /// Mark the event as free entry
    #[arg(long)]
    pub free: bool,
    /// Save as draft (skips required-field validation)
    #[arg(long)]
    pub draft: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Case-insensitive text matched against place, city and notes
    #[arg(long)]
    pub search: Option<String>,
    /// Exact city match
    #[arg(long)]
    pub city: Option<String>,
    /// Mood to match (repeatable, any of them matches)
    #[arg(long = "mood")]
    pub moods: Vec<String>,
    /// morning | afternoon | evening | night
    #[arg(long, value_parser = parse_time_of_day)]
    pub time_of_day: Option<TimeOfDay>,
    /// Only favorited events
    #[arg(long)]
    pub saved: bool,
    /// List drafts instead of published events
    #[arg(long)]
    pub drafts: bool,
}

#[derive(Subcommand)]
pub enum MoodCommand {
    /// List moods
    List,
    /// Add a mood
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Remove a mood
    Remove { name: String },
}

fn parse_time_of_day(s: &str) -> Result<TimeOfDay, String> {
    s.parse()
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Calendar error: {0}")]
    CalendarError(#[from] CalendarError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid time '{0}': expected HH:MM")]
    TimeParseError(String),
}

impl From<&ListArgs> for FilterSpec {
    fn from(args: &ListArgs) -> Self {
        FilterSpec {
            search_text: args.search.clone().unwrap_or_default(),
            selected_moods: args.moods.iter().collect(),
            time_of_day: args.time_of_day.unwrap_or_default(),
            city: args.city.clone(),
        }
    }
}

/// Parse a date and return it in the `YYYY-MM-DD` form the calendar matches on
fn normalize_date(date: &str) -> Result<String, CliError> {
    parse_date(date.trim())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date, e)))
}

fn check_time(time: &str) -> Result<(), CliError> {
    start_hour(time)
        .map(|_| ())
        .ok_or_else(|| CliError::TimeParseError(time.to_string()))
}

/// Copy the provided fields onto `event`, validating date/time formats
pub fn apply_fields(event: &mut Event, fields: &EventFields) -> Result<(), CliError> {
    if let Some(ref date) = fields.date {
        event.date = normalize_date(date)?;
    }
    for time in [&fields.start, &fields.end].into_iter().flatten() {
        check_time(time)?;
    }
    if let Some(ref place) = fields.place {
        event.place = place.clone();
    }
    if let Some(ref city) = fields.city {
        event.city = city.clone();
    }
    if fields.start.is_some() {
        event.start_time = fields.start.clone();
    }
    if fields.end.is_some() {
        event.end_time = fields.end.clone();
    }
    if let Some(ref mood) = fields.mood {
        event.moods = MoodSet::parse(mood);
    }
    if fields.notes.is_some() {
        event.notes = fields.notes.clone();
    }
    if fields.link.is_some() {
        event.link = fields.link.clone();
    }
    if fields.image.is_some() {
        event.image_url = fields.image.clone();
    }
    if fields.free {
        event.is_free = true;
    }
    Ok(())
}

/// Handle the add command
pub fn handle_add(fields: EventFields, db: &Database) -> Result<(), CliError> {
    let mut event = Event::new(String::new(), String::new(), String::new());
    event.is_draft = fields.draft;
    apply_fields(&mut event, &fields)?;
    db.create(&event)?;

    let kind = if event.is_draft { "Draft" } else { "Event" };
    println!("{} created successfully (ID: {})", kind, event.id);
    Ok(())
}

/// Handle the edit command
pub fn handle_edit(id: String, fields: EventFields, db: &Database) -> Result<(), CliError> {
    let mut event = db.get(&id)?;
    apply_fields(&mut event, &fields)?;
    if fields.draft {
        event.is_draft = true;
    }
    event.touch();
    db.update(&event)?;
    println!("Event updated successfully (ID: {})", event.id);
    Ok(())
}

pub fn handle_publish(id: String, db: &Database) -> Result<(), CliError> {
    let event = db.publish_draft(&id)?;
    println!("Draft published: {}", event.display_name());
    Ok(())
}

pub fn handle_delete(id: String, db: &Database) -> Result<(), CliError> {
    db.delete(&id)?;
    println!("Event deleted (ID: {})", id);
    Ok(())
}

pub fn handle_favorite(id: String, db: &Database) -> Result<(), CliError> {
    if db.toggle_favorite(&id)? {
        println!("Added to saved events (ID: {})", id);
    } else {
        println!("Removed from saved events (ID: {})", id);
    }
    Ok(())
}

/// Handle the list command
pub fn handle_list(args: ListArgs, db: &Database) -> Result<(), CliError> {
    let source = if args.drafts {
        db.list_drafts()?
    } else if args.saved {
        db.list_favorite_events()?
    } else {
        db.list_events()?
    };
    let spec = FilterSpec::from(&args);
    let events = filter_events(&source, &spec);
    let favorites = db.favorite_ids()?;

    println!("{}", format_event_table(&events, &favorites));
    println!("{} of {} events ({})", events.len(), source.len(), spec.summary());
    Ok(())
}

/// Render events as a fixed-width table
pub fn format_event_table(events: &[Event], favorites: &HashSet<String>) -> String {
    let mut out = format!(
        "{:<1} {:<10} {:<5} {:<24} {:<14} {:<24} {}",
        "", "DATE", "TIME", "PLACE", "CITY", "MOODS", "ID"
    );
    for event in events {
        let star = if favorites.contains(&event.id) { "*" } else { "" };
        out.push('\n');
        out.push_str(&format!(
            "{:<1} {:<10} {:<5} {:<24} {:<14} {:<24} {}",
            star,
            truncate(&event.date, 10),
            truncate(event.start_time.as_deref().unwrap_or("-"), 5),
            truncate(&event.place, 24),
            truncate(&event.city, 14),
            truncate(&event.moods.to_joined(), 24),
            event.id
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    } else {
        s.to_string()
    }
}

/// Handle the calendar command
pub fn handle_calendar(year: Option<i32>, month: Option<u32>, db: &Database) -> Result<(), CliError> {
    let today = today();
    let month0 = match month {
        Some(m) if (1..=12).contains(&m) => m - 1,
        Some(m) => return Err(CliError::CalendarError(CalendarError::InvalidMonth(m))),
        None => today.month0(),
    };
    let cursor = MonthCursor::new(year.unwrap_or(today.year()), month0)?;
    let events = db.list_events()?;
    let cells = cursor.grid(&events, today)?;
    println!("{}", format_month_grid(&cursor, &cells));
    Ok(())
}

/// Plain-text month grid: day numbers with `*` for today and event counts
pub fn format_month_grid(cursor: &MonthCursor, cells: &[DayCell]) -> String {
    let mut out = format!("{:^48}\n", cursor.label());
    for name in DAY_NAMES {
        out.push_str(&format!("{:<7}", name));
    }
    for week in cells.chunks(7) {
        out.push('\n');
        for cell in week {
            let text = if cell.in_current_month {
                let today = if cell.is_today { "*" } else { "" };
                let count = if cell.events.is_empty() {
                    String::new()
                } else {
                    format!("({})", cell.events.len())
                };
                format!("{}{}{}", cell.day(), today, count)
            } else {
                format!("·{}", cell.day())
            };
            out.push_str(&format!("{:<7}", text));
        }
    }

    let busy: Vec<&DayCell> = cells.iter().filter(|c| !c.events.is_empty()).collect();
    for cell in busy {
        out.push_str(&format!("\n\n{}", cell.date_key()));
        for event in cell.events.iter().take(CELL_EVENT_LIMIT) {
            out.push_str(&format!("\n  - {}", event.display_name()));
        }
        if cell.overflow() > 0 {
            out.push_str(&format!("\n  +{} more", cell.overflow()));
        }
    }
    out
}

pub fn handle_moods(action: MoodCommand, db: &Database) -> Result<(), CliError> {
    match action {
        MoodCommand::List => {
            for mood in db.list_moods()? {
                let icon = mood.icon.as_deref().unwrap_or(" ");
                let state = if mood.is_active { "" } else { " (inactive)" };
                println!("{} {}{}", icon, mood.name, state);
            }
        }
        MoodCommand::Add { name, description, icon } => {
            let mut mood = Mood::new(name);
            mood.description = description;
            mood.icon = icon;
            db.add_mood(&mood)?;
            println!("Mood added: {}", mood.name.trim());
        }
        MoodCommand::Remove { name } => {
            if db.delete_mood(&name)? {
                println!("Mood removed: {}", name);
            } else {
                println!("No mood named '{}'", name);
            }
        }
    }
    Ok(())
}

pub fn handle_export(file: PathBuf, db: &Database) -> Result<(), CliError> {
    let count = db.export_json(&file)?;
    println!("Exported {} events to {}", count, file.display());
    Ok(())
}

pub fn handle_import(file: PathBuf, db: &Database) -> Result<(), CliError> {
    let count = db.import_json(&file)?;
    println!("Imported {} events from {}", count, file.display());
    Ok(())
}
