//! Event filter pipeline for the list views.
//!
//! Four independent predicates (text, city, mood, time of day) are AND-ed
//! together; an unset criterion keeps every event. Survivors are sorted by
//! calendar date, most recent first, keeping input order for ties.

use chrono::{NaiveDate, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

use crate::models::{Event, MoodSet};
use crate::utils::parse_date;

/// Time-of-day bucket derived from an event's start hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    None,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 5] = [
        TimeOfDay::None,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Bucket an hour of day (0-23).
    /// morning=[6,12) afternoon=[12,18) evening=[18,22) night=[22,24)+[0,6)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::None => "any",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Next bucket in cycling order, wrapping back to `None`
    pub fn cycle(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "any" => Ok(TimeOfDay::None),
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(format!(
                "unknown time of day `{}`; expected morning|afternoon|evening|night|none",
                other
            )),
        }
    }
}

/// Active search and filter criteria for the event list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search_text: String,
    pub selected_moods: MoodSet,
    pub time_of_day: TimeOfDay,
    pub city: Option<String>,
}

impl FilterSpec {
    /// True when no criterion is set
    pub fn is_unset(&self) -> bool {
        self.search_text.is_empty()
            && self.selected_moods.is_empty()
            && self.time_of_day == TimeOfDay::None
            && self.active_city().is_none()
    }

    fn active_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    /// Short human-readable summary, e.g. for the filters box
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.search_text.is_empty() {
            parts.push(format!("Search: \"{}\"", self.search_text));
        }
        if let Some(city) = self.active_city() {
            parts.push(format!("City: {}", city));
        }
        if !self.selected_moods.is_empty() {
            parts.push(format!("Moods: {}", self.selected_moods));
        }
        if self.time_of_day != TimeOfDay::None {
            parts.push(format!("Time: {}", self.time_of_day));
        }
        if parts.is_empty() {
            "No filters".to_string()
        } else {
            parts.join(" | ")
        }
    }

    pub fn matches_text(&self, event: &Event) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        event.place.to_lowercase().contains(&needle)
            || event.city.to_lowercase().contains(&needle)
            || event
                .notes
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
    }

    pub fn matches_city(&self, event: &Event) -> bool {
        match self.active_city() {
            Some(city) => event.city == city,
            None => true,
        }
    }

    /// OR semantics: any shared mood is enough. Events without moods never
    /// match an active mood filter.
    pub fn matches_moods(&self, event: &Event) -> bool {
        if self.selected_moods.is_empty() {
            return true;
        }
        event.moods.intersects(&self.selected_moods)
    }

    pub fn matches_time_of_day(&self, event: &Event) -> bool {
        if self.time_of_day == TimeOfDay::None {
            return true;
        }
        event
            .start_time
            .as_deref()
            .and_then(start_hour)
            .is_some_and(|hour| TimeOfDay::from_hour(hour) == self.time_of_day)
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_text(event)
            && self.matches_city(event)
            && self.matches_moods(event)
            && self.matches_time_of_day(event)
    }
}

/// Parse the hour of an `HH:MM` (or `HH:MM:SS`) start time
pub fn start_hour(start_time: &str) -> Option<u32> {
    let s = start_time.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
        .map(|t| t.hour())
}

/// Apply `spec` to `events` and return the survivors, newest date first.
///
/// Inputs are not mutated. Events whose date does not parse sort after all
/// dated events, in input order.
pub fn filter_events(events: &[Event], spec: &FilterSpec) -> Vec<Event> {
    let mut filtered: Vec<Event> = events
        .iter()
        .filter(|event| spec.matches(event))
        .cloned()
        .collect();
    sort_by_date_desc(&mut filtered);
    filtered
}

/// Stable sort by calendar date, most recent first; unparseable dates last
pub fn sort_by_date_desc(events: &mut [Event]) {
    events.sort_by_cached_key(|event| std::cmp::Reverse(sort_key(event)));
}

fn sort_key(event: &Event) -> Option<NaiveDate> {
    parse_date(event.date.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets_cover_the_day() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
    }

    #[test]
    fn start_hour_rejects_garbage() {
        assert_eq!(start_hour("23:30"), Some(23));
        assert_eq!(start_hour("07:05:00"), Some(7));
        assert_eq!(start_hour("25:00"), None);
        assert_eq!(start_hour("soon"), None);
    }

    #[test]
    fn time_of_day_cycles_and_parses() {
        assert_eq!(TimeOfDay::Night.cycle(), TimeOfDay::None);
        assert_eq!(TimeOfDay::None.cycle(), TimeOfDay::Morning);
        assert_eq!("Evening".parse::<TimeOfDay>(), Ok(TimeOfDay::Evening));
        assert!("noon".parse::<TimeOfDay>().is_err());
    }
}
