use std::collections::HashSet;

use crate::filter::sort_by_date_desc;
use crate::models::Event;

/// Favorited events, most recent date first
pub fn saved_events(events: &[Event], favorite_ids: &HashSet<String>) -> Vec<Event> {
    let mut saved: Vec<Event> = events
        .iter()
        .filter(|e| favorite_ids.contains(&e.id))
        .cloned()
        .collect();
    sort_by_date_desc(&mut saved);
    saved
}

/// Drafts, most recently created first
pub fn sorted_drafts(drafts: &[Event]) -> Vec<Event> {
    let mut sorted = drafts.to_vec();
    // created_at is "%Y-%m-%d %H:%M:%S", so string order is chronological
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str, created_at: &str) -> Event {
        let mut e = Event::new("Place".into(), "Cali".into(), date.into());
        e.id = id.into();
        e.created_at = created_at.into();
        e
    }

    #[test]
    fn saved_keeps_only_favorites_newest_first() {
        let events = vec![
            event("a", "2024-07-01", ""),
            event("b", "2024-08-01", ""),
            event("c", "2024-09-01", ""),
        ];
        let favorites: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let ids: Vec<_> = saved_events(&events, &favorites).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn drafts_sorted_by_creation_desc() {
        let drafts = vec![
            event("old", "", "2024-01-01 10:00:00"),
            event("new", "", "2024-02-01 10:00:00"),
        ];
        let ids: Vec<_> = sorted_drafts(&drafts).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
