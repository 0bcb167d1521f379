use chrono::{Datelike, NaiveDate};
use parchify::calendar::days_in_month;
use parchify::{CalendarError, Event, MonthCursor, build_month_grid};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(place: &str, day: &str) -> Event {
    Event::new(place.to_string(), "Bogotá".to_string(), day.to_string())
}

#[test]
fn every_month_fills_whole_weeks() {
    let today = date(2024, 7, 4);
    for year in [1999, 2000, 2023, 2024, 2100] {
        for month0 in 0..12 {
            let cells = build_month_grid(year, month0, &[], today).unwrap();
            assert!(!cells.is_empty());
            assert_eq!(cells.len() % 7, 0, "{year}-{month0}");

            let in_month: Vec<_> = cells.iter().filter(|c| c.in_current_month).collect();
            assert_eq!(in_month.len() as u32, days_in_month(year, month0).unwrap());
            for (i, cell) in in_month.iter().enumerate() {
                assert_eq!(cell.day(), i as u32 + 1);
            }
        }
    }
}

#[test]
fn leap_february_has_29_days() {
    let cells = build_month_grid(2024, 1, &[], date(2024, 7, 4)).unwrap();
    assert_eq!(cells.iter().filter(|c| c.in_current_month).count(), 29);
}

#[test]
fn january_leads_with_last_days_of_december() {
    // 2024-01-01 is a Monday
    let cells = build_month_grid(2024, 0, &[], date(2024, 7, 4)).unwrap();
    assert!(!cells[0].in_current_month);
    assert_eq!(cells[0].date, date(2023, 12, 31));
    assert!(cells[1].in_current_month);
    assert_eq!(cells[1].date, date(2024, 1, 1));
}

#[test]
fn december_trails_into_next_january() {
    let cells = build_month_grid(2024, 11, &[], date(2024, 7, 4)).unwrap();
    let last = cells.last().unwrap();
    assert!(!last.in_current_month);
    assert_eq!(last.date.year(), 2025);
    assert_eq!(last.date.month(), 1);
}

#[test]
fn grid_starts_on_sunday() {
    let cells = build_month_grid(2024, 6, &[], date(2024, 7, 4)).unwrap();
    assert_eq!(cells[0].date.weekday(), chrono::Weekday::Sun);
}

#[test]
fn only_todays_cell_is_marked() {
    let today = date(2024, 7, 4);
    let cells = build_month_grid(2024, 6, &[], today).unwrap();
    let marked: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].date, today);

    let other = build_month_grid(2024, 7, &[], today).unwrap();
    assert!(other.iter().all(|c| !c.is_today));
}

#[test]
fn events_land_in_their_day_in_input_order() {
    let events = vec![
        event("Museo del Oro", "2024-07-15"),
        event("Parque Simón Bolívar", "2024-07-02"),
        event("Teatro Colón", "2024-07-15"),
    ];
    let cells = build_month_grid(2024, 6, &events, date(2024, 7, 4)).unwrap();

    let fifteenth = cells
        .iter()
        .find(|c| c.in_current_month && c.day() == 15)
        .unwrap();
    let places: Vec<_> = fifteenth.events.iter().map(|e| e.place.as_str()).collect();
    assert_eq!(places, vec!["Museo del Oro", "Teatro Colón"]);

    let total: usize = cells.iter().map(|c| c.events.len()).sum();
    assert_eq!(total, 3);
}

#[test]
fn events_outside_the_month_or_undated_are_dropped() {
    let events = vec![
        event("Last month", "2024-06-30"),
        event("Garbage", "someday"),
        event("Empty", ""),
        event("Kept", "2024-07-01"),
    ];
    let cells = build_month_grid(2024, 6, &events, date(2024, 7, 4)).unwrap();

    // June 30 is shown as a leading cell but never receives events
    let leading = cells.iter().find(|c| c.date == date(2024, 6, 30)).unwrap();
    assert!(leading.events.is_empty());

    let kept: Vec<_> = cells.iter().flat_map(|c| c.events.iter()).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].place, "Kept");
}

#[test]
fn out_of_range_month_is_rejected() {
    let err = build_month_grid(2024, 12, &[], date(2024, 7, 4)).unwrap_err();
    assert!(matches!(err, CalendarError::InvalidMonth(12)));
}

#[test]
fn building_twice_gives_the_same_grid() {
    let events = vec![event("A", "2024-03-10"), event("B", "2024-03-10")];
    let today = date(2024, 3, 1);
    let first = build_month_grid(2024, 2, &events, today).unwrap();
    let second = build_month_grid(2024, 2, &events, today).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cursor_walks_across_the_year_boundary() {
    let cursor = MonthCursor::new(2024, 11).unwrap();
    let next = cursor.next();
    assert_eq!((next.year(), next.month0()), (2025, 0));
    assert_eq!(next.prev(), cursor);
    assert!(MonthCursor::new(2024, 12).is_err());
}
