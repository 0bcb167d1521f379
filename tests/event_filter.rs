use parchify::{Event, FilterSpec, MoodSet, TimeOfDay, filter_events};

fn event(place: &str, city: &str, date: &str) -> Event {
    Event::new(place.to_string(), city.to_string(), date.to_string())
}

fn with_moods(mut event: Event, moods: &str) -> Event {
    event.moods = MoodSet::parse(moods);
    event
}

fn at(mut event: Event, start: &str) -> Event {
    event.start_time = Some(start.to_string());
    event
}

fn places(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.place.as_str()).collect()
}

#[test]
fn empty_input_yields_empty_output() {
    let spec = FilterSpec {
        search_text: "jazz".to_string(),
        time_of_day: TimeOfDay::Night,
        ..FilterSpec::default()
    };
    assert!(filter_events(&[], &spec).is_empty());
    assert!(filter_events(&[], &FilterSpec::default()).is_empty());
}

#[test]
fn unset_spec_keeps_everything_newest_first() {
    let events = vec![
        event("A", "Bogotá", "2024-07-01"),
        event("B", "Medellín", "2024-07-20"),
        event("C", "Cali", "2024-07-10"),
        event("D", "Cali", "2024-07-20"),
    ];
    let spec = FilterSpec::default();
    assert!(spec.is_unset());

    let result = filter_events(&events, &spec);
    // ties keep input order
    assert_eq!(places(&result), vec!["B", "D", "C", "A"]);
}

#[test]
fn mood_filter_matches_any_selected_mood() {
    let events = vec![
        with_moods(event("First", "Bogotá", "2024-07-01"), "party,family"),
        with_moods(event("Second", "Bogotá", "2024-07-02"), "cultural"),
    ];
    let spec = FilterSpec {
        selected_moods: MoodSet::parse("family"),
        ..FilterSpec::default()
    };
    let result = filter_events(&events, &spec);
    assert_eq!(result, vec![events[0].clone()]);

    let spec = FilterSpec {
        selected_moods: MoodSet::parse("family, cultural"),
        ..FilterSpec::default()
    };
    assert_eq!(places(&filter_events(&events, &spec)), vec!["Second", "First"]);
}

#[test]
fn events_without_moods_fail_an_active_mood_filter() {
    let events = vec![event("Bare", "Bogotá", "2024-07-01")];
    let spec = FilterSpec {
        selected_moods: MoodSet::parse("party"),
        ..FilterSpec::default()
    };
    assert!(filter_events(&events, &spec).is_empty());
}

#[test]
fn late_start_is_night_not_evening() {
    let events = vec![at(event("Late show", "Bogotá", "2024-07-15"), "23:30")];

    let night = FilterSpec {
        time_of_day: TimeOfDay::Night,
        ..FilterSpec::default()
    };
    assert_eq!(filter_events(&events, &night).len(), 1);

    let evening = FilterSpec {
        time_of_day: TimeOfDay::Evening,
        ..FilterSpec::default()
    };
    assert!(filter_events(&events, &evening).is_empty());
}

#[test]
fn time_filter_drops_missing_or_unparseable_start() {
    let events = vec![
        event("No time", "Bogotá", "2024-07-15"),
        at(event("Garbage", "Bogotá", "2024-07-15"), "soon"),
        at(event("Brunch", "Bogotá", "2024-07-15"), "10:00"),
    ];
    let spec = FilterSpec {
        time_of_day: TimeOfDay::Morning,
        ..FilterSpec::default()
    };
    assert_eq!(places(&filter_events(&events, &spec)), vec!["Brunch"]);
}

#[test]
fn search_is_case_insensitive_over_place_city_and_notes() {
    let mut noted = event("Rooftop", "Cali", "2024-07-03");
    noted.notes = Some("Live JAZZ until late".to_string());
    let events = vec![
        event("Jazz Club", "Bogotá", "2024-07-01"),
        event("Parque", "Jazzville", "2024-07-02"),
        noted,
        event("Museo", "Medellín", "2024-07-04"),
    ];
    let spec = FilterSpec {
        search_text: "jAzZ".to_string(),
        ..FilterSpec::default()
    };
    assert_eq!(
        places(&filter_events(&events, &spec)),
        vec!["Rooftop", "Parque", "Jazz Club"]
    );
}

#[test]
fn city_filter_is_exact() {
    let events = vec![
        event("A", "Bogotá", "2024-07-01"),
        event("B", "bogotá", "2024-07-02"),
        event("C", "Bogotá D.C.", "2024-07-03"),
    ];
    let spec = FilterSpec {
        city: Some("Bogotá".to_string()),
        ..FilterSpec::default()
    };
    assert_eq!(places(&filter_events(&events, &spec)), vec!["A"]);

    let empty_city = FilterSpec {
        city: Some(String::new()),
        ..FilterSpec::default()
    };
    assert_eq!(filter_events(&events, &empty_city).len(), 3);
}

#[test]
fn criteria_combine_with_and() {
    let events = vec![
        at(with_moods(event("Salsa", "Cali", "2024-07-05"), "party"), "21:00"),
        at(with_moods(event("Picnic", "Cali", "2024-07-06"), "family"), "13:00"),
        at(with_moods(event("Rumba", "Bogotá", "2024-07-07"), "party"), "21:00"),
    ];
    let spec = FilterSpec {
        city: Some("Cali".to_string()),
        selected_moods: MoodSet::parse("party"),
        time_of_day: TimeOfDay::Evening,
        ..FilterSpec::default()
    };
    assert_eq!(places(&filter_events(&events, &spec)), vec!["Salsa"]);
}

#[test]
fn undated_events_sort_last() {
    let events = vec![
        event("Undated", "Bogotá", "tbd"),
        event("Old", "Bogotá", "2023-01-01"),
        event("New", "Bogotá", "2024-01-01"),
    ];
    let result = filter_events(&events, &FilterSpec::default());
    assert_eq!(places(&result), vec!["New", "Old", "Undated"]);
}

#[test]
fn filtering_is_idempotent() {
    let events = vec![
        with_moods(event("A", "Cali", "2024-07-01"), "party"),
        with_moods(event("B", "Cali", "2024-07-03"), "party,cultural"),
        with_moods(event("C", "Bogotá", "2024-07-02"), "cultural"),
    ];
    let spec = FilterSpec {
        selected_moods: MoodSet::parse("party"),
        ..FilterSpec::default()
    };
    let once = filter_events(&events, &spec);
    let twice = filter_events(&once, &spec);
    assert_eq!(once, twice);
}
