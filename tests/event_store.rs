use parchify::database::DatabaseError;
use parchify::models::EventError;
use parchify::{Database, Event, EventStore, Mood, MoodSet};
use tempfile::tempdir;

fn open_temp_db(dir: &tempfile::TempDir) -> Database {
    let path = dir.path().join("nested").join("parchify.db");
    Database::new(path.to_str().unwrap()).unwrap()
}

fn sample(place: &str, date: &str) -> Event {
    let mut event = Event::new(place.to_string(), "Bogotá".to_string(), date.to_string());
    event.start_time = Some("20:00".to_string());
    event.moods = MoodSet::parse("party, cultural");
    event.notes = Some("bring cash".to_string());
    event
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let event = sample("Teatro Colón", "2024-07-15");
    {
        let db = open_temp_db(&dir);
        db.create(&event).unwrap();
    }
    let db = open_temp_db(&dir);
    let loaded = db.get(&event.id).unwrap();
    assert_eq!(loaded, event);
}

#[test]
fn create_update_delete_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let mut event = sample("Museo", "2024-07-01");
    db.create(&event).unwrap();

    event.city = "Medellín".to_string();
    event.moods = MoodSet::parse("family");
    event.touch();
    db.update(&event).unwrap();

    let loaded = db.get(&event.id).unwrap();
    assert_eq!(loaded.city, "Medellín");
    assert!(loaded.moods.contains("family"));
    assert!(!loaded.moods.contains("party"));

    db.delete(&event.id).unwrap();
    assert!(matches!(db.get(&event.id), Err(DatabaseError::EventNotFound(_))));
    assert!(matches!(db.delete(&event.id), Err(DatabaseError::EventNotFound(_))));
}

#[test]
fn create_rejects_duplicates_and_invalid_events() {
    let db = Database::open_in_memory().unwrap();
    let event = sample("Museo", "2024-07-01");
    db.create(&event).unwrap();
    assert!(matches!(db.create(&event), Err(DatabaseError::DuplicateEvent(_))));

    let missing_city = Event::new("Museo".to_string(), String::new(), "2024-07-01".to_string());
    assert!(matches!(
        db.create(&missing_city),
        Err(DatabaseError::InvalidEvent(EventError::MissingCity))
    ));
}

#[test]
fn drafts_are_listed_apart_and_published_after_validation() {
    let db = Database::open_in_memory().unwrap();

    let mut incomplete = Event::new("Half idea".to_string(), String::new(), String::new());
    incomplete.is_draft = true;
    db.create(&incomplete).unwrap();

    let mut ready = sample("Concierto", "2024-08-01");
    ready.is_draft = true;
    db.create(&ready).unwrap();

    db.create(&sample("Published", "2024-07-01")).unwrap();

    assert_eq!(db.list_drafts().unwrap().len(), 2);
    assert_eq!(db.list_events().unwrap().len(), 1);
    assert_eq!(db.list().unwrap().len(), 3);

    assert!(matches!(
        db.publish_draft(&incomplete.id),
        Err(DatabaseError::InvalidEvent(EventError::MissingCity))
    ));
    assert!(db.get(&incomplete.id).unwrap().is_draft);

    let published = db.publish_draft(&ready.id).unwrap();
    assert!(!published.is_draft);
    assert_eq!(db.list_drafts().unwrap().len(), 1);
    assert_eq!(db.list_events().unwrap().len(), 2);
}

#[test]
fn favorites_toggle_and_follow_deletes() {
    let db = Database::open_in_memory().unwrap();
    let event = sample("Museo", "2024-07-01");
    db.create(&event).unwrap();

    assert!(db.toggle_favorite(&event.id).unwrap());
    assert!(db.favorite_ids().unwrap().contains(&event.id));
    assert_eq!(db.list_favorite_events().unwrap().len(), 1);

    assert!(!db.toggle_favorite(&event.id).unwrap());
    assert!(db.favorite_ids().unwrap().is_empty());

    db.toggle_favorite(&event.id).unwrap();
    db.delete(&event.id).unwrap();
    assert!(db.favorite_ids().unwrap().is_empty());

    assert!(matches!(
        db.toggle_favorite("missing"),
        Err(DatabaseError::EventNotFound(_))
    ));
}

#[test]
fn mood_taxonomy_seeds_once_and_rejects_duplicates() {
    let db = Database::open_in_memory().unwrap();
    let defaults = vec!["party".to_string(), "family".to_string(), "party".to_string()];

    assert_eq!(db.seed_moods_if_empty(&defaults).unwrap(), 2);
    assert_eq!(db.seed_moods_if_empty(&defaults).unwrap(), 0);

    db.add_mood(&Mood::new("cultural".to_string())).unwrap();
    let names: Vec<_> = db.list_moods().unwrap().into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["party", "family", "cultural"]);

    assert!(matches!(
        db.add_mood(&Mood::new(" party ".to_string())),
        Err(DatabaseError::DuplicateMood(_))
    ));
    assert!(matches!(
        db.add_mood(&Mood::new("   ".to_string())),
        Err(DatabaseError::InvalidMood)
    ));

    assert!(db.delete_mood("family").unwrap());
    assert!(!db.delete_mood("family").unwrap());
    assert_eq!(db.list_moods().unwrap().len(), 2);
}

#[test]
fn deleting_a_mood_keeps_event_tags() {
    let db = Database::open_in_memory().unwrap();
    db.seed_moods_if_empty(&["party".to_string()]).unwrap();
    let event = sample("Rumba", "2024-07-05");
    db.create(&event).unwrap();

    db.delete_mood("party").unwrap();
    assert!(db.get(&event.id).unwrap().moods.contains("party"));
}

#[test]
fn export_then_import_into_fresh_database() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("events.json");

    let source = Database::open_in_memory().unwrap();
    let mut draft = Event::new("Idea".to_string(), String::new(), String::new());
    draft.is_draft = true;
    source.create(&draft).unwrap();
    source.create(&sample("Museo", "2024-07-01")).unwrap();
    assert_eq!(source.export_json(&file).unwrap(), 2);

    let raw = std::fs::read_to_string(&file).unwrap();
    assert!(raw.contains("\"mood\": \"party,cultural\""));
    assert!(raw.contains("\"startTime\""));

    let target = Database::open_in_memory().unwrap();
    assert_eq!(target.import_json(&file).unwrap(), 2);
    assert_eq!(target.list_drafts().unwrap().len(), 1);
    assert_eq!(target.list_events().unwrap().len(), 1);

    // importing again updates in place
    assert_eq!(target.import_json(&file).unwrap(), 2);
    assert_eq!(target.list().unwrap().len(), 2);
}

#[test]
fn import_reports_malformed_files() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();

    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.import_json(&file),
        Err(DatabaseError::TransferError(_))
    ));
}

#[test]
fn failed_import_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("half_valid.json");
    std::fs::write(
        &file,
        r#"[
            {"id": "a", "place": "Museo", "city": "Cali", "date": "2024-07-01"},
            {"id": "b", "place": "", "city": "Cali", "date": "2024-07-02"}
        ]"#,
    )
    .unwrap();

    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.import_json(&file),
        Err(DatabaseError::InvalidEvent(EventError::MissingPlace))
    ));
    assert!(db.list().unwrap().is_empty());

    // the store is still usable afterwards
    db.create(&sample("Teatro", "2024-07-03")).unwrap();
    assert_eq!(db.list().unwrap().len(), 1);
}
