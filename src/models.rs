use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Ordered set of mood tags attached to an event.
///
/// Moods are parsed once from their comma-separated form (`"party, family"`):
/// each segment is trimmed, empty segments are dropped and duplicates keep
/// their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodSet(Vec<String>);

impl MoodSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a comma-separated mood list
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for segment in raw.split(',') {
            set.insert(segment);
        }
        set
    }

    /// Insert a mood; returns false when it was blank or already present
    pub fn insert(&mut self, mood: &str) -> bool {
        let mood = mood.trim();
        if mood.is_empty() || self.contains(mood) {
            return false;
        }
        self.0.push(mood.to_string());
        true
    }

    pub fn remove(&mut self, mood: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|m| m != mood.trim());
        self.0.len() != before
    }

    pub fn contains(&self, mood: &str) -> bool {
        self.0.iter().any(|m| m == mood)
    }

    /// True when at least one mood is shared with `other`
    pub fn intersects(&self, other: &MoodSet) -> bool {
        self.0.iter().any(|m| other.contains(m))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Join back into the stored form: `"party, family"`
    pub fn to_joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for MoodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_joined())
    }
}

impl<S: AsRef<str>> FromIterator<S> for MoodSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = MoodSet::new();
        for mood in iter {
            set.insert(mood.as_ref());
        }
        set
    }
}

impl Serialize for MoodSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.join(","))
    }
}

impl<'de> Deserialize<'de> for MoodSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| MoodSet::parse(&s)).unwrap_or_default())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Place is required")]
    MissingPlace,
    #[error("City is required")]
    MissingCity,
    #[error("Date is required")]
    MissingDate,
}

/// A user-created place/date record.
///
/// The JSON form uses the camelCase keys of the browser app's storage so
/// exported collections can be moved between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub date: String, // YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>, // HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(rename = "mood", default, skip_serializing_if = "MoodSet::is_empty")]
    pub moods: MoodSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Event {
    pub fn new(place: String, city: String, date: String) -> Self {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            place,
            city,
            date,
            start_time: None,
            end_time: None,
            is_free: false,
            link: None,
            is_draft: false,
            moods: MoodSet::new(),
            notes: None,
            image_url: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check the fields required to publish; drafts are never validated
    pub fn validate(&self) -> Result<(), EventError> {
        if self.is_draft {
            return Ok(());
        }
        if self.place.trim().is_empty() {
            return Err(EventError::MissingPlace);
        }
        if self.city.trim().is_empty() {
            return Err(EventError::MissingCity);
        }
        if self.date.trim().is_empty() {
            return Err(EventError::MissingDate);
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    /// Title used in lists and modals: "Place (City)"
    pub fn display_name(&self) -> String {
        match (self.place.trim().is_empty(), self.city.trim().is_empty()) {
            (false, false) => format!("{} ({})", self.place, self.city),
            (false, true) => self.place.clone(),
            (true, false) => format!("Untitled ({})", self.city),
            (true, true) => "Untitled".to_string(),
        }
    }
}

/// Entry of the mood taxonomy managed from the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
}

impl Mood {
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: None,
            icon: None,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_skips_empty_segments() {
        let moods = MoodSet::parse(" party, ,family ,,party");
        assert_eq!(moods.iter().collect::<Vec<_>>(), vec!["party", "family"]);
        assert_eq!(moods.to_joined(), "party, family");
    }

    #[test]
    fn intersects_is_or_semantics() {
        let event = MoodSet::parse("party,family");
        assert!(event.intersects(&MoodSet::parse("cultural, family")));
        assert!(!event.intersects(&MoodSet::parse("cultural")));
        assert!(!MoodSet::new().intersects(&event));
    }

    #[test]
    fn json_uses_browser_storage_keys() {
        let raw = r#"{"id":"1","place":"Teatro","city":"Cali","date":"2024-07-01",
            "startTime":"20:00","mood":"cultural, romantic","isDraft":false}"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.start_time.as_deref(), Some("20:00"));
        assert!(event.moods.contains("romantic"));

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["mood"], "cultural,romantic");
        assert_eq!(back["startTime"], "20:00");
    }

    #[test]
    fn validate_requires_place_city_date_unless_draft() {
        let mut event = Event::new(String::new(), "Cali".into(), "2024-07-01".into());
        assert_eq!(event.validate(), Err(EventError::MissingPlace));
        event.is_draft = true;
        assert_eq!(event.validate(), Ok(()));
    }
}
