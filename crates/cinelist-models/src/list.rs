use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use crate::category::ContentKind;
use crate::movie::Movie;
use crate::tv::TvSeries;

/// A record that can be kept in a user list
pub trait Listable: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ContentKind;

    fn id(&self) -> u64;

    fn display_title(&self) -> &str;
}

impl Listable for Movie {
    const KIND: ContentKind = ContentKind::Movie;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_title(&self) -> &str {
        &self.title
    }
}

impl Listable for TvSeries {
    const KIND: ContentKind = ContentKind::Tv;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_title(&self) -> &str {
        &self.name
    }
}

/// The two user-curated lists kept per content kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Favorites,
    Watchlist,
}

impl ListKind {
    /// Reserved storage key for this list and content kind
    pub fn storage_key(&self, kind: ContentKind) -> &'static str {
        match (self, kind) {
            (ListKind::Favorites, ContentKind::Movie) => "favorites",
            (ListKind::Watchlist, ContentKind::Movie) => "watchlist",
            (ListKind::Favorites, ContentKind::Tv) => "tv_favorites",
            (ListKind::Watchlist, ContentKind::Tv) => "tv_watchlist",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Favorites => f.write_str("favorites"),
            ListKind::Watchlist => f.write_str("watchlist"),
        }
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "favorites" | "favourites" | "favorite" => Ok(ListKind::Favorites),
            "watchlist" => Ok(ListKind::Watchlist),
            _ => Err(format!("Invalid list: {}. Use 'favorites' or 'watchlist'", s)),
        }
    }
}

/// Name of the id map inside a stored list document
pub fn document_field(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Movie => "movies",
        ContentKind::Tv => "tvSeries",
    }
}

/// A stored list entry: the base record plus the time it was added
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEntry<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl<T> ListEntry<T> {
    pub fn new(record: T, added_at: DateTime<Utc>) -> Self {
        Self { record, added_at }
    }
}

/// One stored list: entries keyed by record id plus a `lastUpdated` stamp.
///
/// Stored as `{ "<field>": { "<id>": { ..record, "addedAt": .. } }, "lastUpdated": .. }`
/// where `<field>` is `movies` or `tvSeries`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDocument<T> {
    pub entries: BTreeMap<u64, ListEntry<T>>,
    pub last_updated: DateTime<Utc>,
}

impl<T: Listable> ListDocument<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Entries newest first by `addedAt`
    pub fn sorted_entries(&self) -> Vec<ListEntry<T>> {
        let mut entries: Vec<ListEntry<T>> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        entries
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut items = Map::new();
        for (id, entry) in &self.entries {
            items.insert(id.to_string(), serde_json::to_value(entry)?);
        }

        let mut root = Map::new();
        root.insert(document_field(T::KIND).to_string(), Value::Object(items));
        root.insert("lastUpdated".to_string(), serde_json::to_value(self.last_updated)?);
        Ok(Value::Object(root))
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "list document must be an object, found {}",
                    other
                )))
            }
        };

        let last_updated = match root.remove("lastUpdated") {
            Some(v) => serde_json::from_value(v)?,
            None => Utc::now(),
        };

        let mut entries = BTreeMap::new();
        if let Some(items) = root.remove(document_field(T::KIND)) {
            let items: BTreeMap<String, ListEntry<T>> = serde_json::from_value(items)?;
            // Key by the record's own id; the map key is only a copy of it
            for entry in items.into_values() {
                entries.insert(entry.record.id(), entry);
            }
        }

        Ok(Self { entries, last_updated })
    }
}

impl<T: Listable> Default for ListDocument<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            original_title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: Some("2020-01-01".to_string()),
            vote_average: 7.5,
            vote_count: 100,
            popularity: 10.0,
            genre_ids: vec![18],
            adult: false,
            original_language: "en".to_string(),
            video: false,
        }
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(ListKind::Favorites.storage_key(ContentKind::Movie), "favorites");
        assert_eq!(ListKind::Watchlist.storage_key(ContentKind::Movie), "watchlist");
        assert_eq!(ListKind::Favorites.storage_key(ContentKind::Tv), "tv_favorites");
        assert_eq!(ListKind::Watchlist.storage_key(ContentKind::Tv), "tv_watchlist");
    }

    #[test]
    fn test_document_shape() {
        let mut doc: ListDocument<Movie> = ListDocument::new();
        let added = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        doc.entries.insert(550, ListEntry::new(movie(550, "Fight Club"), added));

        let value = doc.to_value().unwrap();
        assert_eq!(value["movies"]["550"]["title"], "Fight Club");
        assert_eq!(value["movies"]["550"]["addedAt"], "2024-05-01T12:00:00Z");
        assert!(value["lastUpdated"].is_string());
    }

    #[test]
    fn test_reads_original_document() {
        let json = r#"{
            "tvSeries": {
                "1399": {
                    "id": 1399,
                    "name": "Game of Thrones",
                    "poster_path": null,
                    "backdrop_path": null,
                    "vote_average": 8.4,
                    "first_air_date": "2011-04-17",
                    "overview": "",
                    "popularity": 300.5,
                    "vote_count": 20000,
                    "original_language": "en",
                    "original_name": "Game of Thrones",
                    "origin_country": ["US"],
                    "addedAt": "2024-05-01T12:00:00.000Z"
                }
            },
            "lastUpdated": "2024-05-01T12:00:00.000Z"
        }"#;
        let doc: ListDocument<TvSeries> = ListDocument::from_value(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[&1399].record.name, "Game of Thrones");
    }

    #[test]
    fn test_sorted_newest_first() {
        let mut doc: ListDocument<Movie> = ListDocument::new();
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        doc.entries.insert(1, ListEntry::new(movie(1, "Old"), older));
        doc.entries.insert(2, ListEntry::new(movie(2, "New"), newer));

        let sorted = doc.sorted_entries();
        assert_eq!(sorted[0].record.id, 2);
        assert_eq!(sorted[1].record.id, 1);
    }

    #[test]
    fn test_missing_field_is_empty() {
        let doc: ListDocument<Movie> = ListDocument::from_value(serde_json::json!({})).unwrap();
        assert!(doc.entries.is_empty());
        assert!(ListDocument::<Movie>::from_value(serde_json::json!([1, 2])).is_err());
    }
}
