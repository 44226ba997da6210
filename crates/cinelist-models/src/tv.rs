use serde::{Deserialize, Serialize};
use crate::media::{Genre, ProductionCompany, ProductionCountry, SpokenLanguage};

/// A TV series as it appears in list, search and trending responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvSeries {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

impl TvSeries {
    pub fn year(&self) -> Option<u32> {
        self.first_air_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

/// Season summary embedded in `/tv/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub episode_count: u32,
    pub season_number: u32,
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub episode_number: u32,
    pub season_number: u32,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    pub still_path: Option<String>,
}

/// Response of `/tv/{id}/season/{n}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub season_number: u32,
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Full series record from `/tv/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvSeriesDetails {
    #[serde(flatten)]
    pub series: TvSeries,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub number_of_episodes: u32,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub status: String,
    pub tagline: Option<String>,
    #[serde(rename = "type", default)]
    pub series_type: String,
    pub last_air_date: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub in_production: bool,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

impl From<TvSeriesDetails> for TvSeries {
    fn from(details: TvSeriesDetails) -> Self {
        let mut series = details.series;
        if series.genre_ids.is_empty() {
            series.genre_ids = details.genres.iter().map(|g| g.id).collect();
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_details_type_field() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "poster_path": null,
            "backdrop_path": null,
            "type": "Scripted",
            "number_of_seasons": 8,
            "seasons": [{"id": 3624, "name": "Season 1", "season_number": 1, "episode_count": 10, "air_date": "2011-04-17", "poster_path": null}]
        }"#;
        let details: TvSeriesDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.series_type, "Scripted");
        assert_eq!(details.seasons.len(), 1);
        assert_eq!(details.series.year(), Some(2011));
    }
}
