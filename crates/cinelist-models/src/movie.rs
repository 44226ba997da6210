use serde::{Deserialize, Serialize};
use crate::media::{Genre, ProductionCompany, ProductionCountry, SpokenLanguage};

/// A movie as it appears in list, search and trending responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>, // TMDB sends "" for unknown dates
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Release year parsed from `release_date`, if it has one
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

/// Full movie record from `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub status: String,
    pub tagline: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

impl From<MovieDetails> for Movie {
    fn from(details: MovieDetails) -> Self {
        let mut movie = details.movie;
        // Details responses carry `genres` instead of `genre_ids`
        if movie.genre_ids.is_empty() {
            movie.genre_ids = details.genres.iter().map(|g| g.id).collect();
        }
        movie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_tolerates_sparse_payload() {
        let movie: Movie = serde_json::from_str(r#"{"id": 550, "title": "Fight Club", "poster_path": null, "backdrop_path": null}"#).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.vote_count, 0);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_details_flatten_and_convert() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "poster_path": "/p.jpg",
            "backdrop_path": null,
            "genres": [{"id": 18, "name": "Drama"}],
            "runtime": 139,
            "status": "Released",
            "homepage": null,
            "imdb_id": "tt0137523",
            "tagline": "Mischief. Mayhem. Soap."
        }"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.movie.title, "Fight Club");
        assert_eq!(details.runtime, Some(139));

        let movie: Movie = details.into();
        assert_eq!(movie.genre_ids, vec![18]);
        assert_eq!(movie.year(), Some(1999));
    }
}
