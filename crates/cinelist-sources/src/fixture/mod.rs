//! Static catalog used when no API key is configured.
//!
//! Serves the same endpoint table as the live client from a small canned data
//! set, paginated 20 per page. Nothing here touches the network.

pub mod data;

use crate::endpoint::Endpoint;
use crate::error::SourceError;
use crate::traits::DataSource;
use async_trait::async_trait;
use cinelist_models::{
    ContentKind, Credits, Episode, Genre, GenreList, Movie, MovieCategory, MovieDetails, Page, Review,
    Season, SeasonDetails, TvCategory, TvSeries, TvSeriesDetails, Videos,
};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

pub const FIXTURE_PAGE_SIZE: usize = 20;

const SEASONS_PER_SERIES: u32 = 3;
const EPISODES_PER_SEASON: u32 = 10;

#[derive(Debug, Clone)]
pub struct FixtureSource {
    movies: Vec<Movie>,
    series: Vec<TvSeries>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::with_data(data::movies(), data::tv_series())
    }

    pub fn with_data(movies: Vec<Movie>, series: Vec<TvSeries>) -> Self {
        Self { movies, series }
    }

    fn find_movie(&self, id: u64) -> Result<&Movie, SourceError> {
        self.movies
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| SourceError::NotFound(format!("movie {}", id)))
    }

    fn find_series(&self, id: u64) -> Result<&TvSeries, SourceError> {
        self.series
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SourceError::NotFound(format!("tv series {}", id)))
    }

    fn movie_list(&self, category: MovieCategory) -> Vec<Movie> {
        let mut movies = self.movies.clone();
        match category {
            MovieCategory::Popular => movies.sort_by(|a, b| desc(a.popularity, b.popularity)),
            MovieCategory::TopRated => movies.sort_by(|a, b| desc(a.vote_average, b.vote_average)),
            MovieCategory::NowPlaying => movies.sort_by(|a, b| b.release_date.cmp(&a.release_date)),
            MovieCategory::Upcoming => {}
        }
        movies
    }

    fn tv_list(&self, category: TvCategory) -> Vec<TvSeries> {
        let mut series = self.series.clone();
        match category {
            TvCategory::Popular => series.sort_by(|a, b| desc(a.popularity, b.popularity)),
            TvCategory::TopRated => series.sort_by(|a, b| desc(a.vote_average, b.vote_average)),
            TvCategory::OnTheAir | TvCategory::AiringToday => {}
        }
        series
    }

    fn movie_details(&self, id: u64) -> Result<MovieDetails, SourceError> {
        let movie = self.find_movie(id)?.clone();
        Ok(MovieDetails {
            genres: genre_names(&movie.genre_ids, &data::movie_genres()),
            runtime: Some(120),
            budget: 0,
            revenue: 0,
            homepage: None,
            imdb_id: None,
            status: "Released".to_string(),
            tagline: None,
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: Vec::new(),
            movie,
        })
    }

    fn tv_details(&self, id: u64) -> Result<TvSeriesDetails, SourceError> {
        let series = self.find_series(id)?.clone();
        let seasons = (1..=SEASONS_PER_SERIES)
            .map(|n| Season {
                id: id * 100 + n as u64,
                name: format!("Season {}", n),
                episode_count: EPISODES_PER_SEASON,
                season_number: n,
                air_date: series.first_air_date.clone(),
                overview: String::new(),
                poster_path: None,
                vote_average: series.vote_average,
            })
            .collect();

        Ok(TvSeriesDetails {
            genres: genre_names(&series.genre_ids, &data::tv_genres()),
            episode_run_time: vec![45],
            number_of_episodes: SEASONS_PER_SERIES * EPISODES_PER_SEASON,
            number_of_seasons: SEASONS_PER_SERIES,
            seasons,
            status: "Returning Series".to_string(),
            tagline: None,
            series_type: "Scripted".to_string(),
            last_air_date: None,
            homepage: None,
            in_production: true,
            created_by: Vec::new(),
            networks: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: Vec::new(),
            series,
        })
    }

    fn season(&self, tv_id: u64, season: u32) -> Result<SeasonDetails, SourceError> {
        self.find_series(tv_id)?;
        if season == 0 || season > SEASONS_PER_SERIES {
            return Err(SourceError::NotFound(format!("season {} of tv series {}", season, tv_id)));
        }

        Ok(SeasonDetails {
            id: tv_id * 100 + season as u64,
            name: format!("Season {}", season),
            season_number: season,
            air_date: None,
            overview: String::new(),
            poster_path: None,
            episodes: (1..=EPISODES_PER_SEASON)
                .map(|n| synthetic_episode(tv_id, season, n))
                .collect(),
        })
    }

    fn episode(&self, tv_id: u64, season: u32, episode: u32) -> Result<Episode, SourceError> {
        let season_details = self.season(tv_id, season)?;
        season_details
            .episodes
            .into_iter()
            .find(|e| e.episode_number == episode)
            .ok_or_else(|| {
                SourceError::NotFound(format!("episode S{:02}E{:02} of tv series {}", season, episode, tv_id))
            })
    }

    fn similar_movies(&self, id: u64) -> Result<Vec<Movie>, SourceError> {
        let genres = self.find_movie(id)?.genre_ids.clone();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.id != id && m.genre_ids.iter().any(|g| genres.contains(g)))
            .cloned()
            .collect())
    }

    fn similar_series(&self, id: u64) -> Result<Vec<TvSeries>, SourceError> {
        let genres = self.find_series(id)?.genre_ids.clone();
        Ok(self
            .series
            .iter()
            .filter(|s| s.id != id && s.genre_ids.iter().any(|g| genres.contains(g)))
            .cloned()
            .collect())
    }

    fn respond(&self, endpoint: &Endpoint) -> Result<Value, SourceError> {
        match endpoint {
            Endpoint::Trending { kind: ContentKind::Movie, page, .. } => {
                encode(endpoint, paginate(&self.movie_list(MovieCategory::Popular), *page))
            }
            Endpoint::Trending { kind: ContentKind::Tv, page, .. } => {
                encode(endpoint, paginate(&self.tv_list(TvCategory::Popular), *page))
            }
            Endpoint::MovieList { category, page } => {
                encode(endpoint, paginate(&self.movie_list(*category), *page))
            }
            Endpoint::TvList { category, page } => {
                encode(endpoint, paginate(&self.tv_list(*category), *page))
            }
            Endpoint::Search { kind: ContentKind::Movie, query, page } => {
                let needle = query.trim().to_lowercase();
                let hits: Vec<Movie> = self
                    .movies
                    .iter()
                    .filter(|m| m.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
                encode(endpoint, paginate(&hits, *page))
            }
            Endpoint::Search { kind: ContentKind::Tv, query, page } => {
                let needle = query.trim().to_lowercase();
                let hits: Vec<TvSeries> = self
                    .series
                    .iter()
                    .filter(|s| s.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
                encode(endpoint, paginate(&hits, *page))
            }
            Endpoint::Details { kind: ContentKind::Movie, id } => encode(endpoint, self.movie_details(*id)?),
            Endpoint::Details { kind: ContentKind::Tv, id } => encode(endpoint, self.tv_details(*id)?),
            Endpoint::Credits { kind, id } => {
                self.ensure_exists(*kind, *id)?;
                encode(endpoint, Credits { id: *id, cast: Vec::new(), crew: Vec::new() })
            }
            Endpoint::Videos { kind, id } => {
                self.ensure_exists(*kind, *id)?;
                encode(endpoint, Videos { id: *id, results: Vec::new() })
            }
            Endpoint::Reviews { kind, id, page } => {
                self.ensure_exists(*kind, *id)?;
                encode(endpoint, paginate::<Review>(&[], *page))
            }
            Endpoint::Similar { kind: ContentKind::Movie, id, page } => {
                encode(endpoint, paginate(&self.similar_movies(*id)?, *page))
            }
            Endpoint::Similar { kind: ContentKind::Tv, id, page } => {
                encode(endpoint, paginate(&self.similar_series(*id)?, *page))
            }
            Endpoint::Recommendations { kind: ContentKind::Movie, id, page } => {
                self.find_movie(*id)?;
                let picks: Vec<Movie> = self
                    .movie_list(MovieCategory::Popular)
                    .into_iter()
                    .filter(|m| m.id != *id)
                    .collect();
                encode(endpoint, paginate(&picks, *page))
            }
            Endpoint::Recommendations { kind: ContentKind::Tv, id, page } => {
                self.find_series(*id)?;
                let picks: Vec<TvSeries> = self
                    .tv_list(TvCategory::Popular)
                    .into_iter()
                    .filter(|s| s.id != *id)
                    .collect();
                encode(endpoint, paginate(&picks, *page))
            }
            Endpoint::Season { tv_id, season } => encode(endpoint, self.season(*tv_id, *season)?),
            Endpoint::Episode { tv_id, season, episode } => {
                encode(endpoint, self.episode(*tv_id, *season, *episode)?)
            }
            Endpoint::Genres { kind } => {
                let genres = match kind {
                    ContentKind::Movie => data::movie_genres(),
                    ContentKind::Tv => data::tv_genres(),
                };
                encode(endpoint, GenreList { genres })
            }
        }
    }

    fn ensure_exists(&self, kind: ContentKind, id: u64) -> Result<(), SourceError> {
        match kind {
            ContentKind::Movie => self.find_movie(id).map(|_| ()),
            ContentKind::Tv => self.find_series(id).map(|_| ()),
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    fn source_name(&self) -> &str {
        "fixture"
    }

    async fn get(&self, endpoint: &Endpoint) -> Result<Value, SourceError> {
        debug!("fixture GET {}", endpoint.path());
        self.respond(endpoint)
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn paginate<T: Clone>(items: &[T], page: u32) -> Page<T> {
    let total_pages = items.len().div_ceil(FIXTURE_PAGE_SIZE) as u32;
    let start = (page.max(1) as usize - 1) * FIXTURE_PAGE_SIZE;
    let results = items.iter().skip(start).take(FIXTURE_PAGE_SIZE).cloned().collect();

    Page {
        page,
        results,
        total_pages,
        total_results: items.len() as u64,
    }
}

fn genre_names(ids: &[u64], all: &[Genre]) -> Vec<Genre> {
    ids.iter()
        .filter_map(|id| all.iter().find(|g| g.id == *id).cloned())
        .collect()
}

fn synthetic_episode(tv_id: u64, season: u32, number: u32) -> Episode {
    Episode {
        id: tv_id * 10_000 + season as u64 * 100 + number as u64,
        name: format!("Episode {}", number),
        episode_number: number,
        season_number: season,
        overview: String::new(),
        air_date: None,
        runtime: Some(45),
        vote_average: 0.0,
        vote_count: 0,
        still_path: None,
    }
}

fn encode<T: Serialize>(endpoint: &Endpoint, value: T) -> Result<Value, SourceError> {
    serde_json::to_value(value).map_err(|source| SourceError::Decode {
        endpoint: endpoint.path(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelist_models::TimeWindow;

    #[tokio::test]
    async fn test_popular_paginates() {
        let source = FixtureSource::new();
        let first: Page<Movie> = serde_json::from_value(
            source.get(&Endpoint::MovieList { category: MovieCategory::Popular, page: 1 }).await.unwrap(),
        )
        .unwrap();
        assert_eq!(first.results.len(), FIXTURE_PAGE_SIZE);
        assert_eq!(first.total_pages, 2);
        assert!(first.results[0].popularity >= first.results[1].popularity);

        let second: Page<Movie> = serde_json::from_value(
            source.get(&Endpoint::MovieList { category: MovieCategory::Popular, page: 2 }).await.unwrap(),
        )
        .unwrap();
        assert_eq!(second.results.len(), data::movies().len() - FIXTURE_PAGE_SIZE);

        let beyond: Page<Movie> = serde_json::from_value(
            source.get(&Endpoint::MovieList { category: MovieCategory::Popular, page: 9 }).await.unwrap(),
        )
        .unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.page, 9);
    }

    #[tokio::test]
    async fn test_trending_sorted_by_popularity() {
        let source = FixtureSource::new();
        let page: Page<TvSeries> = serde_json::from_value(
            source
                .get(&Endpoint::Trending { kind: ContentKind::Tv, window: TimeWindow::Day, page: 1 })
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(page.results[0].name, "Game of Thrones");
    }

    #[tokio::test]
    async fn test_search_filters_by_title() {
        let source = FixtureSource::new();
        let page: Page<Movie> = serde_json::from_value(
            source
                .get(&Endpoint::Search { kind: ContentKind::Movie, query: "lord of the".to_string(), page: 1 })
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(page.total_results, 2);
        assert!(page.results.iter().all(|m| m.title.contains("Lord of the Rings")));
    }

    #[tokio::test]
    async fn test_unknown_details_is_not_found() {
        let source = FixtureSource::new();
        let err = source
            .get(&Endpoint::Details { kind: ContentKind::Movie, id: 1 })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_season_and_episode() {
        let source = FixtureSource::new();
        let season: SeasonDetails = serde_json::from_value(
            source.get(&Endpoint::Season { tv_id: 1396, season: 2 }).await.unwrap(),
        )
        .unwrap();
        assert_eq!(season.episodes.len(), EPISODES_PER_SEASON as usize);
        assert!(season.episodes.iter().all(|e| e.season_number == 2));

        let episode: Episode = serde_json::from_value(
            source.get(&Endpoint::Episode { tv_id: 1396, season: 2, episode: 4 }).await.unwrap(),
        )
        .unwrap();
        assert_eq!(episode.name, "Episode 4");

        assert!(source.get(&Endpoint::Season { tv_id: 1396, season: 9 }).await.is_err());
    }

    #[tokio::test]
    async fn test_details_carry_genre_names() {
        let source = FixtureSource::new();
        let details: MovieDetails = serde_json::from_value(
            source.get(&Endpoint::Details { kind: ContentKind::Movie, id: 603 }).await.unwrap(),
        )
        .unwrap();
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "Science Fiction"]);
    }
}
