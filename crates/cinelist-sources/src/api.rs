use crate::endpoint::Endpoint;
use crate::error::SourceError;
use crate::traits::DataSource;
use cinelist_models::{
    ContentKind, Credits, Episode, Genre, GenreList, Movie, MovieCategory, MovieDetails, Page, Review,
    SeasonDetails, TimeWindow, TvCategory, TvSeries, TvSeriesDetails, Videos,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Typed TMDB operations over whichever [`DataSource`] is configured
#[derive(Clone)]
pub struct TmdbApi {
    source: Arc<dyn DataSource>,
}

impl TmdbApi {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, SourceError> {
        let value = self.source.get(&endpoint).await?;
        serde_json::from_value(value).map_err(|source| SourceError::Decode {
            endpoint: endpoint.path(),
            source,
        })
    }

    // Movies

    pub async fn trending_movies(&self, window: TimeWindow, page: u32) -> Result<Page<Movie>, SourceError> {
        self.fetch(Endpoint::Trending { kind: ContentKind::Movie, window, page }).await
    }

    pub async fn movie_list(&self, category: MovieCategory, page: u32) -> Result<Page<Movie>, SourceError> {
        self.fetch(Endpoint::MovieList { category, page }).await
    }

    pub async fn popular_movies(&self, page: u32) -> Result<Page<Movie>, SourceError> {
        self.movie_list(MovieCategory::Popular, page).await
    }

    pub async fn top_rated_movies(&self, page: u32) -> Result<Page<Movie>, SourceError> {
        self.movie_list(MovieCategory::TopRated, page).await
    }

    pub async fn now_playing_movies(&self, page: u32) -> Result<Page<Movie>, SourceError> {
        self.movie_list(MovieCategory::NowPlaying, page).await
    }

    pub async fn upcoming_movies(&self, page: u32) -> Result<Page<Movie>, SourceError> {
        self.movie_list(MovieCategory::Upcoming, page).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Movie>, SourceError> {
        self.fetch(Endpoint::Search { kind: ContentKind::Movie, query: query.to_string(), page })
            .await
    }

    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, SourceError> {
        self.fetch(Endpoint::Details { kind: ContentKind::Movie, id }).await
    }

    pub async fn movie_credits(&self, id: u64) -> Result<Credits, SourceError> {
        self.fetch(Endpoint::Credits { kind: ContentKind::Movie, id }).await
    }

    pub async fn movie_videos(&self, id: u64) -> Result<Videos, SourceError> {
        self.fetch(Endpoint::Videos { kind: ContentKind::Movie, id }).await
    }

    pub async fn movie_reviews(&self, id: u64, page: u32) -> Result<Page<Review>, SourceError> {
        self.fetch(Endpoint::Reviews { kind: ContentKind::Movie, id, page }).await
    }

    pub async fn similar_movies(&self, id: u64, page: u32) -> Result<Page<Movie>, SourceError> {
        self.fetch(Endpoint::Similar { kind: ContentKind::Movie, id, page }).await
    }

    pub async fn movie_recommendations(&self, id: u64, page: u32) -> Result<Page<Movie>, SourceError> {
        self.fetch(Endpoint::Recommendations { kind: ContentKind::Movie, id, page }).await
    }

    pub async fn movie_genres(&self) -> Result<Vec<Genre>, SourceError> {
        let list: GenreList = self.fetch(Endpoint::Genres { kind: ContentKind::Movie }).await?;
        Ok(list.genres)
    }

    // TV

    pub async fn trending_tv(&self, window: TimeWindow, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.fetch(Endpoint::Trending { kind: ContentKind::Tv, window, page }).await
    }

    pub async fn tv_list(&self, category: TvCategory, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.fetch(Endpoint::TvList { category, page }).await
    }

    pub async fn popular_tv(&self, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.tv_list(TvCategory::Popular, page).await
    }

    pub async fn top_rated_tv(&self, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.tv_list(TvCategory::TopRated, page).await
    }

    pub async fn on_the_air_tv(&self, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.tv_list(TvCategory::OnTheAir, page).await
    }

    pub async fn airing_today_tv(&self, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.tv_list(TvCategory::AiringToday, page).await
    }

    pub async fn search_tv(&self, query: &str, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.fetch(Endpoint::Search { kind: ContentKind::Tv, query: query.to_string(), page })
            .await
    }

    pub async fn tv_details(&self, id: u64) -> Result<TvSeriesDetails, SourceError> {
        self.fetch(Endpoint::Details { kind: ContentKind::Tv, id }).await
    }

    pub async fn tv_credits(&self, id: u64) -> Result<Credits, SourceError> {
        self.fetch(Endpoint::Credits { kind: ContentKind::Tv, id }).await
    }

    pub async fn tv_videos(&self, id: u64) -> Result<Videos, SourceError> {
        self.fetch(Endpoint::Videos { kind: ContentKind::Tv, id }).await
    }

    pub async fn tv_reviews(&self, id: u64, page: u32) -> Result<Page<Review>, SourceError> {
        self.fetch(Endpoint::Reviews { kind: ContentKind::Tv, id, page }).await
    }

    pub async fn similar_tv(&self, id: u64, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.fetch(Endpoint::Similar { kind: ContentKind::Tv, id, page }).await
    }

    pub async fn tv_recommendations(&self, id: u64, page: u32) -> Result<Page<TvSeries>, SourceError> {
        self.fetch(Endpoint::Recommendations { kind: ContentKind::Tv, id, page }).await
    }

    pub async fn tv_season(&self, tv_id: u64, season: u32) -> Result<SeasonDetails, SourceError> {
        self.fetch(Endpoint::Season { tv_id, season }).await
    }

    pub async fn tv_episode(&self, tv_id: u64, season: u32, episode: u32) -> Result<Episode, SourceError> {
        self.fetch(Endpoint::Episode { tv_id, season, episode }).await
    }

    pub async fn tv_genres(&self) -> Result<Vec<Genre>, SourceError> {
        let list: GenreList = self.fetch(Endpoint::Genres { kind: ContentKind::Tv }).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureSource;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records requested paths and answers every request with the same body
    struct Recording {
        paths: Mutex<Vec<String>>,
        body: Value,
    }

    #[async_trait]
    impl DataSource for Recording {
        fn source_name(&self) -> &str {
            "recording"
        }

        async fn get(&self, endpoint: &Endpoint) -> Result<Value, SourceError> {
            self.paths.lock().unwrap().push(endpoint.path());
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn test_wrappers_hit_expected_paths() {
        let source = Arc::new(Recording {
            paths: Mutex::new(Vec::new()),
            body: json!({"page": 1, "results": [], "total_pages": 0, "total_results": 0}),
        });
        let api = TmdbApi::new(source.clone());

        api.trending_movies(TimeWindow::Week, 1).await.unwrap();
        api.upcoming_movies(3).await.unwrap();
        api.airing_today_tv(1).await.unwrap();
        api.search_tv("the wire", 2).await.unwrap();
        api.movie_recommendations(550, 1).await.unwrap();

        let paths = source.paths.lock().unwrap().clone();
        assert_eq!(
            paths,
            vec![
                "/trending/movie/week?page=1",
                "/movie/upcoming?page=3",
                "/tv/airing_today?page=1",
                "/search/tv?query=the%20wire&page=2",
                "/movie/550/recommendations?page=1",
            ]
        );
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let source = Arc::new(Recording {
            paths: Mutex::new(Vec::new()),
            body: json!({"results": "not a list"}),
        });
        let api = TmdbApi::new(source);

        let err = api.popular_movies(1).await.unwrap_err();
        match err {
            SourceError::Decode { endpoint, .. } => assert_eq!(endpoint, "/movie/popular?page=1"),
            other => panic!("expected decode error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_against_fixture() {
        let api = TmdbApi::new(Arc::new(FixtureSource::new()));
        assert_eq!(api.source_name(), "fixture");

        let details = api.tv_details(1399).await.unwrap();
        assert_eq!(details.series.name, "Game of Thrones");
        assert_eq!(details.seasons.len() as u32, details.number_of_seasons);

        let genres = api.tv_genres().await.unwrap();
        assert!(genres.iter().any(|g| g.name == "Sci-Fi & Fantasy"));

        let videos = api.movie_videos(550).await.unwrap();
        assert!(videos.trailer().is_none());
    }
}
