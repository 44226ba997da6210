use crate::details::DetailSlot;
use crate::error::SetupError;
use crate::feed::{Feed, LoadOutcome, TrendingFeed};
use crate::lists::Lists;
use crate::search::SearchFeed;
use crate::storage::{JsonFileStore, Storage};
use cinelist_config::{Config, PathManager};
use cinelist_models::{
    Credits, Episode, Movie, MovieCategory, MovieDetails, Page, Review, SeasonDetails, TimeWindow, TvCategory,
    TvSeries, TvSeriesDetails, Videos,
};
use cinelist_sources::{build_source, TmdbApi};
use std::sync::Arc;
use tracing::info;

fn movie_feed(api: &TmdbApi, category: MovieCategory) -> Feed<Movie> {
    let api = api.clone();
    Feed::from_fn(format!("movies/{}", category.path_segment()), move |page| {
        let api = api.clone();
        async move { api.movie_list(category, page).await }
    })
}

fn tv_feed(api: &TmdbApi, category: TvCategory) -> Feed<TvSeries> {
    let api = api.clone();
    Feed::from_fn(format!("tv/{}", category.path_segment()), move |page| {
        let api = api.clone();
        async move { api.tv_list(category, page).await }
    })
}

pub struct MovieCatalog {
    api: TmdbApi,
    pub trending: TrendingFeed<Movie>,
    pub popular: Feed<Movie>,
    pub top_rated: Feed<Movie>,
    pub now_playing: Feed<Movie>,
    pub upcoming: Feed<Movie>,
    pub details: DetailSlot<MovieDetails>,
    pub credits: DetailSlot<Credits>,
    pub videos: DetailSlot<Videos>,
    pub reviews: DetailSlot<Page<Review>>,
    pub similar: DetailSlot<Page<Movie>>,
    pub recommendations: DetailSlot<Page<Movie>>,
}

impl MovieCatalog {
    pub fn new(api: TmdbApi) -> Self {
        let trending = {
            let api = api.clone();
            TrendingFeed::from_fn("movies/trending", move |window| {
                let api = api.clone();
                async move { api.trending_movies(window, 1).await }
            })
        };

        Self {
            trending,
            popular: movie_feed(&api, MovieCategory::Popular),
            top_rated: movie_feed(&api, MovieCategory::TopRated),
            now_playing: movie_feed(&api, MovieCategory::NowPlaying),
            upcoming: movie_feed(&api, MovieCategory::Upcoming),
            details: DetailSlot::new("movie details"),
            credits: DetailSlot::new("movie credits"),
            videos: DetailSlot::new("movie videos"),
            reviews: DetailSlot::new("movie reviews"),
            similar: DetailSlot::new("similar movies"),
            recommendations: DetailSlot::new("movie recommendations"),
            api,
        }
    }

    pub fn feed(&self, category: MovieCategory) -> &Feed<Movie> {
        match category {
            MovieCategory::Popular => &self.popular,
            MovieCategory::TopRated => &self.top_rated,
            MovieCategory::NowPlaying => &self.now_playing,
            MovieCategory::Upcoming => &self.upcoming,
        }
    }

    pub async fn load_details(&self, id: u64) -> LoadOutcome {
        self.details.load(self.api.movie_details(id)).await
    }

    pub async fn load_credits(&self, id: u64) -> LoadOutcome {
        self.credits.load(self.api.movie_credits(id)).await
    }

    pub async fn load_videos(&self, id: u64) -> LoadOutcome {
        self.videos.load(self.api.movie_videos(id)).await
    }

    pub async fn load_reviews(&self, id: u64, page: u32) -> LoadOutcome {
        self.reviews.load(self.api.movie_reviews(id, page)).await
    }

    pub async fn load_similar(&self, id: u64, page: u32) -> LoadOutcome {
        self.similar.load(self.api.similar_movies(id, page)).await
    }

    pub async fn load_recommendations(&self, id: u64, page: u32) -> LoadOutcome {
        self.recommendations.load(self.api.movie_recommendations(id, page)).await
    }
}

pub struct TvCatalog {
    api: TmdbApi,
    pub trending: TrendingFeed<TvSeries>,
    pub popular: Feed<TvSeries>,
    pub top_rated: Feed<TvSeries>,
    pub on_the_air: Feed<TvSeries>,
    pub airing_today: Feed<TvSeries>,
    pub details: DetailSlot<TvSeriesDetails>,
    pub credits: DetailSlot<Credits>,
    pub videos: DetailSlot<Videos>,
    pub similar: DetailSlot<Page<TvSeries>>,
    pub recommendations: DetailSlot<Page<TvSeries>>,
    pub season: DetailSlot<SeasonDetails>,
    pub episode: DetailSlot<Episode>,
}

impl TvCatalog {
    pub fn new(api: TmdbApi) -> Self {
        let trending = {
            let api = api.clone();
            TrendingFeed::from_fn("tv/trending", move |window| {
                let api = api.clone();
                async move { api.trending_tv(window, 1).await }
            })
        };

        Self {
            trending,
            popular: tv_feed(&api, TvCategory::Popular),
            top_rated: tv_feed(&api, TvCategory::TopRated),
            on_the_air: tv_feed(&api, TvCategory::OnTheAir),
            airing_today: tv_feed(&api, TvCategory::AiringToday),
            details: DetailSlot::new("tv details"),
            credits: DetailSlot::new("tv credits"),
            videos: DetailSlot::new("tv videos"),
            similar: DetailSlot::new("similar tv"),
            recommendations: DetailSlot::new("tv recommendations"),
            season: DetailSlot::new("tv season"),
            episode: DetailSlot::new("tv episode"),
            api,
        }
    }

    pub fn feed(&self, category: TvCategory) -> &Feed<TvSeries> {
        match category {
            TvCategory::Popular => &self.popular,
            TvCategory::TopRated => &self.top_rated,
            TvCategory::OnTheAir => &self.on_the_air,
            TvCategory::AiringToday => &self.airing_today,
        }
    }

    pub async fn load_details(&self, id: u64) -> LoadOutcome {
        self.details.load(self.api.tv_details(id)).await
    }

    pub async fn load_credits(&self, id: u64) -> LoadOutcome {
        self.credits.load(self.api.tv_credits(id)).await
    }

    pub async fn load_videos(&self, id: u64) -> LoadOutcome {
        self.videos.load(self.api.tv_videos(id)).await
    }

    pub async fn load_similar(&self, id: u64, page: u32) -> LoadOutcome {
        self.similar.load(self.api.similar_tv(id, page)).await
    }

    pub async fn load_recommendations(&self, id: u64, page: u32) -> LoadOutcome {
        self.recommendations.load(self.api.tv_recommendations(id, page)).await
    }

    pub async fn load_season(&self, id: u64, season: u32) -> LoadOutcome {
        self.season.load(self.api.tv_season(id, season)).await
    }

    pub async fn load_episode(&self, id: u64, season: u32, episode: u32) -> LoadOutcome {
        self.episode.load(self.api.tv_episode(id, season, episode)).await
    }
}

/// Outcome of every initial catalog fetch issued by [`AppState::load_home`]
#[derive(Debug, Clone, PartialEq)]
pub struct HomeReport {
    pub movie_trending: LoadOutcome,
    pub movies: Vec<(MovieCategory, LoadOutcome)>,
    pub tv_trending: LoadOutcome,
    pub tv: Vec<(TvCategory, LoadOutcome)>,
}

impl HomeReport {
    pub fn failures(&self) -> usize {
        let feeds = self
            .movies
            .iter()
            .map(|(_, o)| o)
            .chain(self.tv.iter().map(|(_, o)| o))
            .chain([&self.movie_trending, &self.tv_trending]);
        feeds.filter(|o| **o == LoadOutcome::Failed).count()
    }
}

/// Everything the front end reads and drives, built once and passed around
pub struct AppState {
    pub api: TmdbApi,
    pub movies: MovieCatalog,
    pub tv: TvCatalog,
    pub movie_search: SearchFeed<Movie>,
    pub tv_search: SearchFeed<TvSeries>,
    pub lists: Lists,
}

impl AppState {
    pub fn new(api: TmdbApi, storage: Storage) -> Self {
        let movie_search = {
            let api = api.clone();
            SearchFeed::from_fn("search/movie", move |query, page| {
                let api = api.clone();
                async move { api.search_movies(&query, page).await }
            })
        };
        let tv_search = {
            let api = api.clone();
            SearchFeed::from_fn("search/tv", move |query, page| {
                let api = api.clone();
                async move { api.search_tv(&query, page).await }
            })
        };

        Self {
            movies: MovieCatalog::new(api.clone()),
            tv: TvCatalog::new(api.clone()),
            movie_search,
            tv_search,
            lists: Lists::new(storage),
            api,
        }
    }

    /// Data source from the configuration, lists in the configured storage directory
    pub fn from_config(config: &Config, paths: &PathManager) -> Result<Self, SetupError> {
        let source = build_source(config)?;
        let storage_dir = config.storage_dir(paths.storage_dir());
        let store = JsonFileStore::new(&storage_dir)?;
        info!(
            "Catalog from {}, lists in {}",
            source.source_name(),
            storage_dir.display()
        );
        Ok(Self::new(TmdbApi::new(source), Storage::new(Arc::new(store))))
    }

    /// Issue every initial catalog fetch at once and wait for all of them to settle
    pub async fn load_home(&self) -> HomeReport {
        let window = TimeWindow::Week;
        let movie_feeds = async {
            futures::join!(
                self.movies.trending.fetch(window),
                self.movies.popular.refresh(),
                self.movies.top_rated.refresh(),
                self.movies.now_playing.refresh(),
                self.movies.upcoming.refresh(),
            )
        };
        let tv_feeds = async {
            futures::join!(
                self.tv.trending.fetch(window),
                self.tv.popular.refresh(),
                self.tv.top_rated.refresh(),
                self.tv.on_the_air.refresh(),
                self.tv.airing_today.refresh(),
            )
        };
        let (
            (movie_trending, popular, top_rated, now_playing, upcoming),
            (tv_trending, tv_popular, tv_top_rated, on_the_air, airing_today),
        ) = futures::join!(movie_feeds, tv_feeds);

        HomeReport {
            movie_trending,
            movies: vec![
                (MovieCategory::Popular, popular),
                (MovieCategory::TopRated, top_rated),
                (MovieCategory::NowPlaying, now_playing),
                (MovieCategory::Upcoming, upcoming),
            ],
            tv_trending,
            tv: vec![
                (TvCategory::Popular, tv_popular),
                (TvCategory::TopRated, tv_top_rated),
                (TvCategory::OnTheAir, on_the_air),
                (TvCategory::AiringToday, airing_today),
            ],
        }
    }
}
