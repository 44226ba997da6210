use cinelist_models::{ContentKind, MovieCategory, TimeWindow, TvCategory};

/// Every TMDB resource the application reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Trending { kind: ContentKind, window: TimeWindow, page: u32 },
    MovieList { category: MovieCategory, page: u32 },
    TvList { category: TvCategory, page: u32 },
    Search { kind: ContentKind, query: String, page: u32 },
    Details { kind: ContentKind, id: u64 },
    Credits { kind: ContentKind, id: u64 },
    Videos { kind: ContentKind, id: u64 },
    Reviews { kind: ContentKind, id: u64, page: u32 },
    Similar { kind: ContentKind, id: u64, page: u32 },
    Recommendations { kind: ContentKind, id: u64, page: u32 },
    Season { tv_id: u64, season: u32 },
    Episode { tv_id: u64, season: u32, episode: u32 },
    Genres { kind: ContentKind },
}

impl Endpoint {
    /// Path relative to the API base, including its own query parameters.
    ///
    /// Pages are passed through untouched. Search queries are URL-encoded as given,
    /// an empty query included.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Trending { kind, window, page } => {
                format!("/trending/{}/{}?page={}", kind.path_segment(), window.as_str(), page)
            }
            Endpoint::MovieList { category, page } => {
                format!("/movie/{}?page={}", category.path_segment(), page)
            }
            Endpoint::TvList { category, page } => {
                format!("/tv/{}?page={}", category.path_segment(), page)
            }
            Endpoint::Search { kind, query, page } => format!(
                "/search/{}?query={}&page={}",
                kind.path_segment(),
                urlencoding::encode(query),
                page
            ),
            Endpoint::Details { kind, id } => format!("/{}/{}", kind.path_segment(), id),
            Endpoint::Credits { kind, id } => format!("/{}/{}/credits", kind.path_segment(), id),
            Endpoint::Videos { kind, id } => format!("/{}/{}/videos", kind.path_segment(), id),
            Endpoint::Reviews { kind, id, page } => {
                format!("/{}/{}/reviews?page={}", kind.path_segment(), id, page)
            }
            Endpoint::Similar { kind, id, page } => {
                format!("/{}/{}/similar?page={}", kind.path_segment(), id, page)
            }
            Endpoint::Recommendations { kind, id, page } => {
                format!("/{}/{}/recommendations?page={}", kind.path_segment(), id, page)
            }
            Endpoint::Season { tv_id, season } => format!("/tv/{}/season/{}", tv_id, season),
            Endpoint::Episode { tv_id, season, episode } => {
                format!("/tv/{}/season/{}/episode/{}", tv_id, season, episode)
            }
            Endpoint::Genres { kind } => format!("/genre/{}/list", kind.path_segment()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths() {
        assert_eq!(
            Endpoint::MovieList { category: MovieCategory::Popular, page: 2 }.path(),
            "/movie/popular?page=2"
        );
        assert_eq!(
            Endpoint::TvList { category: TvCategory::AiringToday, page: 1 }.path(),
            "/tv/airing_today?page=1"
        );
        assert_eq!(
            Endpoint::Trending { kind: ContentKind::Movie, window: TimeWindow::Day, page: 1 }.path(),
            "/trending/movie/day?page=1"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        let endpoint = Endpoint::Search {
            kind: ContentKind::Movie,
            query: "amélie & friends".to_string(),
            page: 1,
        };
        assert_eq!(endpoint.path(), "/search/movie?query=am%C3%A9lie%20%26%20friends&page=1");

        let empty = Endpoint::Search { kind: ContentKind::Tv, query: String::new(), page: 1 };
        assert_eq!(empty.path(), "/search/tv?query=&page=1");
    }

    #[test]
    fn test_detail_paths() {
        assert_eq!(Endpoint::Details { kind: ContentKind::Tv, id: 1399 }.path(), "/tv/1399");
        assert_eq!(
            Endpoint::Episode { tv_id: 1399, season: 1, episode: 3 }.path(),
            "/tv/1399/season/1/episode/3"
        );
        assert_eq!(
            Endpoint::Reviews { kind: ContentKind::Movie, id: 550, page: 0 }.path(),
            "/movie/550/reviews?page=0"
        );
    }
}
