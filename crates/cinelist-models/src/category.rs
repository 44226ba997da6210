use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which half of the catalog a record or endpoint belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Tv,
}

impl ContentKind {
    /// Path segment TMDB uses for this kind (`movie` / `tv`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Tv => "tv",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(ContentKind::Movie),
            "tv" | "show" | "shows" | "series" => Ok(ContentKind::Tv),
            _ => Err(format!("Invalid content kind: {}. Use 'movie' or 'tv'", s)),
        }
    }
}

/// Trending time window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(format!("Invalid time window: {}. Use 'day' or 'week'", s)),
        }
    }
}

/// Paginated movie catalogs (trending is handled separately)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieCategory {
    pub const ALL: [MovieCategory; 4] = [
        MovieCategory::Popular,
        MovieCategory::TopRated,
        MovieCategory::NowPlaying,
        MovieCategory::Upcoming,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::NowPlaying => "now_playing",
            MovieCategory::Upcoming => "upcoming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovieCategory::Popular => "Popular",
            MovieCategory::TopRated => "Top Rated",
            MovieCategory::NowPlaying => "Now Playing",
            MovieCategory::Upcoming => "Upcoming",
        }
    }
}

/// Paginated TV catalogs (trending is handled separately)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TvCategory {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

impl TvCategory {
    pub const ALL: [TvCategory; 4] = [
        TvCategory::Popular,
        TvCategory::TopRated,
        TvCategory::OnTheAir,
        TvCategory::AiringToday,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            TvCategory::Popular => "popular",
            TvCategory::TopRated => "top_rated",
            TvCategory::OnTheAir => "on_the_air",
            TvCategory::AiringToday => "airing_today",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TvCategory::Popular => "Popular",
            TvCategory::TopRated => "Top Rated",
            TvCategory::OnTheAir => "On The Air",
            TvCategory::AiringToday => "Airing Today",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_parsing() {
        assert_eq!("movie".parse::<ContentKind>().unwrap(), ContentKind::Movie);
        assert_eq!("TV".parse::<ContentKind>().unwrap(), ContentKind::Tv);
        assert_eq!("series".parse::<ContentKind>().unwrap(), ContentKind::Tv);
        assert!("book".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_time_window_defaults_to_week() {
        assert_eq!(TimeWindow::default(), TimeWindow::Week);
        assert_eq!(TimeWindow::Day.to_string(), "day");
        assert_eq!("WEEK".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
    }
}
