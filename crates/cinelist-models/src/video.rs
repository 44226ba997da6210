use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub size: u32,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
    #[serde(default)]
    pub iso_639_1: String,
    #[serde(default)]
    pub iso_3166_1: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube") && self.video_type.eq_ignore_ascii_case("trailer")
    }

    /// Watch URL for the hosting site, if it is one we know
    pub fn watch_url(&self) -> Option<String> {
        match self.site.to_lowercase().as_str() {
            "youtube" => Some(format!("https://www.youtube.com/watch?v={}", self.key)),
            "vimeo" => Some(format!("https://vimeo.com/{}", self.key)),
            _ => None,
        }
    }
}

/// Response of `/{kind}/{id}/videos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Videos {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub results: Vec<Video>,
}

impl Videos {
    /// Preferred trailer: official YouTube trailer first, then any YouTube trailer.
    /// No trailer is an ordinary empty result.
    pub fn trailer(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|v| v.is_youtube_trailer() && v.official)
            .or_else(|| self.results.iter().find(|v| v.is_youtube_trailer()))
    }
}
