use serde::{Deserialize, Serialize};

/// One page of a paginated TMDB response (lists, search, trending, reviews)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Empty first page with no further pages
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::empty();
        assert_eq!(page.total_pages, 0);
        assert!(page.results.is_empty());
        assert!(!page.has_more());
    }

    #[test]
    fn test_missing_fields_default() {
        let page: Page<u32> = serde_json::from_str(r#"{"results": [1, 2]}"#).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results, vec![1, 2]);
        assert!(!page.has_more());
    }
}
