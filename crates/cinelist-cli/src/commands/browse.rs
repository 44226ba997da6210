use crate::output::Output;
use crate::render;
use crate::{MovieListArg, TvListArg};
use cinelist_core::{AppState, Feed, FeedSnapshot, LoadOutcome};
use cinelist_models::TimeWindow;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

pub async fn run_movies(
    state: &AppState,
    category: MovieListArg,
    pages: u32,
    window: TimeWindow,
    output: &Output,
) -> Result<()> {
    let spinner = output.spinner("Loading movies...");
    let (title, snapshot) = match category.category() {
        Some(category) => {
            let feed = state.movies.feed(category);
            let loaded = accumulate(feed, pages).await;
            (format!("{} Movies", category.label()), loaded)
        }
        None => {
            let outcome = state.movies.trending.fetch(window).await;
            let snapshot = state.movies.trending.snapshot().await;
            (format!("Trending Movies ({})", window), settle(outcome, snapshot))
        }
    };
    spinner.finish();

    let snapshot = snapshot?;
    output.human(format!("\n{}", title.bright_cyan().bold()));
    output.human(render::movie_table(&snapshot.items, 0).to_string());
    print_page(&title, &snapshot, output);
    Ok(())
}

pub async fn run_tv(
    state: &AppState,
    category: TvListArg,
    pages: u32,
    window: TimeWindow,
    output: &Output,
) -> Result<()> {
    let spinner = output.spinner("Loading TV series...");
    let (title, snapshot) = match category.category() {
        Some(category) => {
            let feed = state.tv.feed(category);
            let loaded = accumulate(feed, pages).await;
            (format!("{} TV", category.label()), loaded)
        }
        None => {
            let outcome = state.tv.trending.fetch(window).await;
            let snapshot = state.tv.trending.snapshot().await;
            (format!("Trending TV ({})", window), settle(outcome, snapshot))
        }
    };
    spinner.finish();

    let snapshot = snapshot?;
    output.human(format!("\n{}", title.bright_cyan().bold()));
    output.human(render::tv_table(&snapshot.items, 0).to_string());
    print_page(&title, &snapshot, output);
    Ok(())
}

/// Refresh, then keep appending pages until `pages` are loaded or the catalog runs out
async fn accumulate<T: Clone + Send + 'static>(feed: &Feed<T>, pages: u32) -> Result<FeedSnapshot<T>> {
    let outcome = feed.refresh().await;
    let mut snapshot = settle(outcome, feed.snapshot().await)?;

    while snapshot.page < pages.max(1) && snapshot.has_more() {
        debug!("{}: loading page {}", feed.name(), snapshot.page + 1);
        let outcome = feed.load_more().await;
        if outcome == LoadOutcome::Skipped {
            break;
        }
        snapshot = settle(outcome, feed.snapshot().await)?;
    }
    Ok(snapshot)
}

fn settle<T>(outcome: LoadOutcome, snapshot: FeedSnapshot<T>) -> Result<FeedSnapshot<T>> {
    match outcome {
        LoadOutcome::Failed => Err(color_eyre::eyre::eyre!(
            "{}",
            snapshot.error.unwrap_or_else(|| "Request failed".to_string())
        )),
        _ => Ok(snapshot),
    }
}

fn print_page<T: Serialize>(title: &str, snapshot: &FeedSnapshot<T>, output: &Output) {
    if snapshot.total_pages > 0 {
        output.human(
            format!("Page {} of {}", snapshot.page, snapshot.total_pages)
                .bright_black()
                .to_string(),
        );
    }
    output.data(&json!({
        "catalog": title,
        "items": snapshot.items,
        "page": snapshot.page,
        "total_pages": snapshot.total_pages,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use cinelist_core::Storage;
    use cinelist_models::MovieCategory;
    use cinelist_sources::{FixtureSource, TmdbApi};
    use std::sync::Arc;

    fn fixture_state() -> AppState {
        AppState::new(TmdbApi::new(Arc::new(FixtureSource::new())), Storage::in_memory())
    }

    #[tokio::test]
    async fn test_accumulate_stops_at_last_page() {
        let state = fixture_state();
        let feed = state.movies.feed(MovieCategory::Popular);

        let snapshot = accumulate(feed, 1).await.unwrap();
        assert_eq!(snapshot.page, 1);

        let snapshot = accumulate(feed, 10).await.unwrap();
        assert_eq!(snapshot.page, snapshot.total_pages);
        assert!(!snapshot.has_more());
    }

    #[tokio::test]
    async fn test_run_trending_movies() {
        let state = fixture_state();
        let output = Output::new(OutputFormat::Json, true);
        run_movies(&state, MovieListArg::Trending, 1, TimeWindow::Day, &output)
            .await
            .unwrap();
        assert_eq!(state.movies.trending.window().await, TimeWindow::Day);
        assert!(!state.movies.trending.snapshot().await.items.is_empty());
    }
}
