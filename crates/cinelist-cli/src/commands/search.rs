use crate::output::Output;
use crate::render;
use cinelist_core::{AppState, LoadOutcome, SearchFeed, SearchSnapshot};
use cinelist_models::ContentKind;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

pub async fn run_search(state: &AppState, kind: ContentKind, query: &str, pages: u32, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        output.info("Nothing to search for; give a title, e.g. `cinelist search movie the matrix`");
        return Ok(());
    }

    let spinner = output.spinner(format!("Searching {} for \"{}\"...", kind, query));
    match kind {
        ContentKind::Movie => {
            let result = collect(&state.movie_search, query, pages).await;
            spinner.finish();
            let snapshot = result?;
            if !snapshot.results.is_empty() {
                output.human(render::movie_table(&snapshot.results, 0).to_string());
            }
            summarize(kind, &snapshot, output);
        }
        ContentKind::Tv => {
            let result = collect(&state.tv_search, query, pages).await;
            spinner.finish();
            let snapshot = result?;
            if !snapshot.results.is_empty() {
                output.human(render::tv_table(&snapshot.results, 0).to_string());
            }
            summarize(kind, &snapshot, output);
        }
    }
    Ok(())
}

/// First page of `query`, then further pages until `pages` are loaded or results run out
async fn collect<T: Clone + Send + 'static>(feed: &SearchFeed<T>, query: &str, pages: u32) -> Result<SearchSnapshot<T>> {
    let outcome = feed.search(query, 1).await;
    fail_on(outcome, feed).await?;

    let mut loaded = 1;
    while loaded < pages && feed.has_more().await {
        let outcome = feed.load_more().await;
        if outcome == LoadOutcome::Skipped {
            break;
        }
        fail_on(outcome, feed).await?;
        loaded += 1;
    }
    Ok(feed.snapshot().await)
}

async fn fail_on<T: Clone + Send + 'static>(outcome: LoadOutcome, feed: &SearchFeed<T>) -> Result<()> {
    if outcome != LoadOutcome::Failed {
        return Ok(());
    }
    let reason = feed
        .snapshot()
        .await
        .error
        .unwrap_or_else(|| "Search failed".to_string());
    Err(color_eyre::eyre::eyre!("{}", reason))
}

fn summarize<T: Serialize>(kind: ContentKind, snapshot: &SearchSnapshot<T>, output: &Output) {
    if snapshot.results.is_empty() {
        output.info(format!("No {} results for \"{}\"", kind, snapshot.query));
    } else {
        output.human(
            format!(
                "Showing {} of {} results (page {} of {})",
                snapshot.results.len(),
                snapshot.total_results,
                snapshot.page,
                snapshot.total_pages
            )
            .bright_black()
            .to_string(),
        );
    }

    output.data(&json!({
        "kind": kind,
        "query": snapshot.query,
        "results": snapshot.results,
        "page": snapshot.page,
        "total_pages": snapshot.total_pages,
        "total_results": snapshot.total_results,
    }));
}
