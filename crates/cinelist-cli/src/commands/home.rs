use crate::output::Output;
use crate::render;
use cinelist_core::{AppState, FeedSnapshot, LoadOutcome};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub async fn run_home(state: &AppState, limit: usize, output: &Output) -> Result<()> {
    let spinner = output.spinner("Loading catalogs...");
    let report = state.load_home().await;
    spinner.finish();

    let mut movies = Map::new();
    let mut tv = Map::new();

    let trending = state.movies.trending.snapshot().await;
    section(output, "Trending Movies", report.movie_trending, &trending, limit, |items| {
        render::movie_table(items, 0).to_string()
    });
    movies.insert("trending".to_string(), feed_json(&trending, limit));

    for (category, outcome) in &report.movies {
        let snapshot = state.movies.feed(*category).snapshot().await;
        let title = format!("{} Movies", category.label());
        section(output, &title, *outcome, &snapshot, limit, |items| {
            render::movie_table(items, 0).to_string()
        });
        movies.insert(category.path_segment().to_string(), feed_json(&snapshot, limit));
    }

    let trending = state.tv.trending.snapshot().await;
    section(output, "Trending TV", report.tv_trending, &trending, limit, |items| {
        render::tv_table(items, 0).to_string()
    });
    tv.insert("trending".to_string(), feed_json(&trending, limit));

    for (category, outcome) in &report.tv {
        let snapshot = state.tv.feed(*category).snapshot().await;
        let title = format!("{} TV", category.label());
        section(output, &title, *outcome, &snapshot, limit, |items| {
            render::tv_table(items, 0).to_string()
        });
        tv.insert(category.path_segment().to_string(), feed_json(&snapshot, limit));
    }

    let failures = report.failures();
    if failures > 0 {
        output.warn(format!("{} catalog(s) failed to load", failures));
    }

    output.data(&json!({
        "movies": movies,
        "tv": tv,
        "failures": failures,
    }));
    Ok(())
}

fn section<T, F>(output: &Output, title: &str, outcome: LoadOutcome, snapshot: &FeedSnapshot<T>, limit: usize, table: F)
where
    F: Fn(&[T]) -> String,
{
    if !output.is_human() {
        return;
    }
    output.human(format!("\n{}", title.bright_cyan().bold()));
    match outcome {
        LoadOutcome::Failed => {
            let reason = snapshot.error.as_deref().unwrap_or("unknown error");
            output.warn(format!("{} failed: {}", title, reason));
        }
        _ if snapshot.items.is_empty() => output.human("Nothing here yet".bright_black().to_string()),
        _ => {
            let shown = snapshot.items.len().min(limit);
            output.human(table(&snapshot.items[..shown]));
        }
    }
}

fn feed_json<T: Serialize>(snapshot: &FeedSnapshot<T>, limit: usize) -> Value {
    let items: Vec<&T> = snapshot.items.iter().take(limit).collect();
    json!({
        "items": items,
        "page": snapshot.page,
        "total_pages": snapshot.total_pages,
        "error": snapshot.error,
    })
}
