use super::prompts;
use crate::output::Output;
use crate::render;
use crate::{KindArg, ListCommands};
use cinelist_core::AppState;
use cinelist_models::{ListKind, Movie, TvSeries};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_list(state: &AppState, list: ListKind, cmd: ListCommands, output: &Output) -> Result<()> {
    match cmd {
        ListCommands::List { kind } => show(state, list, kind, output).await,
        ListCommands::Add { kind, id } => add(state, list, kind, id, output).await,
        ListCommands::Remove { kind, id } => remove(state, list, kind, id, output).await,
        ListCommands::Toggle { kind, id } => toggle(state, list, kind, id, output).await,
        ListCommands::Check { kind, id } => check(state, list, kind, id, output).await,
        ListCommands::Count { kind } => count(state, list, kind, output).await,
        ListCommands::Clear { kind, yes } => clear(state, list, kind, yes, output).await,
    }
}

fn kinds(kind: Option<KindArg>) -> Vec<KindArg> {
    match kind {
        Some(kind) => vec![kind],
        None => vec![KindArg::Movie, KindArg::Tv],
    }
}

fn noun(kind: KindArg) -> &'static str {
    match kind {
        KindArg::Movie => "Movie",
        KindArg::Tv => "Series",
    }
}

async fn fetch_movie(state: &AppState, id: u64) -> Result<Movie> {
    let details = state
        .api
        .movie_details(id)
        .await
        .wrap_err_with(|| format!("Failed to look up movie {}", id))?;
    Ok(details.into())
}

async fn fetch_series(state: &AppState, id: u64) -> Result<TvSeries> {
    let details = state
        .api
        .tv_details(id)
        .await
        .wrap_err_with(|| format!("Failed to look up series {}", id))?;
    Ok(details.into())
}

async fn show(state: &AppState, list: ListKind, kind: Option<KindArg>, output: &Output) -> Result<()> {
    let mut payload = serde_json::Map::new();

    for kind in kinds(kind) {
        match kind {
            KindArg::Movie => {
                let entries = state.lists.movies(list).list_all().await?;
                output.human(format!("\n{} ({})", format!("Movie {}", list).bright_cyan().bold(), entries.len()));
                if entries.is_empty() {
                    output.human("Empty".bright_black().to_string());
                } else {
                    output.human(render::movie_entries_table(&entries).to_string());
                }
                payload.insert("movies".to_string(), json!(entries));
            }
            KindArg::Tv => {
                let entries = state.lists.tv(list).list_all().await?;
                output.human(format!("\n{} ({})", format!("TV {}", list).bright_cyan().bold(), entries.len()));
                if entries.is_empty() {
                    output.human("Empty".bright_black().to_string());
                } else {
                    output.human(render::tv_entries_table(&entries).to_string());
                }
                payload.insert("tv".to_string(), json!(entries));
            }
        }
    }

    payload.insert("list".to_string(), json!(list));
    output.data(&serde_json::Value::Object(payload));
    Ok(())
}

async fn add(state: &AppState, list: ListKind, kind: KindArg, id: u64, output: &Output) -> Result<()> {
    let title = match kind {
        KindArg::Movie => {
            let movie = fetch_movie(state, id).await?;
            let title = movie.title.clone();
            state.lists.movies(list).add(movie).await?;
            title
        }
        KindArg::Tv => {
            let series = fetch_series(state, id).await?;
            let title = series.name.clone();
            state.lists.tv(list).add(series).await?;
            title
        }
    };

    output.success(format!("Added {} ({}) to {}", title, id, list));
    output.data(&json!({ "list": list, "id": id, "title": title, "in_list": true }));
    Ok(())
}

async fn remove(state: &AppState, list: ListKind, kind: KindArg, id: u64, output: &Output) -> Result<()> {
    let removed = match kind {
        KindArg::Movie => state.lists.movies(list).remove(id).await?,
        KindArg::Tv => state.lists.tv(list).remove(id).await?,
    };

    if removed {
        output.success(format!("Removed {} {} from {}", noun(kind).to_lowercase(), id, list));
    } else {
        output.info(format!("{} {} is not in {}", noun(kind), id, list));
    }
    output.data(&json!({ "list": list, "id": id, "removed": removed, "in_list": false }));
    Ok(())
}

/// Stored entries are toggled off without a lookup; new ones are fetched first
async fn toggle(state: &AppState, list: ListKind, kind: KindArg, id: u64, output: &Output) -> Result<()> {
    let (now_present, title) = match kind {
        KindArg::Movie => {
            let service = state.lists.movies(list);
            let movie = match service.get(id).await? {
                Some(entry) => entry.record,
                None => fetch_movie(state, id).await?,
            };
            let title = movie.title.clone();
            (service.toggle(movie).await?, title)
        }
        KindArg::Tv => {
            let service = state.lists.tv(list);
            let series = match service.get(id).await? {
                Some(entry) => entry.record,
                None => fetch_series(state, id).await?,
            };
            let title = series.name.clone();
            (service.toggle(series).await?, title)
        }
    };

    if now_present {
        output.success(format!("Added {} ({}) to {}", title, id, list));
    } else {
        output.success(format!("Removed {} ({}) from {}", title, id, list));
    }
    output.data(&json!({ "list": list, "id": id, "title": title, "in_list": now_present }));
    Ok(())
}

async fn check(state: &AppState, list: ListKind, kind: KindArg, id: u64, output: &Output) -> Result<()> {
    let present = match kind {
        KindArg::Movie => state.lists.movies(list).contains(id).await?,
        KindArg::Tv => state.lists.tv(list).contains(id).await?,
    };

    if present {
        output.human(format!("{} {} is in {}", noun(kind), id, list));
    } else {
        output.human(format!("{} {} is not in {}", noun(kind), id, list));
    }
    output.data(&json!({ "list": list, "id": id, "in_list": present }));
    Ok(())
}

async fn count(state: &AppState, list: ListKind, kind: Option<KindArg>, output: &Output) -> Result<()> {
    let mut payload = serde_json::Map::new();
    for kind in kinds(kind) {
        let (label, n) = match kind {
            KindArg::Movie => ("movies", state.lists.movies(list).count().await?),
            KindArg::Tv => ("tv", state.lists.tv(list).count().await?),
        };
        output.human(format!("{} {}: {}", label, list, n));
        payload.insert(label.to_string(), json!(n));
    }
    output.data(&serde_json::Value::Object(payload));
    Ok(())
}

async fn clear(state: &AppState, list: ListKind, kind: Option<KindArg>, yes: bool, output: &Output) -> Result<()> {
    let targets = kinds(kind);
    let what = match kind {
        Some(kind) => format!("{} {}", noun(kind).to_lowercase(), list),
        None => format!("movie and TV {}", list),
    };

    if !prompts::confirm_destructive(&format!("Remove every entry from {}?", what), yes, output)? {
        output.info("Nothing cleared");
        return Ok(());
    }

    for kind in targets {
        match kind {
            KindArg::Movie => state.lists.movies(list).clear_all().await?,
            KindArg::Tv => state.lists.tv(list).clear_all().await?,
        }
    }
    output.success(format!("Cleared {}", what));
    output.data(&json!({ "list": list, "cleared": what }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputFormat};
    use cinelist_core::Storage;
    use cinelist_sources::{FixtureSource, TmdbApi};
    use std::sync::Arc;

    fn fixture_state() -> AppState {
        AppState::new(TmdbApi::new(Arc::new(FixtureSource::new())), Storage::in_memory())
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Json, true)
    }

    #[tokio::test]
    async fn test_add_stores_base_record() {
        let state = fixture_state();
        let cmd = ListCommands::Add { kind: KindArg::Movie, id: 603 };
        run_list(&state, ListKind::Favorites, cmd, &quiet()).await.unwrap();

        let entry = state.lists.movies(ListKind::Favorites).get(603).await.unwrap().unwrap();
        assert_eq!(entry.record.title, "The Matrix");
        assert!(!state.lists.movies(ListKind::Watchlist).contains(603).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_twice_leaves_list_empty() {
        let state = fixture_state();
        for _ in 0..2 {
            let cmd = ListCommands::Toggle { kind: KindArg::Tv, id: 1399 };
            run_list(&state, ListKind::Watchlist, cmd, &quiet()).await.unwrap();
        }
        assert_eq!(state.lists.tv(ListKind::Watchlist).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_unknown_id_fails_without_storing() {
        let state = fixture_state();
        let cmd = ListCommands::Add { kind: KindArg::Movie, id: 999_999 };
        assert!(run_list(&state, ListKind::Favorites, cmd, &quiet()).await.is_err());
        assert_eq!(state.lists.movies(ListKind::Favorites).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_one_kind() {
        let state = fixture_state();
        let cmd = ListCommands::Add { kind: KindArg::Movie, id: 603 };
        run_list(&state, ListKind::Favorites, cmd, &quiet()).await.unwrap();
        let cmd = ListCommands::Add { kind: KindArg::Tv, id: 1399 };
        run_list(&state, ListKind::Favorites, cmd, &quiet()).await.unwrap();

        let cmd = ListCommands::Clear { kind: Some(KindArg::Movie), yes: true };
        run_list(&state, ListKind::Favorites, cmd, &quiet()).await.unwrap();
        assert_eq!(state.lists.movies(ListKind::Favorites).count().await.unwrap(), 0);
        assert_eq!(state.lists.tv(ListKind::Favorites).count().await.unwrap(), 1);
    }
}
