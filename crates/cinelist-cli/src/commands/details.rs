use crate::output::Output;
use crate::render;
use crate::DetailsTarget;
use cinelist_core::{AppState, DetailSlot, LoadOutcome};
use cinelist_models::ListKind;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::{json, Map, Value};
use std::future::Future;

const CAST_LIMIT: usize = 10;
const REVIEW_LIMIT: usize = 3;

pub async fn run_details(state: &AppState, target: DetailsTarget, output: &Output) -> Result<()> {
    match target {
        DetailsTarget::Movie {
            id,
            credits,
            videos,
            reviews,
            similar,
            recommendations,
            all,
        } => {
            let extras = MovieExtras {
                credits: credits || all,
                videos: videos || all,
                reviews: reviews || all,
                similar: similar || all,
                recommendations: recommendations || all,
            };
            movie(state, id, extras, output).await
        }
        DetailsTarget::Tv {
            id,
            season,
            episode,
            credits,
            videos,
            similar,
            recommendations,
            all,
        } => {
            let extras = TvExtras {
                credits: credits || all,
                videos: videos || all,
                similar: similar || all,
                recommendations: recommendations || all,
            };
            tv(state, id, season, episode, extras, output).await
        }
    }
}

struct MovieExtras {
    credits: bool,
    videos: bool,
    reviews: bool,
    similar: bool,
    recommendations: bool,
}

struct TvExtras {
    credits: bool,
    videos: bool,
    similar: bool,
    recommendations: bool,
}

/// Run `request` only when the section was asked for
async fn maybe<F: Future<Output = LoadOutcome>>(enabled: bool, request: F) -> Option<LoadOutcome> {
    if enabled {
        Some(request.await)
    } else {
        None
    }
}

/// Value of an optional section, or a warning when its load failed
async fn section<T: Clone + Send>(
    slot: &DetailSlot<T>,
    outcome: Option<LoadOutcome>,
    label: &str,
    output: &Output,
) -> Option<T> {
    match outcome? {
        LoadOutcome::Failed => {
            let reason = slot.error().await.unwrap_or_default();
            output.warn(format!("Could not load {}: {}", label, reason));
            None
        }
        _ => slot.value().await,
    }
}

async fn required<T: Clone + Send>(slot: &DetailSlot<T>, outcome: LoadOutcome, what: &str) -> Result<T> {
    let error = match outcome {
        LoadOutcome::Failed => slot.error().await,
        _ => None,
    };
    match (error, slot.value().await) {
        (None, Some(value)) => Ok(value),
        (Some(reason), _) => Err(color_eyre::eyre::eyre!("Failed to load {}: {}", what, reason)),
        (None, None) => Err(color_eyre::eyre::eyre!("No {} available", what)),
    }
}

fn insert_json<T: serde::Serialize>(payload: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        payload.insert(key.to_string(), json!(value));
    }
}

async fn movie(state: &AppState, id: u64, extras: MovieExtras, output: &Output) -> Result<()> {
    let catalog = &state.movies;
    let spinner = output.spinner(format!("Loading movie {}...", id));

    let outcome = catalog.load_details(id).await;
    let details = match required(&catalog.details, outcome, &format!("movie {}", id)).await {
        Ok(details) => details,
        Err(e) => {
            spinner.finish();
            return Err(e);
        }
    };

    let (credits, videos, reviews, similar, recommendations) = tokio::join!(
        maybe(extras.credits, catalog.load_credits(id)),
        maybe(extras.videos, catalog.load_videos(id)),
        maybe(extras.reviews, catalog.load_reviews(id, 1)),
        maybe(extras.similar, catalog.load_similar(id, 1)),
        maybe(extras.recommendations, catalog.load_recommendations(id, 1)),
    );
    spinner.finish();

    let credits = section(&catalog.credits, credits, "credits", output).await;
    let videos = section(&catalog.videos, videos, "videos", output).await;
    let reviews = section(&catalog.reviews, reviews, "reviews", output).await;
    let similar = section(&catalog.similar, similar, "similar movies", output).await;
    let recommendations = section(&catalog.recommendations, recommendations, "recommendations", output).await;

    let favorite = state.lists.movies(ListKind::Favorites).contains(id).await?;
    let watchlisted = state.lists.movies(ListKind::Watchlist).contains(id).await?;

    output.human(render::movie_details(&details));
    output.human(membership(favorite, watchlisted));
    if let Some(ref credits) = credits {
        output.human(render::credits(credits, CAST_LIMIT));
    }
    if let Some(ref videos) = videos {
        output.human(render::videos(videos));
    }
    if let Some(ref reviews) = reviews {
        output.human(render::reviews(&reviews.results, REVIEW_LIMIT));
    }
    if let Some(ref similar) = similar {
        output.human(format!("\n{}", "Similar".bold()));
        output.human(render::movie_table(&similar.results, 0).to_string());
    }
    if let Some(ref recommendations) = recommendations {
        output.human(format!("\n{}", "Recommended".bold()));
        output.human(render::movie_table(&recommendations.results, 0).to_string());
    }

    let mut payload = Map::new();
    payload.insert("details".to_string(), json!(details));
    payload.insert("favorite".to_string(), json!(favorite));
    payload.insert("watchlist".to_string(), json!(watchlisted));
    insert_json(&mut payload, "credits", &credits);
    insert_json(&mut payload, "videos", &videos);
    insert_json(&mut payload, "reviews", &reviews);
    insert_json(&mut payload, "similar", &similar);
    insert_json(&mut payload, "recommendations", &recommendations);
    output.data(&Value::Object(payload));
    Ok(())
}

async fn tv(
    state: &AppState,
    id: u64,
    season: Option<u32>,
    episode: Option<u32>,
    extras: TvExtras,
    output: &Output,
) -> Result<()> {
    let catalog = &state.tv;
    let spinner = output.spinner(format!("Loading series {}...", id));

    let outcome = catalog.load_details(id).await;
    let details = match required(&catalog.details, outcome, &format!("series {}", id)).await {
        Ok(details) => details,
        Err(e) => {
            spinner.finish();
            return Err(e);
        }
    };

    let season_request = async {
        match (season, episode) {
            (Some(season), Some(episode)) => Some(catalog.load_episode(id, season, episode).await),
            (Some(season), None) => Some(catalog.load_season(id, season).await),
            _ => None,
        }
    };
    let (credits, videos, similar, recommendations, season_outcome) = tokio::join!(
        maybe(extras.credits, catalog.load_credits(id)),
        maybe(extras.videos, catalog.load_videos(id)),
        maybe(extras.similar, catalog.load_similar(id, 1)),
        maybe(extras.recommendations, catalog.load_recommendations(id, 1)),
        season_request,
    );
    spinner.finish();

    let credits = section(&catalog.credits, credits, "credits", output).await;
    let videos = section(&catalog.videos, videos, "videos", output).await;
    let similar = section(&catalog.similar, similar, "similar series", output).await;
    let recommendations = section(&catalog.recommendations, recommendations, "recommendations", output).await;

    let (season_details, episode_details) = match (season, episode, season_outcome) {
        (Some(s), Some(e), Some(outcome)) => {
            let what = format!("S{:02}E{:02} of series {}", s, e, id);
            (None, Some(required(&catalog.episode, outcome, &what).await?))
        }
        (Some(s), None, Some(outcome)) => {
            let what = format!("season {} of series {}", s, id);
            (Some(required(&catalog.season, outcome, &what).await?), None)
        }
        _ => (None, None),
    };

    let favorite = state.lists.tv(ListKind::Favorites).contains(id).await?;
    let watchlisted = state.lists.tv(ListKind::Watchlist).contains(id).await?;

    output.human(render::tv_details(&details));
    output.human(membership(favorite, watchlisted));
    if let Some(ref season) = season_details {
        output.human(render::season(season));
    }
    if let Some(ref episode) = episode_details {
        output.human(render::episode(episode));
    }
    if let Some(ref credits) = credits {
        output.human(render::credits(credits, CAST_LIMIT));
    }
    if let Some(ref videos) = videos {
        output.human(render::videos(videos));
    }
    if let Some(ref similar) = similar {
        output.human(format!("\n{}", "Similar".bold()));
        output.human(render::tv_table(&similar.results, 0).to_string());
    }
    if let Some(ref recommendations) = recommendations {
        output.human(format!("\n{}", "Recommended".bold()));
        output.human(render::tv_table(&recommendations.results, 0).to_string());
    }

    let mut payload = Map::new();
    payload.insert("details".to_string(), json!(details));
    payload.insert("favorite".to_string(), json!(favorite));
    payload.insert("watchlist".to_string(), json!(watchlisted));
    insert_json(&mut payload, "season", &season_details);
    insert_json(&mut payload, "episode", &episode_details);
    insert_json(&mut payload, "credits", &credits);
    insert_json(&mut payload, "videos", &videos);
    insert_json(&mut payload, "similar", &similar);
    insert_json(&mut payload, "recommendations", &recommendations);
    output.data(&Value::Object(payload));
    Ok(())
}

fn membership(favorite: bool, watchlisted: bool) -> String {
    let mark = |on: bool| if on { "✓".green().to_string() } else { "✗".bright_black().to_string() };
    format!("\nFavorite {}  Watchlist {}", mark(favorite), mark(watchlisted))
}
