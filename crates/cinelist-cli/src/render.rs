use chrono::{DateTime, Utc};
use cinelist_models::{
    Credits, Episode, ListEntry, Movie, MovieDetails, Review, SeasonDetails, TvSeries, TvSeriesDetails, Videos,
};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

const TITLE_WIDTH: usize = 48;

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn rating(vote_average: f64, vote_count: u64) -> String {
    if vote_count == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}", vote_average)
    }
}

fn year(year: Option<u32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn added(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Numbered from `start` so appended pages keep counting
pub fn movie_table(movies: &[Movie], start: usize) -> Table {
    let mut table = styled_table(&["#", "ID", "Title", "Year", "Rating"]);
    for (i, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(start + i + 1),
            Cell::new(movie.id),
            Cell::new(truncate(&movie.title, TITLE_WIDTH)),
            Cell::new(year(movie.year())),
            Cell::new(rating(movie.vote_average, movie.vote_count)),
        ]);
    }
    table
}

pub fn tv_table(series: &[TvSeries], start: usize) -> Table {
    let mut table = styled_table(&["#", "ID", "Name", "First Aired", "Rating"]);
    for (i, show) in series.iter().enumerate() {
        table.add_row(vec![
            Cell::new(start + i + 1),
            Cell::new(show.id),
            Cell::new(truncate(&show.name, TITLE_WIDTH)),
            Cell::new(year(show.year())),
            Cell::new(rating(show.vote_average, show.vote_count)),
        ]);
    }
    table
}

pub fn movie_entries_table(entries: &[ListEntry<Movie>]) -> Table {
    let mut table = styled_table(&["ID", "Title", "Year", "Rating", "Added"]);
    for entry in entries {
        let movie = &entry.record;
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(truncate(&movie.title, TITLE_WIDTH)),
            Cell::new(year(movie.year())),
            Cell::new(rating(movie.vote_average, movie.vote_count)),
            Cell::new(added(&entry.added_at)),
        ]);
    }
    table
}

pub fn tv_entries_table(entries: &[ListEntry<TvSeries>]) -> Table {
    let mut table = styled_table(&["ID", "Name", "First Aired", "Rating", "Added"]);
    for entry in entries {
        let show = &entry.record;
        table.add_row(vec![
            Cell::new(show.id),
            Cell::new(truncate(&show.name, TITLE_WIDTH)),
            Cell::new(year(show.year())),
            Cell::new(rating(show.vote_average, show.vote_count)),
            Cell::new(added(&entry.added_at)),
        ]);
    }
    table
}

fn heading(title: &str, tagline: Option<&str>) -> String {
    let mut out = format!("\n{}", title.bright_cyan().bold());
    if let Some(tagline) = tagline.filter(|t| !t.is_empty()) {
        out.push_str(&format!("\n{}", tagline.italic()));
    }
    out
}

fn facts_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

fn join_names(names: impl Iterator<Item = String>) -> String {
    let joined: Vec<String> = names.collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}

pub fn movie_details(details: &MovieDetails) -> String {
    let movie = &details.movie;
    let mut rows = vec![
        ("ID", movie.id.to_string()),
        ("Released", movie.release_date.clone().unwrap_or_else(|| "-".to_string())),
        ("Rating", format!("{} ({} votes)", rating(movie.vote_average, movie.vote_count), movie.vote_count)),
        ("Genres", join_names(details.genres.iter().map(|g| g.name.clone()))),
        ("Status", details.status.clone()),
    ];
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        rows.push(("Runtime", format!("{}h {:02}m", runtime / 60, runtime % 60)));
    }
    if details.budget > 0 {
        rows.push(("Budget", format!("${}", details.budget)));
    }
    if let Some(ref imdb) = details.imdb_id {
        rows.push(("IMDb", format!("https://www.imdb.com/title/{}", imdb)));
    }

    format!(
        "{}\n{}\n\n{}",
        heading(&movie.title, details.tagline.as_deref()),
        facts_table(rows),
        movie.overview
    )
}

pub fn tv_details(details: &TvSeriesDetails) -> String {
    let series = &details.series;
    let mut rows = vec![
        ("ID", series.id.to_string()),
        ("First aired", series.first_air_date.clone().unwrap_or_else(|| "-".to_string())),
        ("Rating", format!("{} ({} votes)", rating(series.vote_average, series.vote_count), series.vote_count)),
        ("Genres", join_names(details.genres.iter().map(|g| g.name.clone()))),
        ("Status", details.status.clone()),
        ("Seasons", format!("{} ({} episodes)", details.number_of_seasons, details.number_of_episodes)),
    ];
    if !details.networks.is_empty() {
        rows.push(("Networks", join_names(details.networks.iter().map(|n| n.name.clone()))));
    }
    if !details.created_by.is_empty() {
        rows.push(("Created by", join_names(details.created_by.iter().map(|c| c.name.clone()))));
    }

    format!(
        "{}\n{}\n\n{}",
        heading(&series.name, details.tagline.as_deref()),
        facts_table(rows),
        series.overview
    )
}

pub fn credits(credits: &Credits, limit: usize) -> String {
    let mut table = styled_table(&["Name", "Character"]);
    for member in credits.cast.iter().take(limit) {
        table.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
    }

    let directors: Vec<&str> = credits.crew_with_job("Director").map(|c| c.name.as_str()).collect();
    let mut out = format!("\n{}\n{}", "Cast".bold(), table);
    if !directors.is_empty() {
        out.push_str(&format!("\n{} {}", "Directed by".bold(), directors.join(", ")));
    }
    out
}

pub fn videos(videos: &Videos) -> String {
    let mut out = format!("\n{}", "Videos".bold());
    match videos.trailer().and_then(|t| t.watch_url().map(|url| (t, url))) {
        Some((trailer, url)) => out.push_str(&format!("\nTrailer: {} {}", trailer.name, url.underline())),
        None => out.push_str("\nNo trailer available"),
    }
    for video in videos.results.iter().filter(|v| !v.is_youtube_trailer()).take(5) {
        if let Some(url) = video.watch_url() {
            out.push_str(&format!("\n  {} ({}) {}", video.name, video.video_type, url));
        }
    }
    out
}

pub fn reviews(reviews: &[Review], limit: usize) -> String {
    let mut out = format!("\n{}", "Reviews".bold());
    if reviews.is_empty() {
        out.push_str("\nNo reviews yet");
    }
    for review in reviews.iter().take(limit) {
        let score = review
            .author_details
            .rating
            .map(|r| format!(" ({:.0}/10)", r))
            .unwrap_or_default();
        out.push_str(&format!(
            "\n{}{}\n  {}",
            review.author.bold(),
            score,
            truncate(review.content.trim(), 280)
        ));
    }
    out
}

pub fn season(season: &SeasonDetails) -> String {
    let mut table = styled_table(&["#", "Episode", "Aired", "Runtime"]);
    for episode in &season.episodes {
        table.add_row(vec![
            Cell::new(episode.episode_number),
            Cell::new(truncate(&episode.name, TITLE_WIDTH)),
            Cell::new(episode.air_date.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(episode.runtime.map(|r| format!("{}m", r)).unwrap_or_else(|| "-".to_string())),
        ]);
    }
    format!("{}\n{}", heading(&season.name, None), table)
}

pub fn episode(episode: &Episode) -> String {
    let rows = vec![
        ("Episode", format!("S{:02}E{:02}", episode.season_number, episode.episode_number)),
        ("Aired", episode.air_date.clone().unwrap_or_else(|| "-".to_string())),
        ("Rating", rating(episode.vote_average, episode.vote_count)),
    ];
    format!(
        "{}\n{}\n\n{}",
        heading(&episode.name, None),
        facts_table(rows),
        episode.overview
    )
}
