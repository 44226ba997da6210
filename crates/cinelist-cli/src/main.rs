use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use cinelist_config::{Config, DataSourceMode, PathManager};
use cinelist_core::AppState;
use cinelist_models::{ContentKind, ListKind, MovieCategory, TimeWindow, TvCategory};
use color_eyre::eyre::WrapErr;
use commands::{browse, clear, config, details, home, lists, search};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinelist")]
#[command(about = "cinelist - browse TMDB movies and TV, keep favorites and a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Override where catalog data comes from
    #[arg(long, global = true, value_enum)]
    source: Option<SourceArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Auto,
    Live,
    Fixture,
}

impl From<SourceArg> for DataSourceMode {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Auto => DataSourceMode::Auto,
            SourceArg::Live => DataSourceMode::Live,
            SourceArg::Fixture => DataSourceMode::Fixture,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "movies")]
    Movie,
    #[value(alias = "series")]
    Tv,
}

impl From<KindArg> for ContentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Movie => ContentKind::Movie,
            KindArg::Tv => ContentKind::Tv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Day => TimeWindow::Day,
            WindowArg::Week => TimeWindow::Week,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MovieListArg {
    Trending,
    Popular,
    #[value(alias = "top_rated")]
    TopRated,
    #[value(alias = "now_playing")]
    NowPlaying,
    Upcoming,
}

impl MovieListArg {
    /// `None` for trending, which is not a paginated category
    pub fn category(self) -> Option<MovieCategory> {
        match self {
            MovieListArg::Trending => None,
            MovieListArg::Popular => Some(MovieCategory::Popular),
            MovieListArg::TopRated => Some(MovieCategory::TopRated),
            MovieListArg::NowPlaying => Some(MovieCategory::NowPlaying),
            MovieListArg::Upcoming => Some(MovieCategory::Upcoming),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TvListArg {
    Trending,
    Popular,
    #[value(alias = "top_rated")]
    TopRated,
    #[value(alias = "on_the_air")]
    OnTheAir,
    #[value(alias = "airing_today")]
    AiringToday,
}

impl TvListArg {
    pub fn category(self) -> Option<TvCategory> {
        match self {
            TvListArg::Trending => None,
            TvListArg::Popular => Some(TvCategory::Popular),
            TvListArg::TopRated => Some(TvCategory::TopRated),
            TvListArg::OnTheAir => Some(TvCategory::OnTheAir),
            TvListArg::AiringToday => Some(TvCategory::AiringToday),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load every home screen catalog at once
    Home {
        /// Rows to show per catalog
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Browse a movie catalog
    Movies {
        #[arg(value_enum)]
        category: MovieListArg,

        /// Number of pages to accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Trending time window
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
    /// Browse a TV catalog
    Tv {
        #[arg(value_enum)]
        category: TvListArg,

        /// Number of pages to accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Trending time window
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
    /// Search movies or TV series by title
    Search {
        #[arg(value_enum)]
        kind: KindArg,

        /// Search text (multiple words are joined)
        #[arg(num_args = 0..)]
        query: Vec<String>,

        /// Number of result pages to accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show details for a movie or TV series
    Details {
        #[command(subcommand)]
        target: DetailsTarget,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        cmd: ListCommands,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: ListCommands,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Delete stored lists (and optionally log files)
    #[command(long_about = "Delete every stored favorites and watchlist document. Use --logs to also remove log files. Asks for confirmation unless --yes is given.")]
    Clear {
        /// Also remove log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DetailsTarget {
    Movie {
        id: u64,

        #[arg(long, action = ArgAction::SetTrue)]
        credits: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        videos: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        reviews: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        similar: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        recommendations: bool,

        /// Everything above
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    Tv {
        id: u64,

        /// Show a season's episode list
        #[arg(long)]
        season: Option<u32>,

        /// Show one episode of --season
        #[arg(long, requires = "season")]
        episode: Option<u32>,

        #[arg(long, action = ArgAction::SetTrue)]
        credits: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        videos: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        similar: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        recommendations: bool,

        /// Credits, videos, similar and recommendations
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Show the list, newest first (both kinds when none is given)
    List {
        #[arg(value_enum)]
        kind: Option<KindArg>,
    },
    /// Add by TMDB id; re-adding moves the entry to the top
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },
    /// Remove by TMDB id
    Remove {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },
    /// Add if absent, remove if present
    Toggle {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },
    /// Report whether an id is in the list
    Check {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
    },
    /// Number of entries
    Count {
        #[arg(value_enum)]
        kind: Option<KindArg>,
    },
    /// Remove every entry
    Clear {
        #[arg(value_enum)]
        kind: Option<KindArg>,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (API key masked)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the TMDB API key (prompts when omitted)
    SetApiKey { key: Option<String> },
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let mut settings = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load {}: {}", paths.config_file().display(), e))?;
    settings.apply_env();
    if let Some(source) = cli.source {
        settings.data.source = source.into();
    }

    logging::init_logging(cli.verbose, cli.quiet, &settings.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &paths, &output).await
        }
        Commands::Clear { logs, yes } => clear::run_clear(&settings, &paths, logs, yes, &output).await,
        command => {
            let state = commands::build_state(&settings, &paths).wrap_err("Failed to start")?;
            dispatch(&state, command, &output).await
        }
    }
}

async fn dispatch(state: &AppState, command: Commands, output: &output::Output) -> color_eyre::Result<()> {
    match command {
        Commands::Home { limit } => home::run_home(state, limit, output).await,
        Commands::Movies { category, pages, window } => {
            browse::run_movies(state, category, pages, window.into(), output).await
        }
        Commands::Tv { category, pages, window } => {
            browse::run_tv(state, category, pages, window.into(), output).await
        }
        Commands::Search { kind, query, pages } => {
            search::run_search(state, kind.into(), &query.join(" "), pages, output).await
        }
        Commands::Details { target } => details::run_details(state, target, output).await,
        Commands::Favorites { cmd } => lists::run_list(state, ListKind::Favorites, cmd, output).await,
        Commands::Watchlist { cmd } => lists::run_list(state, ListKind::Watchlist, cmd, output).await,
        // Handled before any state is built
        Commands::Config { .. } | Commands::Clear { .. } => Ok(()),
    }
}
