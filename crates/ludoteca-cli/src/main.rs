//! Ludoteca CLI - browse the board game catalogue from a terminal

mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use ludoteca_core::{
    ALL_CATEGORIES, CatalogueConfig, CatalogueController, CatalogueSession, FilterState, GamesApi, HttpGamesApi,
    PageOutcome, Query, SortKey,
};

#[derive(Parser)]
#[command(name = "ludoteca-cli")]
#[command(author, version, about = "Ludoteca board game catalogue CLI", long_about = None)]
struct Cli {
    /// Games API base URL (overrides the config file)
    #[arg(long, global = true, env = "LUDOTECA_API_BASE")]
    api_base: Option<String>,

    /// Path to a TOML config file (defaults to ~/.config/ludoteca/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List games matching the given filters
    Browse {
        #[command(flatten)]
        filters: FilterArgs,

        /// Stop after this many games
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how many games each category holds
    Categories,

    /// Print the deep link for the given filters
    Link {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the Games API request URL instead of the page link
        #[arg(long)]
        api: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,

    /// Category key (e.g. COOP_ADVENTURE)
    #[arg(short, long)]
    category: Option<String>,

    /// Designer name
    #[arg(short, long)]
    designer: Option<String>,

    /// Only games by New Zealand designers
    #[arg(long)]
    nz_designer: bool,

    /// Games supporting this many players
    #[arg(short, long)]
    players: Option<u32>,

    /// Only games added in the last 30 days
    #[arg(long)]
    recently_added: bool,

    /// Sort order (title_asc, year_desc, rating_desc, ...)
    #[arg(long)]
    sort: Option<SortKey>,
}

impl FilterArgs {
    fn to_filter_state(&self, default_sort: SortKey) -> FilterState {
        let mut filters = FilterState::new(default_sort);
        if let Some(search) = &self.search {
            filters.search_text = search.clone();
            filters.search_text_debounced = search.clone();
        }
        filters.category = self.category.clone().unwrap_or_else(|| ALL_CATEGORIES.to_string());
        filters.designer = self.designer.clone().unwrap_or_default();
        filters.nz_designer_only = self.nz_designer;
        filters.player_count = self.players.filter(|n| *n > 0);
        filters.recently_added_only = self.recently_added;
        filters.sort = self.sort.unwrap_or(default_sort);
        filters
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.api_base)?;
    tracing::debug!("Using Games API at {}", config.api_base_url);

    match cli.command {
        Commands::Browse { filters, limit, json } => {
            cmd_browse(config, &filters, limit, json).await?;
        }
        Commands::Categories => {
            cmd_categories(&config).await?;
        }
        Commands::Link { filters, api } => {
            cmd_link(&config, &filters, api)?;
        }
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("ludoteca").join("config.toml"))
}

/// Read the config file (explicit path must exist, default path is optional)
fn load_config(explicit: Option<&Path>, api_base: Option<String>) -> Result<CatalogueConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            CatalogueConfig::from_toml_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => CatalogueConfig::default(),
    };

    if let Some(base) = api_base {
        config.api_base_url = base;
    }
    config.validate()?;
    Ok(config)
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

async fn cmd_browse(config: CatalogueConfig, args: &FilterArgs, limit: Option<usize>, json: bool) -> Result<()> {
    let api = HttpGamesApi::new(&config).context("Failed to create Games API client")?;
    let controller = CatalogueController::with_filters(config.clone(), args.to_filter_state(config.default_sort));
    let mut session = CatalogueSession::with_controller(api, controller);

    if session.start().await == PageOutcome::Failed {
        return Err(session_error(&session).context("Failed to load the first page"));
    }

    let total = session.controller().total().unwrap_or(0);
    if total == 0 {
        println!("No games match these filters.");
        return Ok(());
    }

    let target = limit.map_or(total, |l| (l as u64).min(total));
    let pb = ProgressBar::new(target);
    pb.set_style(progress_style());
    pb.set_message("Loading games");
    pb.set_position((session.controller().items().len() as u64).min(target));

    while (session.controller().items().len() as u64) < target {
        match session.load_next_page().await {
            None | Some(PageOutcome::Merged { added: 0 }) => break,
            Some(PageOutcome::Failed) => {
                pb.abandon();
                let page = session.controller().page() + 1;
                return Err(session_error(&session).context(format!("Failed to load page {}", page)));
            }
            Some(_) => pb.set_position((session.controller().items().len() as u64).min(target)),
        }
    }
    pb.finish_and_clear();

    let items = session.controller().items();
    let shown = &items[..items.len().min(target as usize)];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
    } else {
        println!("{}", output::game_table_header());
        for game in shown {
            println!("{}", output::game_row(game));
        }
        println!();
        println!("{} of {} games", shown.len(), total);
    }

    Ok(())
}

fn session_error<A: GamesApi>(session: &CatalogueSession<A>) -> anyhow::Error {
    match session.last_error() {
        Some(err) => err.clone().into(),
        None => anyhow::anyhow!(session.controller().error().unwrap_or("unknown error").to_string()),
    }
}

async fn cmd_categories(config: &CatalogueConfig) -> Result<()> {
    let api = HttpGamesApi::new(config).context("Failed to create Games API client")?;
    let counts = api
        .fetch_category_counts()
        .await
        .context("Failed to load category counts")?;

    for line in output::category_lines(&counts) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_link(config: &CatalogueConfig, args: &FilterArgs, api: bool) -> Result<()> {
    let filters = args.to_filter_state(config.default_sort);

    if api {
        let client = HttpGamesApi::new(config).context("Failed to create Games API client")?;
        let query = Query::from_filters(&filters, 1, config.page_size, config.recently_added_days);
        println!("{}", client.games_url(&query));
    } else {
        let query_string = filters.to_query_string(1, config.default_sort, config.recently_added_days);
        if query_string.is_empty() {
            println!("/");
        } else {
            println!("/?{}", query_string);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_browse_filters() {
        let cli = Cli::try_parse_from([
            "ludoteca-cli",
            "browse",
            "--search",
            "wingspan",
            "--category",
            "FAMILY",
            "--players",
            "4",
            "--nz-designer",
            "--sort",
            "rating_desc",
            "--limit",
            "20",
        ])
        .unwrap();

        let Commands::Browse { filters, limit, json } = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(limit, Some(20));
        assert!(!json);

        let state = filters.to_filter_state(SortKey::TitleAsc);
        assert_eq!(state.search_text_debounced, "wingspan");
        assert_eq!(state.category, "FAMILY");
        assert_eq!(state.player_count, Some(4));
        assert!(state.nz_designer_only);
        assert_eq!(state.sort, SortKey::RatingDesc);
        assert_eq!(state.active_filter_count(), 4);
    }

    #[test]
    fn test_cli_counts_verbose_flags() {
        let cli = Cli::try_parse_from(["ludoteca-cli", "-vv", "categories"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["ludoteca-cli", "categories"]).unwrap();
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["ludoteca-cli", "browse", "--sort", "popularity"]).is_err());
    }

    #[test]
    fn test_default_filter_args_are_pristine() {
        let state = FilterArgs::default().to_filter_state(SortKey::YearDesc);
        assert!(state.is_default(SortKey::YearDesc));
    }

    #[test]
    fn test_api_base_overrides_defaults() {
        let config = load_config(None, Some("https://games.example.org".to_string())).unwrap();
        assert_eq!(config.api_base_url, "https://games.example.org");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        assert!(load_config(Some(Path::new("/nonexistent/ludoteca.toml")), None).is_err());
    }
}
