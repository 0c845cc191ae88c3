use clap::{ArgAction, Parser, Subcommand};
use commands::{config, login, progress, search, subscribe};
use moviepilot_client::MoviePilotClient;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviepilot")]
#[command(about = "Search, subscribe and watch downloads on a MoviePilot server")]
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

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ask for the password on the terminal when none is configured
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    prompt_password: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search media by title
    Search {
        /// Title to search for
        title: String,
    },
    /// List the seasons of a series
    Seasons {
        /// TMDB id of the series
        tmdb_id: String,
    },
    /// Subscribe to a movie or a series season
    Subscribe {
        #[command(subcommand)]
        cmd: SubscribeCommands,
    },
    /// Show current download progress
    Progress,
    /// Check that the configured credentials can log in
    Login,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum SubscribeCommands {
    /// Subscribe to a movie
    Movie {
        /// Title as returned by search
        #[arg(long)]
        title: String,

        /// TMDB id as returned by search
        #[arg(long)]
        tmdb_id: String,
    },
    /// Subscribe to one season of a series
    Series {
        /// Title as returned by search
        #[arg(long)]
        title: String,

        /// TMDB id as returned by search
        #[arg(long)]
        tmdb_id: String,

        /// Season number
        #[arg(long)]
        season: u32,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the password)
    Show {
        /// Show the password unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_ref(), cli.prompt_password)?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    // Logged here since logging is configured from the loaded file
    tracing::debug!(server = ?config.server, "Configuration loaded");

    let output = output::Output::new(cli.output, cli.quiet);
    let client = MoviePilotClient::new(config.server.clone());

    match cli.command {
        Commands::Search { title } => search::run_search(&client, &title, &output).await,
        Commands::Seasons { tmdb_id } => search::run_seasons(&client, &tmdb_id, &output).await,
        Commands::Subscribe { cmd } => subscribe::run_subscribe(&client, cmd, &output).await,
        Commands::Progress => progress::run_progress(&client, &output).await,
        Commands::Login => login::run_login(&client, &config.server, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { full } => config::show_config(&config, full, &output),
        },
    }
}
