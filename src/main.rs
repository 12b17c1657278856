//! HallMap - terminal floor-plan viewer for exhibition halls
//!
//! Without a subcommand the interactive viewer starts; subcommands give
//! scriptable access to halls, stands and favorites lists.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hallmap::cli::{
    CliContext, CliError, CreateListArgs, DeleteListArgs, ExitCode, HallsArgs, ListsArgs,
    PrintArgs, ShareArgs, StandsArgs, ToggleArgs,
};
use hallmap::config::Config;
use hallmap::constants::APP_BINARY_NAME;
use hallmap::favorites::storage::open_or_memory;
use hallmap::favorites::{fragment_of, ListManager, MemoryLocation, SystemClipboard};
use hallmap::models::HallId;
use hallmap::print::SnapshotFactory;
use hallmap::services::FsDataSource;
use hallmap::tui::{self, AppState};
use hallmap::view::MapView;

/// HallMap - terminal floor-plan viewer for exhibition halls
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Hall to open first
    #[arg(long, value_name = "ID")]
    hall: Option<HallId>,

    /// Shared link (or bare #fragment) to open
    #[arg(long, value_name = "URL")]
    link: Option<String>,

    /// Directory with maps.json, maps/ and images/
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Favorites storage file
    #[arg(long, value_name = "FILE", global = true)]
    storage: Option<PathBuf>,

    /// Configuration file to use instead of the default one
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List halls
    Halls(HallsArgs),
    /// List the stands of a hall
    Stands(StandsArgs),
    /// Show favorites lists
    Lists(ListsArgs),
    /// Create a favorites list
    CreateList(CreateListArgs),
    /// Delete a favorites list
    DeleteList(DeleteListArgs),
    /// Add or remove a stand in a favorites list
    Toggle(ToggleArgs),
    /// Print the share link of a list
    Share(ShareArgs),
    /// Print a hall to a text snapshot
    Print(PrintArgs),
}

/// Where log output goes.
enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn init_logging(target: LogTarget, verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            // The viewer owns the terminal; without a log file there is no log
            let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
                return;
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
    }
}

fn load_config(cli: &Cli) -> Config {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });

    if let Some(dir) = &cli.data_dir {
        config.paths.data_dir.clone_from(dir);
    }
    if let Some(storage) = &cli.storage {
        config.paths.storage_file.clone_from(storage);
    }
    config
}

fn run_viewer(config: Config, hall: Option<HallId>, link: Option<&str>) -> Result<()> {
    let storage = open_or_memory(&config.paths.storage_file);
    let fragment = link.map(fragment_of).unwrap_or_default();
    let mut lists = ListManager::open(storage, Box::new(MemoryLocation::new(fragment)));
    if let Err(e) = lists.resolve_startup() {
        warn!("Failed to resolve favorites lists: {e:#}");
    }

    let source = Arc::new(FsDataSource::new(&config.paths.data_dir));
    let mut view = MapView::new(source, config.viewer.coordinate_policy);
    view.start(hall);

    let factory = SnapshotFactory::new(&config.paths.snapshot_dir);
    let mut state = AppState::new(config, view, lists, Box::new(SystemClipboard));
    state.print.mount(&factory);

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut state, &mut terminal);
    state.teardown();

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result
}

fn run_command(command: Commands, ctx: &CliContext) -> Result<(), CliError> {
    match command {
        Commands::Halls(args) => args.execute(ctx),
        Commands::Stands(args) => args.execute(ctx),
        Commands::Lists(args) => args.execute(ctx),
        Commands::CreateList(args) => args.execute(ctx),
        Commands::DeleteList(args) => args.execute(ctx),
        Commands::Toggle(args) => args.execute(ctx),
        Commands::Share(args) => args.execute(ctx),
        Commands::Print(args) => args.execute(ctx),
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let Some(command) = cli.command.take() else {
        if let Ok(path) = Config::log_file_path() {
            init_logging(LogTarget::File(path), cli.verbose);
        }
        let config = load_config(&cli);
        return run_viewer(config, cli.hall, cli.link.as_deref());
    };

    init_logging(LogTarget::Stderr, cli.verbose);
    let ctx = CliContext::new(load_config(&cli));
    if let Err(e) = run_command(command, &ctx) {
        eprintln!("Error: {e}");
        if e.exit_code == ExitCode::ValidationError {
            eprintln!("Run '{APP_BINARY_NAME} --help' for usage.");
        }
        std::process::exit(e.exit_code as i32);
    }
    Ok(())
}
