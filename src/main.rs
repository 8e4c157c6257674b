use clap::Parser;
use eyre::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use todostore::{Config, FileSaver, Shell, TodoStore};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore - in-memory todo list shell with paging and CSV export")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to a YAML config file (default: ~/.config/todostore/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Todos shown per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Directory CSV exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Start with an empty list instead of sample data
    #[arg(long)]
    no_sample: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    // Flags win over file and environment
    if let Some(size) = cli.page_size {
        config.items_per_page = size;
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if cli.no_sample {
        config.sample_data = false;
    }
    config.validate()?;

    info!(?config, "Starting shell");

    let mut store = TodoStore::new(config.items_per_page);
    if config.sample_data {
        store.initialize_sample_data();
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut shell = Shell::new(store, FileSaver::new(&config.export_dir)).with_prompt(interactive);

    if interactive {
        println!("TodoStore - type `help` for commands, `quit` to leave");
    }

    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
