use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod db;
mod server;
mod terminal;

#[derive(Parser)]
#[command(name = "drill", about = "Arithmetic drill trainer")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database holding saved progress
    #[arg(long, global = true, env = "DRILL_DB_URL", default_value = db::DEFAULT_DB_URL)]
    db: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one practice session
    Practice(commands::practice::PracticeArgs),
    /// Show lifetime stats, achievements and recent sessions
    Progress,
    /// Clear saved stats and history
    Reset,
    /// Serve the browser assets over HTTP
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Practice(args) => commands::practice::run(args, &cli.db).await,
        Commands::Progress => commands::progress::run(&cli.db).await,
        Commands::Reset => commands::progress::reset(&cli.db).await,
        Commands::Serve(args) => commands::serve::run(args).await,
    }
}
