use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use order_board::config::Config;
use order_board::logging::init_tracing;
use order_board::render::Format;

mod cmd;

#[derive(Parser)]
#[command(name = "order-board")]
#[command(version, about = "Kanban board of restaurant orders")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to board.toml. Defaults to .board/board.toml in the project directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON script of user actions against a fresh board
    Replay {
        /// Path to the script file
        script: PathBuf,

        /// Output format for the final board
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print the change feed as JSON lines before the board
        #[arg(long)]
        events: bool,
    },
    /// List the board columns in order
    Columns,
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    Show,
    Validate,
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = Config::new(project_dir, cli.verbose, cli.config.clone())?;
    init_tracing(&config.log_level(), config.board().logging.json);

    match &cli.command {
        Commands::Replay {
            script,
            format,
            events,
        } => cmd::cmd_replay(&config, script, *format, *events)?,
        Commands::Columns => cmd::cmd_columns()?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
