//! Configuration view and validation commands: `order-board config`.

use anyhow::Result;

use order_board::board_config::BoardToml;
use order_board::config::Config;

use super::super::ConfigCommands;

pub fn cmd_config(config: &Config, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Board Configuration");
            println!("===================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No board.toml found at {}", config_path.display());
                println!("Using default configuration:");
            }
            println!();

            let toml = config.board();
            println!("[markers]");
            println!("  order_id = \"{}\"", toml.markers.order_id);
            println!("  column = \"{}\"", toml.markers.column);
            println!();

            println!("[view]");
            println!("  highlight_class = \"{}\"", toml.view.highlight_class);
            println!("  card_class = \"{}\"", toml.view.card_class);
            println!();

            println!("[elements]");
            for (name, id) in toml.elements.entries() {
                println!("  {} = \"{}\"", name, id);
            }
            println!();

            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!("  json = {}", toml.logging.json);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  log_level = \"{}\"", config.log_level());
            println!();

            if !config_path.exists() {
                println!("Run 'order-board config init' to create a board.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No board.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = BoardToml::load(config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if !config.init_file()? {
                println!("board.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            println!("Created board.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [markers] order_id, column");
            println!("  - [elements] ids of the board, columns, overlays and forms");
            println!("  - [logging] level, json");
            println!();
        }
    }

    Ok(())
}
