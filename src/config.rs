use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::board_config::{BoardToml, LOG_ENV};

/// Runtime configuration for the board CLI.
///
/// Bridges `BoardToml` with command-line overrides and resolves where the
/// configuration file lives.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub board_dir: PathBuf,
    pub config_file: PathBuf,
    pub verbose: bool,
    board: BoardToml,
}

impl Config {
    /// Load configuration for `project_dir`.
    ///
    /// An explicit `config_file` must exist; the default `.board/board.toml`
    /// falls back to built-in defaults when absent.
    pub fn new(project_dir: PathBuf, verbose: bool, config_file: Option<PathBuf>) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let board_dir = project_dir.join(".board");

        let (config_file, board) = match config_file {
            Some(path) => {
                let board = BoardToml::load(&path)?;
                (path, board)
            }
            None => {
                let board = BoardToml::load_or_default(&board_dir)?;
                (board_dir.join("board.toml"), board)
            }
        };

        Ok(Self {
            project_dir,
            board_dir,
            config_file,
            verbose,
            board,
        })
    }

    pub fn board(&self) -> &BoardToml {
        &self.board
    }

    /// Effective log level (env → `--verbose` → file).
    pub fn log_level(&self) -> String {
        self.log_level_from(std::env::var(LOG_ENV).ok())
    }

    fn log_level_from(&self, env_value: Option<String>) -> String {
        match env_value.filter(|v| !v.trim().is_empty()) {
            None if self.verbose => "debug".to_string(),
            env_value => self.board.log_level_from(env_value),
        }
    }

    /// Write a default `board.toml` unless one already exists.
    /// Returns `true` if a file was written.
    pub fn init_file(&self) -> Result<bool> {
        if self.config_file.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.config_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        BoardToml::default().save(&self.config_file)?;
        Ok(true)
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, None).unwrap();
        assert_eq!(
            config.config_file,
            dir.path().canonicalize().unwrap().join(".board/board.toml")
        );
        assert_eq!(config.board().markers.column, "column");
        assert!(!config.config_file.exists());
    }

    #[test]
    fn test_config_reads_board_toml() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".board")).unwrap();
        fs::write(
            dir.path().join(".board/board.toml"),
            "[view]\nhighlight_class = \"hovered\"\n",
        )
        .unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, None).unwrap();
        assert_eq!(config.board().view.highlight_class, "hovered");
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = Config::new(dir.path().to_path_buf(), false, Some(missing));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_log_level_precedence() {
        let dir = tempdir().unwrap();
        let quiet = Config::new(dir.path().to_path_buf(), false, None).unwrap();
        let verbose = Config::new(dir.path().to_path_buf(), true, None).unwrap();
        assert_eq!(quiet.log_level_from(None), "info");
        assert_eq!(verbose.log_level_from(None), "debug");
        assert_eq!(verbose.log_level_from(Some("warn".into())), "warn");
    }

    #[test]
    fn test_init_file_is_idempotent() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, None).unwrap();
        assert!(config.init_file().unwrap());
        assert!(config.config_file().exists());
        assert!(!config.init_file().unwrap());
    }
}
