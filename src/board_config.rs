//! Board configuration read from `.board/board.toml`.
//!
//! Every field has a default, so a missing file or a partial file is valid.
//!
//! # Configuration File Format
//!
//! ```toml
//! [markers]
//! order_id = "id"
//! column = "column"
//!
//! [view]
//! highlight_class = "drag-over"
//! card_class = "card"
//!
//! [elements]
//! board = "board"
//! column_ordered = "column-ordered"
//! add_overlay = "add-overlay"
//! edit_overlay = "edit-overlay"
//! help_overlay = "help-overlay"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use anyhow::{Context, Result};
use board_common::Column;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable that overrides `[logging] level`.
pub const LOG_ENV: &str = "ORDER_BOARD_LOG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Dataset keys read from elements (`data-<key>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    /// Marker carrying the order id on cards
    #[serde(default = "default_order_marker")]
    pub order_id: String,
    /// Marker carrying the column name on drop targets
    #[serde(default = "default_column_marker")]
    pub column: String,
}

fn default_order_marker() -> String {
    "id".to_string()
}

fn default_column_marker() -> String {
    "column".to_string()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            order_id: default_order_marker(),
            column: default_column_marker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Class toggled on the hovered column during a drag
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,
    #[serde(default = "default_card_class")]
    pub card_class: String,
}

fn default_highlight_class() -> String {
    "drag-over".to_string()
}

fn default_card_class() -> String {
    "card".to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            highlight_class: default_highlight_class(),
            card_class: default_card_class(),
        }
    }
}

/// Element ids of the named handle the handlers work against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementsConfig {
    pub board: String,
    pub column_ordered: String,
    pub column_preparing: String,
    pub column_served: String,
    pub add_overlay: String,
    pub add_form: String,
    pub add_title: String,
    pub add_table: String,
    pub add_open: String,
    pub add_cancel: String,
    pub edit_overlay: String,
    pub edit_form: String,
    pub edit_title: String,
    pub edit_table: String,
    pub edit_id: String,
    pub edit_column: String,
    pub edit_cancel: String,
    pub edit_delete: String,
    pub help_overlay: String,
    pub help_open: String,
    pub help_cancel: String,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            board: "board".into(),
            column_ordered: "column-ordered".into(),
            column_preparing: "column-preparing".into(),
            column_served: "column-served".into(),
            add_overlay: "add-overlay".into(),
            add_form: "add-form".into(),
            add_title: "add-title".into(),
            add_table: "add-table".into(),
            add_open: "add-open".into(),
            add_cancel: "add-cancel".into(),
            edit_overlay: "edit-overlay".into(),
            edit_form: "edit-form".into(),
            edit_title: "edit-title".into(),
            edit_table: "edit-table".into(),
            edit_id: "edit-id".into(),
            edit_column: "edit-column".into(),
            edit_cancel: "edit-cancel".into(),
            edit_delete: "edit-delete".into(),
            help_overlay: "help-overlay".into(),
            help_open: "help-open".into(),
            help_cancel: "help-cancel".into(),
        }
    }
}

impl ElementsConfig {
    pub fn column(&self, column: Column) -> &str {
        match column {
            Column::Ordered => &self.column_ordered,
            Column::Preparing => &self.column_preparing,
            Column::Served => &self.column_served,
        }
    }

    /// All `(field, id)` pairs, used for validation.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("board", &self.board),
            ("column_ordered", &self.column_ordered),
            ("column_preparing", &self.column_preparing),
            ("column_served", &self.column_served),
            ("add_overlay", &self.add_overlay),
            ("add_form", &self.add_form),
            ("add_title", &self.add_title),
            ("add_table", &self.add_table),
            ("add_open", &self.add_open),
            ("add_cancel", &self.add_cancel),
            ("edit_overlay", &self.edit_overlay),
            ("edit_form", &self.edit_form),
            ("edit_title", &self.edit_title),
            ("edit_table", &self.edit_table),
            ("edit_id", &self.edit_id),
            ("edit_column", &self.edit_column),
            ("edit_cancel", &self.edit_cancel),
            ("edit_delete", &self.edit_delete),
            ("help_overlay", &self.help_overlay),
            ("help_open", &self.help_open),
            ("help_cancel", &self.help_cancel),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// The complete board.toml configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardToml {
    #[serde(default)]
    pub markers: MarkersConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub elements: ElementsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BoardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse board.toml")
    }

    /// Load `board.toml` from `board_dir`, or defaults if it doesn't exist.
    pub fn load_or_default(board_dir: &Path) -> Result<Self> {
        let config_path = board_dir.join("board.toml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize board.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Log level, with a non-blank `ORDER_BOARD_LOG` value taking precedence
    /// over the file.
    pub fn log_level_from(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.logging.level.clone())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.markers.order_id.trim().is_empty() {
            warnings.push("markers.order_id is empty".to_string());
        }
        if self.markers.column.trim().is_empty() {
            warnings.push("markers.column is empty".to_string());
        }
        if self.markers.order_id == self.markers.column {
            warnings.push(format!(
                "markers.order_id and markers.column share the key '{}'",
                self.markers.column
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            warnings.push(format!(
                "Invalid logging.level '{}': expected one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (field, id) in self.elements.entries() {
            if id.trim().is_empty() {
                warnings.push(format!("elements.{} is empty", field));
                continue;
            }
            if let Some(previous) = seen.insert(id, field) {
                warnings.push(format!(
                    "elements.{} and elements.{} share the id '{}'",
                    previous, field, id
                ));
            }
        }

        warnings
    }
}
