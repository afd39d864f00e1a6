//! Text and JSON rendering of a board snapshot for the CLI.

use anyhow::{Context, Result};
use board_common::{BoardMessage, BoardSnapshot, Column};
use console::style;
use serde::Serialize;
use std::fmt::Write;

use crate::board::overlay::Overlay;

/// Output format for `replay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Final board state as printed by `replay --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct BoardReport {
    pub board: BoardSnapshot,
    pub open_overlays: Vec<Overlay>,
}

pub fn render_text(report: &BoardReport) -> String {
    let mut out = String::new();
    for view in &report.board.columns {
        let _ = writeln!(
            out,
            "{} ({})",
            style(view.name.title()).bold().cyan(),
            view.orders.len()
        );
        if view.orders.is_empty() {
            let _ = writeln!(out, "  {}", style("(empty)").dim());
        }
        for order in &view.orders {
            let _ = writeln!(
                out,
                "  - {}  {}  {}",
                order.title,
                style(format!("Table {}", order.table)).dim(),
                style(order.id.as_str()).dim()
            );
        }
    }
    if !report.open_overlays.is_empty() {
        let names: Vec<&str> = report.open_overlays.iter().map(|o| o.as_str()).collect();
        let _ = writeln!(out, "Open overlays: {}", style(names.join(", ")).yellow());
    }
    out
}

pub fn render_json(report: &BoardReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize board")
}

/// One JSON object per line, in feed order.
pub fn render_events(messages: &[BoardMessage]) -> Result<String> {
    let mut out = String::new();
    for message in messages {
        let line = serde_json::to_string(message).context("Failed to serialize event")?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

pub fn render_columns() -> String {
    let mut out = String::new();
    for column in Column::ALL {
        let _ = writeln!(out, "{:<10} {}", column.as_str(), column.title());
    }
    out
}
