//! Script replay and column listing: `order-board replay`, `order-board columns`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use order_board::board::BoardView;
use order_board::board::overlay::Overlay;
use order_board::config::Config;
use order_board::render::{self, BoardReport, Format};
use order_board::script::{Replayer, Script};

pub fn cmd_replay(config: &Config, script_path: &Path, format: Format, events: bool) -> Result<()> {
    let script = Script::load(script_path)?;
    info!(steps = script.steps.len(), script = %script_path.display(), "replaying script");

    let mut replayer = Replayer::new(config.board()).context("Failed to build board")?;
    replayer
        .run(&script)
        .with_context(|| format!("Replay of {} failed", script_path.display()))?;

    let app = replayer.app_mut();
    let messages = app.drain_messages();
    let report = BoardReport {
        board: app.store().snapshot(),
        open_overlays: Overlay::ALL
            .into_iter()
            .filter(|overlay| app.view().is_overlay_open(*overlay))
            .collect(),
    };

    if events {
        print!("{}", render::render_events(&messages)?);
    }
    match format {
        Format::Text => print!("{}", render::render_text(&report)),
        Format::Json => println!("{}", render::render_json(&report)?),
    }
    info!(events = messages.len(), orders = report.board.total(), "replay finished");
    Ok(())
}

pub fn cmd_columns() -> Result<()> {
    print!("{}", render::render_columns());
    Ok(())
}
