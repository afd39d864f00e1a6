use serde::{Deserialize, Serialize};
use tracing::debug;

use super::view::BoardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Add,
    Edit,
    Help,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [Overlay::Add, Overlay::Edit, Overlay::Help];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Help => "help",
        }
    }
}

/// Open or close the add overlay. Bound to both its open and cancel controls.
pub fn on_add_toggle<V: BoardView>(view: &mut V) -> bool {
    let open = view.toggle_overlay(Overlay::Add);
    debug!(open, "add overlay toggled");
    open
}

pub fn on_help_toggle<V: BoardView>(view: &mut V) -> bool {
    let open = view.toggle_overlay(Overlay::Help);
    debug!(open, "help overlay toggled");
    open
}

pub fn on_edit_cancel<V: BoardView>(view: &mut V) {
    view.set_overlay_open(Overlay::Edit, false);
    debug!("edit overlay closed");
}
