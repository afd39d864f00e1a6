//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module   | Commands handled      |
//! |----------|-----------------------|
//! | `replay` | `Replay`, `Columns`   |
//! | `config` | `Config`              |

pub mod config;
pub mod replay;

pub use config::cmd_config;
pub use replay::{cmd_columns, cmd_replay};
