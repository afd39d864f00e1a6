pub mod board;
pub mod board_config;
pub mod config;
pub mod errors;
pub mod logging;
pub mod render;
pub mod script;

pub use errors::BoardError;
