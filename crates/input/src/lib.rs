//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Each key
//! press yields at most one action; the game loop forwards at most one move
//! per frame and ignores terminal auto-repeat.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
