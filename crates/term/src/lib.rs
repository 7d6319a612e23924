//! Terminal "game renderer" module.
//!
//! A small rendering layer for the 2048 board. It avoids widget toolkits and
//! instead renders into a plain framebuffer that is flushed to the terminal
//! with crossterm.
//!
//! - [`fb`]: styled cell grid plus colour helpers
//! - [`game_view`]: pure snapshot to framebuffer mapping (title, board, overlays)
//! - [`renderer`]: raw-mode terminal session with diffed flushes

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_color, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
