//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 board engine: move resolution, animation
//! bookkeeping, tile spawning and game-over detection. It has **no
//! dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from plain unit tests
//! - **Portable**: Runs in the terminal front-end or headless
//! - **Allocation-free**: Moves, ticks and snapshots use fixed-size storage
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid with adjacency and terminal checks
//! - [`moves`]: Pure slide/merge resolution with per-move merge marks
//! - [`motion`]: Tile motions and the 16-slot motion slab
//! - [`game_state`]: The engine: staging, commit, spawn, phases, score
//! - [`rng`]: Seeded LCG used for spawn placement and values
//! - [`snapshot`]: Read-only per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Slides**: Every tile moves as far as it can toward the swiped wall
//! - **Merges**: Two equal tiles combine into one of double value; a cell
//!   receives at most one merge per move
//! - **Score**: Each merge adds the value of the new tile
//! - **Spawn**: After every move that changed the board, a 2 or a 4 (50/50)
//!   appears on a random empty cell
//! - **Game over**: Full board, no equal neighbours, nothing animating
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{Board, GameState};
//! use tui_2048_types::{Direction, TICK_MS};
//!
//! let board = Board::from_rows([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
//! let mut game = GameState::from_board(12345, board);
//!
//! let result = game.apply_move(Direction::Left);
//! assert!(result.accepted);
//! assert_eq!(result.score_delta, 12);
//!
//! // The committed board changes once the slide animation settles.
//! while game.is_animating() {
//!     game.tick(TICK_MS);
//! }
//! assert_eq!(game.board().get(0, 0), Some(4));
//! assert_eq!(game.board().get(0, 1), Some(8));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame. Each
//! call removes a fixed step from every active motion; with the default step a
//! slide or spawn pop takes ten frames.

pub mod board;
pub mod game_state;
pub mod motion;
pub mod moves;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{EngineConfig, GameState, MoveResult, TickOutcome, TileSpawn};
pub use motion::{MotionKind, MotionSlab, TileMotion};
pub use moves::{resolve_move, MergeMarks, Resolution};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, MotionSnapshot, TileSnapshot};
