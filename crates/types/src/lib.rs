//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, headless play).
//!
//! # Board Dimensions
//!
//! The classic 2048 grid:
//!
//! - **Size**: 4x4 cells, row-major, origin top-left
//! - **Cell value**: `0` for empty, otherwise a power of two `>= 2`
//!
//! # Animation Constants
//!
//! Animation progress is stored in thousandths so that the countdown from
//! "just started" to "settled" is exact:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//! | `PROGRESS_FULL` | 1000 | Progress of a freshly started motion |
//! | `DEFAULT_ANIM_STEP` | 100 | Progress removed per tick (10 ticks per motion) |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, BOARD_SIZE};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.delta(), (0, -1));
//!
//! let action = GameAction::from_str("restart").unwrap();
//! assert_eq!(action, GameAction::Restart);
//!
//! assert_eq!(BOARD_SIZE, 4);
//! ```

/// Board side length in cells (4 rows, 4 columns)
pub const BOARD_SIZE: u8 = 4;

/// Total number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Progress value of a motion that has just started.
pub const PROGRESS_FULL: u16 = 1000;

/// Progress removed from every active motion per tick.
///
/// The step is frame-coupled: it does not scale with elapsed wall time.
pub const DEFAULT_ANIM_STEP: u16 = 100;

/// Values a freshly spawned tile can take, chosen uniformly.
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Number of tiles placed on the board by a (re)start.
pub const START_TILES: usize = 2;

/// A merge of two tiles of value `v` scores `v * SCORE_MULTIPLIER`.
pub const SCORE_MULTIPLIER: u32 = 2;

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `2^k` (`k >= 1`): Tile with that value
pub type Cell = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants_are_consistent() {
        assert_eq!(CELL_COUNT, 16);
        assert_eq!(PROGRESS_FULL % DEFAULT_ANIM_STEP, 0);
        assert!(SPAWN_VALUES.iter().all(|v| v.is_power_of_two() && *v >= 2));
    }

    #[test]
    fn direction_deltas_are_unit_vectors() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            assert_eq!(dr.abs() + dc.abs(), 1, "{:?}", dir);
        }
    }

    #[test]
    fn direction_axis() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn action_round_trips_through_str() {
        for action in [
            GameAction::Move(Direction::Up),
            GameAction::Move(Direction::Down),
            GameAction::Move(Direction::Left),
            GameAction::Move(Direction::Right),
            GameAction::Start,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}

/// Swipe direction for a move
///
/// Tiles slide toward the wall named by the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit step `(row, col)` of a tile sliding in this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// True for Left/Right (lines are rows), false for Up/Down (lines are columns).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Game actions that can be applied to modify game state
///
/// Produced by key input and by the headless autoplayer. Title and
/// game-over screen buttons map to `Start` and `Restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Swipe all tiles in a direction
    Move(Direction),
    /// Leave the title screen and begin a game
    Start,
    /// Clear the board and score and begin a new game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            other => Direction::from_str(other).map(GameAction::Move),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Start => "start",
            GameAction::Restart => "restart",
        }
    }
}

/// Top-level game phase
///
/// - **TitleScreen** → **Playing** on [`GameAction::Start`]
/// - **Playing** → **GameOver** when the board is full, no move is possible
///   and no animation is in flight
/// - **GameOver** → **Playing** on [`GameAction::Restart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    TitleScreen,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::TitleScreen => "title",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameOver",
        }
    }
}
