use crate::motion::{MotionKind, TileMotion};
use crate::types::{Cell, GamePhase, BOARD_SIZE, PROGRESS_FULL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionSnapshot {
    pub delta_row: i8,
    pub delta_col: i8,
    pub progress: u16,
    pub kind: MotionKind,
}

impl MotionSnapshot {
    pub fn fraction(&self) -> f32 {
        self.progress as f32 / PROGRESS_FULL as f32
    }

    /// Grid-space `(rows, cols)` offset from the tile's cell.
    pub fn offset(&self) -> (f32, f32) {
        let t = 1.0 - self.fraction();
        (self.delta_row as f32 * t, self.delta_col as f32 * t)
    }

    pub fn scale(&self) -> f32 {
        match self.kind {
            MotionKind::Spawn => 1.0 - self.fraction(),
            MotionKind::Slide { .. } => 1.0,
        }
    }
}

impl From<TileMotion> for MotionSnapshot {
    fn from(value: TileMotion) -> Self {
        Self {
            delta_row: value.delta_row,
            delta_col: value.delta_col,
            progress: value.progress,
            kind: value.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSnapshot {
    pub value: Cell,
    pub motion: Option<MotionSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Authoritative grid with each tile's in-flight motion, keyed by origin cell.
    pub tiles: [[TileSnapshot; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    pub phase: GamePhase,
    pub score: u32,
    pub move_count: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub animating: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles = [[TileSnapshot::default(); BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.phase = GamePhase::TitleScreen;
        self.score = 0;
        self.move_count = 0;
        self.episode_id = 0;
        self.seed = 0;
        self.animating = false;
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing && !self.animating
    }

    pub fn max_tile(&self) -> Cell {
        self.tiles
            .iter()
            .flatten()
            .map(|t| t.value)
            .max()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            tiles: [[TileSnapshot::default(); BOARD_SIZE as usize]; BOARD_SIZE as usize],
            phase: GamePhase::TitleScreen,
            score: 0,
            move_count: 0,
            episode_id: 0,
            seed: 0,
            animating: false,
        };
        s.clear();
        s
    }
}
