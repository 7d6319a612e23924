//! Game state module - the board engine
//!
//! This module ties together the board, move resolution, the motion slab and
//! the RNG. It owns the committed grid, the staged grid of the move in flight,
//! the merge marks, the score and the game phase.
//!
//! A frame looks like this:
//!
//! 1. [`GameState::apply_move`] resolves a swipe into a staged board plus
//!    motions (rejected while anything is still animating)
//! 2. [`GameState::tick`] advances every motion by one step
//! 3. when the last motion settles, the staged board is committed and, after a
//!    legal move, one tile is spawned with its own pop motion
//! 4. once everything is idle, a full board without merges ends the game

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::motion::{MotionSlab, TileMotion};
use crate::moves::{resolve_move, MergeMarks};
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, MotionSnapshot};
use crate::types::*;

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Progress (in thousandths) removed from each motion per tick.
    pub anim_step: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anim_step: DEFAULT_ANIM_STEP,
        }
    }
}

/// Result of [`GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// The move changed the board and counts as a turn.
    pub accepted: bool,
    pub score_delta: u32,
    pub merges: u8,
    /// Number of tiles that slid.
    pub moved: u8,
}

/// A tile placed on the board by [`GameState::spawn_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpawn {
    pub row: u8,
    pub col: u8,
    pub value: Cell,
}

/// Result of [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// A move's animations finished and its staged board was committed.
    pub settled: bool,
    /// Tile spawned by this tick's commit.
    pub spawned: Option<TileSpawn>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    staged: Board,
    marks: MergeMarks,
    motions: MotionSlab,
    rng: SimpleRng,
    seed: u32,
    config: EngineConfig,
    phase: GamePhase,
    score: u32,
    /// Accepted moves since the last (re)start.
    move_count: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// The motions in flight belong to a legal move; commit spawns a tile.
    spawn_pending: bool,
}

impl GameState {
    /// Create a new game on the title screen with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    pub fn with_config(seed: u32, config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            staged: Board::new(),
            marks: MergeMarks::new(),
            motions: MotionSlab::new(),
            rng: SimpleRng::new(seed),
            seed,
            config,
            phase: GamePhase::TitleScreen,
            score: 0,
            move_count: 0,
            episode_id: 0,
            spawn_pending: false,
        }
    }

    /// Start playing from an arbitrary board (no spawn, nothing animating).
    ///
    /// The phase is `GameOver` right away if the board has no legal move.
    pub fn from_board(seed: u32, board: Board) -> Self {
        let mut state = Self::new(seed);
        state.board = board;
        state.staged = board;
        state.phase = GamePhase::Playing;
        state.update_phase();
        state
    }

    /// Leave the title screen: clear the board and spawn the opening tiles.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::TitleScreen {
            return false;
        }
        self.reset_board();
        self.phase = GamePhase::Playing;
        info!(seed = self.seed, "game started");
        true
    }

    /// Clear grid and score, spawn the opening tiles and resume play.
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.reset_board();
        self.phase = GamePhase::Playing;
        info!(episode = self.episode_id, "game restarted");
    }

    fn reset_board(&mut self) {
        self.board.clear();
        self.staged.clear();
        self.marks.clear();
        self.motions.clear();
        self.score = 0;
        self.move_count = 0;
        self.spawn_pending = false;
        for _ in 0..START_TILES {
            self.spawn_tile();
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Board is full, no merge is possible and nothing is animating.
    pub fn is_terminal(&self) -> bool {
        self.motions.is_idle() && self.board.is_terminal()
    }

    pub fn is_animating(&self) -> bool {
        !self.motions.is_idle()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Committed grid
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Grid as it will look once the move in flight settles
    pub fn staged(&self) -> &Board {
        &self.staged
    }

    pub fn merge_marks(&self) -> &MergeMarks {
        &self.marks
    }

    pub fn motions(&self) -> &MotionSlab {
        &self.motions
    }

    /// Resolve a swipe. Rejected (no state change) outside `Playing`, while
    /// anything is animating, or when no tile can move.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        if self.phase != GamePhase::Playing || !self.motions.is_idle() {
            return MoveResult::default();
        }

        let resolution = resolve_move(&self.board, direction);
        if !resolution.is_legal() {
            return MoveResult::default();
        }

        self.staged = resolution.staged;
        self.marks = resolution.marks;
        for motion in resolution.motions.iter() {
            self.motions.insert(*motion);
        }
        self.score += resolution.score_delta;
        self.move_count = self.move_count.wrapping_add(1);
        self.spawn_pending = true;

        debug!(
            direction = direction.as_str(),
            moved = resolution.motions.len(),
            merges = resolution.merges,
            score_delta = resolution.score_delta,
            "move accepted"
        );

        MoveResult {
            accepted: true,
            score_delta: resolution.score_delta,
            merges: resolution.merges,
            moved: resolution.motions.len() as u8,
        }
    }

    /// Place one tile (2 or 4, uniformly) on a uniformly chosen empty cell.
    ///
    /// Returns `None` when the board is full or a move is still waiting to
    /// be committed.
    pub fn spawn_tile(&mut self) -> Option<TileSpawn> {
        if self.spawn_pending || self.board.is_full() {
            return None;
        }

        // Rejection sampling; the board has at least one empty cell.
        let idx = loop {
            let idx = self.rng.next_range(CELL_COUNT as u32) as usize;
            if self.board.cell_at(idx) == 0 && self.staged.cell_at(idx) == 0 {
                break idx;
            }
        };
        let value = self.rng.pick(&SPAWN_VALUES);
        let (row, col) = Board::position(idx);

        self.board.set_at(idx, value);
        self.staged.set_at(idx, value);
        self.motions.insert(TileMotion::spawn(row, col));

        debug!(row, col, value, "tile spawned");
        Some(TileSpawn { row, col, value })
    }

    /// Advance animations by one step; commit and spawn when they drain.
    ///
    /// The step is fixed per call (`elapsed_ms` does not scale it), so
    /// animation speed follows the frame rate.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        let _ = elapsed_ms;
        let mut outcome = TickOutcome::default();

        if !self.motions.is_idle() {
            self.motions.advance(self.config.anim_step);
            if self.motions.is_idle() {
                outcome = self.commit();
            }
        }

        self.update_phase();
        outcome
    }

    fn commit(&mut self) -> TickOutcome {
        self.board = self.staged;
        self.marks.clear();
        trace!(tiles = self.board.tile_count(), "staged board committed");

        if !self.spawn_pending {
            return TickOutcome::default();
        }
        self.spawn_pending = false;
        TickOutcome {
            settled: true,
            spawned: self.spawn_tile(),
        }
    }

    fn update_phase(&mut self) {
        if self.phase == GamePhase::Playing && self.is_terminal() {
            self.phase = GamePhase::GameOver;
            info!(
                score = self.score,
                moves = self.move_count,
                max_tile = self.board.max_tile(),
                "game over"
            );
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.apply_move(direction).accepted,
            GameAction::Start => self.start(),
            GameAction::Restart => {
                if self.phase == GamePhase::TitleScreen {
                    return self.start();
                }
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let size = BOARD_SIZE;
        for row in 0..size {
            for col in 0..size {
                let tile = &mut out.tiles[row as usize][col as usize];
                tile.value = self.board.get(row as i8, col as i8).unwrap_or(0);
                tile.motion = self
                    .motions
                    .get(row, col)
                    .copied()
                    .map(MotionSnapshot::from);
            }
        }
        out.phase = self.phase;
        out.score = self.score;
        out.move_count = self.move_count;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.animating = !self.motions.is_idle();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
