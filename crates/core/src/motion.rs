//! Motion module - in-flight tile animations
//!
//! Every tile that slides during a move, and every freshly spawned tile, gets a
//! [`TileMotion`] whose progress counts down from [`PROGRESS_FULL`] to zero.
//! Motions live in a fixed 16-slot slab indexed by the tile's origin cell, so
//! the animation path never allocates.

use crate::board::Board;
use crate::types::{CELL_COUNT, PROGRESS_FULL};

/// What a motion visualizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    /// Translation toward the wall; `merges` is set when the tile combines
    /// with the tile already at its destination.
    Slide { merges: bool },
    /// Zero-distance scale-in of a newly spawned tile.
    Spawn,
}

/// An in-flight slide or spawn pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMotion {
    pub origin_row: u8,
    pub origin_col: u8,
    pub delta_row: i8,
    pub delta_col: i8,
    /// Countdown in thousandths: `PROGRESS_FULL` just started, `0` settled.
    pub progress: u16,
    pub kind: MotionKind,
}

impl TileMotion {
    pub fn slide(origin_row: u8, origin_col: u8, delta_row: i8, delta_col: i8, merges: bool) -> Self {
        debug_assert!(delta_row != 0 || delta_col != 0);
        Self {
            origin_row,
            origin_col,
            delta_row,
            delta_col,
            progress: PROGRESS_FULL,
            kind: MotionKind::Slide { merges },
        }
    }

    pub fn spawn(row: u8, col: u8) -> Self {
        Self {
            origin_row: row,
            origin_col: col,
            delta_row: 0,
            delta_col: 0,
            progress: PROGRESS_FULL,
            kind: MotionKind::Spawn,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.progress as f32 / PROGRESS_FULL as f32
    }

    pub fn is_settled(&self) -> bool {
        self.progress == 0
    }

    /// Slide distance in cells.
    pub fn distance(&self) -> u8 {
        self.delta_row.unsigned_abs() + self.delta_col.unsigned_abs()
    }

    /// Grid-space offset `(rows, cols)` from the origin at the current progress.
    pub fn offset(&self) -> (f32, f32) {
        let t = 1.0 - self.fraction();
        (self.delta_row as f32 * t, self.delta_col as f32 * t)
    }

    /// Render scale: spawn pops grow from 0 to 1, slides stay full size.
    pub fn scale(&self) -> f32 {
        match self.kind {
            MotionKind::Spawn => 1.0 - self.fraction(),
            MotionKind::Slide { .. } => 1.0,
        }
    }
}

/// Fixed-capacity store of active motions, one slot per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionSlab {
    slots: [Option<TileMotion>; CELL_COUNT],
    active: u8,
}

impl MotionSlab {
    pub fn new() -> Self {
        Self {
            slots: [None; CELL_COUNT],
            active: 0,
        }
    }

    /// Store a motion in its origin slot.
    ///
    /// A cell can only originate one motion at a time; an existing motion in
    /// the same slot is replaced and returned.
    pub fn insert(&mut self, motion: TileMotion) -> Option<TileMotion> {
        let Some(idx) = Board::index(motion.origin_row as i8, motion.origin_col as i8) else {
            return None;
        };
        let previous = self.slots[idx].replace(motion);
        if previous.is_none() {
            self.active += 1;
        }
        previous
    }

    /// Motion originating at (row, col), if any.
    pub fn get(&self, row: u8, col: u8) -> Option<&TileMotion> {
        Board::index(row as i8, col as i8).and_then(|idx| self.slots[idx].as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileMotion> {
        self.slots.iter().flatten()
    }

    pub fn active_count(&self) -> usize {
        self.active as usize
    }

    pub fn is_idle(&self) -> bool {
        self.active == 0
    }

    /// Advance every active motion by `step` and drop the settled ones.
    ///
    /// Returns the number of motions that settled during this call.
    pub fn advance(&mut self, step: u16) -> usize {
        let mut settled = 0;
        for slot in self.slots.iter_mut() {
            let Some(motion) = slot else {
                continue;
            };
            motion.progress = motion.progress.saturating_sub(step);
            if motion.is_settled() {
                *slot = None;
                settled += 1;
            }
        }
        self.active -= settled as u8;
        settled
    }

    pub fn clear(&mut self) {
        self.slots = [None; CELL_COUNT];
        self.active = 0;
    }
}

impl Default for MotionSlab {
    fn default() -> Self {
        Self::new()
    }
}
