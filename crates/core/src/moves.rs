//! Move resolution - slides and merges for one swipe
//!
//! [`resolve_move`] is pure: it reads the current board and builds a staged
//! board, the list of tile motions, the merge marks and the score delta. The
//! engine decides what to do with the result.
//!
//! Each line (a row for Left/Right, a column for Up/Down) is processed from the
//! cell next to the target wall outward. Tiles already processed sit in their
//! final staged slots, so a later tile only has to walk toward the wall across
//! empty staged cells and look at the first tile it meets:
//!
//! - equal value, not yet merged this move: slide into it and double it
//! - otherwise: stop right before it
//!
//! A cell receives at most one merge per move, so `[2, 2, 2, _]` swiped left
//! becomes `[4, 2, _, _]`.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::motion::TileMotion;
use crate::types::{Cell, Direction, BOARD_SIZE, CELL_COUNT, SCORE_MULTIPLIER};

/// Cells of the staged board that already received a merge this move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeMarks {
    marks: [bool; CELL_COUNT],
}

impl MergeMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_marked(&self, row: u8, col: u8) -> bool {
        Board::index(row as i8, col as i8)
            .map(|idx| self.marks[idx])
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    pub fn is_clear(&self) -> bool {
        self.marks.iter().all(|&m| !m)
    }

    pub fn clear(&mut self) {
        self.marks = [false; CELL_COUNT];
    }

    fn mark_at(&mut self, idx: usize) {
        self.marks[idx] = true;
    }

    fn is_marked_at(&self, idx: usize) -> bool {
        self.marks[idx]
    }
}

/// Outcome of resolving one direction against a board.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Board after every slide and merge of this move.
    pub staged: Board,
    /// One motion per tile that changed position.
    pub motions: ArrayVec<TileMotion, CELL_COUNT>,
    pub marks: MergeMarks,
    pub score_delta: u32,
    pub merges: u8,
}

impl Resolution {
    /// A move is legal iff at least one tile moved.
    pub fn is_legal(&self) -> bool {
        !self.motions.is_empty()
    }
}

/// Flat index of the `step`-th cell of `line`, counting from the target wall.
#[inline(always)]
fn line_cell(direction: Direction, line: usize, step: usize) -> usize {
    let size = BOARD_SIZE as usize;
    let far = size - 1;
    let (row, col) = match direction {
        Direction::Left => (line, step),
        Direction::Right => (line, far - step),
        Direction::Up => (step, line),
        Direction::Down => (far - step, line),
    };
    row * size + col
}

/// Compute the slides and merges of a swipe without touching `board`.
pub fn resolve_move(board: &Board, direction: Direction) -> Resolution {
    let size = BOARD_SIZE as usize;
    let (unit_row, unit_col) = direction.delta();

    let mut staged = *board;
    let mut marks = MergeMarks::new();
    let mut motions = ArrayVec::new();
    let mut score_delta: u32 = 0;
    let mut merges: u8 = 0;

    for line in 0..size {
        // The wall cell never moves, start one step out.
        for step in 1..size {
            let origin = line_cell(direction, line, step);
            let value = staged.cell_at(origin);
            if value == 0 {
                continue;
            }
            staged.set_at(origin, 0);

            let mut dest_step = step;
            let mut merged = false;
            while dest_step > 0 {
                let next = line_cell(direction, line, dest_step - 1);
                let target: Cell = staged.cell_at(next);
                if target == 0 {
                    dest_step -= 1;
                    continue;
                }
                if target == value && !marks.is_marked_at(next) {
                    dest_step -= 1;
                    merged = true;
                }
                break;
            }

            let dest = line_cell(direction, line, dest_step);
            if merged {
                marks.mark_at(dest);
                staged.set_at(dest, value * 2);
                score_delta += value * SCORE_MULTIPLIER;
                merges += 1;
            } else {
                staged.set_at(dest, value);
            }

            let distance = (step - dest_step) as i8;
            if distance == 0 {
                continue;
            }
            let (row, col) = Board::position(origin);
            motions.push(TileMotion::slide(
                row,
                col,
                unit_row * distance,
                unit_col * distance,
                merged,
            ));
        }
    }

    Resolution {
        staged,
        motions,
        marks,
        score_delta,
        merges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionKind;

    fn row_board(row: [Cell; 4]) -> Board {
        Board::from_rows([row, [0; 4], [0; 4], [0; 4]])
    }

    fn col_board(col: [Cell; 4]) -> Board {
        let mut rows = [[0; 4]; 4];
        for (r, &v) in col.iter().enumerate() {
            rows[r][0] = v;
        }
        Board::from_rows(rows)
    }

    #[test]
    fn test_line_cell_scan_order_starts_at_wall() {
        assert_eq!(line_cell(Direction::Left, 0, 0), 0);
        assert_eq!(line_cell(Direction::Right, 0, 0), 3);
        assert_eq!(line_cell(Direction::Up, 2, 0), 2);
        assert_eq!(line_cell(Direction::Down, 2, 0), 14);
        assert_eq!(line_cell(Direction::Down, 2, 3), 2);
    }

    #[test]
    fn test_slide_left_without_merge() {
        let res = resolve_move(&row_board([0, 2, 0, 4]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [2, 4, 0, 0]);
        assert_eq!(res.score_delta, 0);
        assert_eq!(res.merges, 0);
        assert_eq!(res.motions.len(), 2);
        assert_eq!(res.motions[0], TileMotion::slide(0, 1, 0, -1, false));
        assert_eq!(res.motions[1], TileMotion::slide(0, 3, 0, -2, false));
    }

    #[test]
    fn test_three_equal_tiles_merge_only_the_leading_pair() {
        let res = resolve_move(&row_board([2, 2, 2, 0]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [4, 2, 0, 0]);
        assert_eq!(res.score_delta, 4);
        assert_eq!(res.merges, 1);
        assert!(res.marks.is_marked(0, 0));
        assert!(!res.marks.is_marked(0, 1));
    }

    #[test]
    fn test_three_equal_tiles_right_merge_near_the_wall() {
        let res = resolve_move(&row_board([0, 2, 2, 2]), Direction::Right);
        assert_eq!(res.staged.to_rows()[0], [0, 0, 2, 4]);
        assert_eq!(res.score_delta, 4);
    }

    #[test]
    fn test_two_pairs_merge_independently() {
        let res = resolve_move(&row_board([2, 2, 4, 4]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [4, 8, 0, 0]);
        assert_eq!(res.score_delta, 12);
        assert_eq!(res.merges, 2);
        assert_eq!(res.marks.count(), 2);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        // [2,2] -> 4 must not absorb the trailing 4 in the same move.
        let res = resolve_move(&row_board([2, 2, 4, 0]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [4, 4, 0, 0]);
        assert_eq!(res.score_delta, 4);
    }

    #[test]
    fn test_four_equal_tiles_make_two_merges() {
        let res = resolve_move(&row_board([2, 2, 2, 2]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [4, 4, 0, 0]);
        assert_eq!(res.score_delta, 8);
        assert_eq!(res.merges, 2);
    }

    #[test]
    fn test_merge_across_gap_records_merging_slide() {
        let res = resolve_move(&row_board([4, 0, 0, 4]), Direction::Left);
        assert_eq!(res.staged.to_rows()[0], [8, 0, 0, 0]);
        assert_eq!(res.motions.len(), 1);
        assert_eq!(
            res.motions[0].kind,
            MotionKind::Slide { merges: true }
        );
        assert_eq!(res.motions[0].delta_col, -3);
    }

    #[test]
    fn test_vertical_moves() {
        let up = resolve_move(&col_board([0, 2, 0, 2]), Direction::Up);
        assert_eq!(up.staged.get(0, 0), Some(4));
        assert_eq!(up.staged.tile_count(), 1);
        assert_eq!(up.motions[0].delta_row, -1);
        assert_eq!(up.motions[1].delta_row, -3);

        let down = resolve_move(&col_board([8, 4, 0, 0]), Direction::Down);
        assert_eq!(down.staged.get(3, 0), Some(4));
        assert_eq!(down.staged.get(2, 0), Some(8));
        assert!(down.motions.iter().all(|m| m.delta_row == 2 && m.delta_col == 0));
    }

    #[test]
    fn test_blocked_move_is_illegal_and_leaves_board() {
        let board = row_board([2, 4, 8, 16]);
        let res = resolve_move(&board, Direction::Left);
        assert!(!res.is_legal());
        assert_eq!(res.staged, board);
        assert!(res.marks.is_clear());
        assert_eq!(res.score_delta, 0);
    }

    #[test]
    fn test_input_board_is_untouched() {
        let board = row_board([0, 0, 2, 2]);
        let before = board;
        let _ = resolve_move(&board, Direction::Left);
        assert_eq!(board, before);
    }
}
