//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, MotionKind, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GamePhase, BOARD_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen rectangle occupied by the board (including its outer gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

const TITLE_BG: Rgb = Rgb::new(165, 28, 48);
const BOARD_BG: Rgb = Rgb::new(127, 106, 79);
const SLOT_BG: Rgb = Rgb::new(211, 176, 131);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const DARK_TEXT: Rgb = Rgb::new(30, 30, 30);
const LIGHT_TEXT: Rgb = Rgb::new(250, 250, 250);

/// Tile colours for 2, 4, 8, ... 65536; larger values reuse the last entry.
const TILE_COLORS: [Rgb; 16] = [
    Rgb::new(245, 203, 192),
    Rgb::new(240, 152, 129),
    Rgb::new(240, 104, 90),
    Rgb::new(201, 32, 32),
    Rgb::new(219, 149, 15),
    Rgb::new(219, 199, 30),
    Rgb::new(106, 201, 34),
    Rgb::new(9, 156, 98),
    Rgb::new(33, 189, 201),
    Rgb::new(28, 76, 9),
    Rgb::new(117, 46, 161),
    Rgb::new(115, 3, 112),
    Rgb::new(158, 26, 91),
    Rgb::new(97, 97, 97),
    Rgb::new(59, 59, 59),
    Rgb::new(26, 26, 26),
];

/// Background colour of a tile holding `value`.
pub fn tile_color(value: Cell) -> Rgb {
    let idx = value.max(2).trailing_zeros() as usize - 1;
    TILE_COLORS[idx.min(TILE_COLORS.len() - 1)]
}

/// Readable number colour on top of `bg`.
fn text_color(bg: Rgb) -> Rgb {
    if bg.luma() > 140 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Border between tiles, in cells.
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 8x3 keeps tiles roughly square with typical glyph aspect ratios.
        Self {
            tile_w: 8,
            tile_h: 3,
            gap: 1,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16, gap: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            gap,
        }
    }

    /// Where the board lands for a viewport: centered, with one header row
    /// pair above and a hint row pair below.
    pub fn board_layout(&self, viewport: Viewport) -> BoardLayout {
        let n = BOARD_SIZE as u16;
        let w = n * self.tile_w + (n + 1) * self.gap;
        let h = n * self.tile_h + (n + 1) * self.gap;
        let total_h = h + 4;
        BoardLayout {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(total_h) / 2 + 2,
            w,
            h,
        }
    }

    /// Top-left corner of the slot at (row, col).
    pub fn slot_origin(&self, layout: BoardLayout, row: u8, col: u8) -> (u16, u16) {
        (
            layout.x + self.gap + col as u16 * (self.tile_w + self.gap),
            layout.y + self.gap + row as u16 * (self.tile_h + self.gap),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);

        if snap.phase == GamePhase::TitleScreen {
            self.draw_title(fb, viewport);
            return;
        }

        fb.clear(CellStyle::new(LIGHT_TEXT, SCREEN_BG).cell(' '));
        let layout = self.board_layout(viewport);

        self.draw_header(fb, snap, layout);
        fb.fill_rect(
            layout.x,
            layout.y,
            layout.w,
            layout.h,
            ' ',
            CellStyle::new(LIGHT_TEXT, BOARD_BG),
        );

        let slot = CellStyle::new(DARK_TEXT, SLOT_BG);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let (x, y) = self.slot_origin(layout, row, col);
                fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', slot);
            }
        }

        // Resting and spawning tiles first, sliding tiles on top of them.
        for pass_sliding in [false, true] {
            for (row, line) in snap.tiles.iter().enumerate() {
                for (col, tile) in line.iter().enumerate() {
                    if tile.value == 0 {
                        continue;
                    }
                    let sliding = matches!(
                        tile.motion.map(|m| m.kind),
                        Some(MotionKind::Slide { .. })
                    );
                    if sliding == pass_sliding {
                        self.draw_tile(fb, layout, row as u8, col as u8, tile);
                    }
                }
            }
        }

        self.draw_hint(fb, layout);

        if snap.phase == GamePhase::GameOver {
            self.draw_game_over(fb, snap, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_title(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let bg = CellStyle::new(LIGHT_TEXT, TITLE_BG);
        fb.clear(bg.cell(' '));
        let mid = viewport.height / 2;
        fb.put_str_centered(0, viewport.width, mid.saturating_sub(2), "2048", bg.bold());
        fb.put_str_centered(0, viewport.width, mid, "press ENTER to start", bg);
        fb.put_str_centered(
            0,
            viewport.width,
            mid.saturating_add(2),
            "arrows / wasd / hjkl to slide",
            bg,
        );
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: BoardLayout) {
        let Some(y) = layout.y.checked_sub(2) else {
            return;
        };
        let label = CellStyle::new(LIGHT_TEXT, SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);

        let mut x = layout.x;
        x += fb.put_str(x, y, "SCORE ", label);
        fb.put_u32(x, y, snap.score, value);

        let moves_w = 6 + crate::fb::decimal_width(snap.move_count);
        let x = (layout.x + layout.w).saturating_sub(moves_w);
        let x = x + fb.put_str(x, y, "MOVES ", label);
        fb.put_u32(x, y, snap.move_count, value);
    }

    fn draw_hint(&self, fb: &mut FrameBuffer, layout: BoardLayout) {
        let style = CellStyle::new(Rgb::new(150, 150, 150), SCREEN_BG);
        fb.put_str_centered(
            layout.x,
            layout.w,
            layout.y + layout.h + 1,
            "move: arrows  r: restart  q: quit",
            style,
        );
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        row: u8,
        col: u8,
        tile: &TileSnapshot,
    ) {
        let (x, y) = self.slot_origin(layout, row, col);
        let (mut x, mut y) = (x as i32, y as i32);
        let (mut w, mut h) = (self.tile_w, self.tile_h);
        let mut bg = tile_color(tile.value);
        let mut show_number = true;

        if let Some(motion) = tile.motion {
            match motion.kind {
                MotionKind::Slide { merges } => {
                    let (dr, dc) = motion.offset();
                    x += (dc * (self.tile_w + self.gap) as f32).round() as i32;
                    y += (dr * (self.tile_h + self.gap) as f32).round() as i32;
                    if merges {
                        bg = bg.lighten(0.15);
                    }
                }
                MotionKind::Spawn => {
                    let scale = motion.scale();
                    w = (self.tile_w as f32 * scale).round() as u16;
                    h = (self.tile_h as f32 * scale).round() as u16;
                    if w == 0 || h == 0 {
                        return;
                    }
                    x += ((self.tile_w - w) / 2) as i32;
                    y += ((self.tile_h - h) / 2) as i32;
                    show_number = scale >= 1.0;
                }
            }
        }

        let style = CellStyle::new(text_color(bg), bg);
        let Some((x, y, w, h)) = clip_origin(x, y, w, h) else {
            return;
        };
        fb.fill_rect(x, y, w, h, ' ', style);
        if show_number {
            fb.put_u32_centered(x, w, y + h / 2, tile.value, style.bold());
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: BoardLayout) {
        const LABEL: &str = "Your score was: ";
        let box_w = (LABEL.len() as u16 + crate::fb::decimal_width(snap.score) + 4)
            .max(22)
            .min(layout.w);
        let box_h = 5;
        let x = layout.x + (layout.w - box_w) / 2;
        let y = layout.y + layout.h.saturating_sub(box_h) / 2;
        let style = CellStyle::new(LIGHT_TEXT, Rgb::new(40, 40, 40));

        fb.fill_rect(x, y, box_w, box_h, ' ', style);
        fb.put_str_centered(x, box_w, y + 1, "GAME OVER", style.bold());

        let score_w = LABEL.len() as u16 + crate::fb::decimal_width(snap.score);
        let sx = x + box_w.saturating_sub(score_w) / 2;
        let sx = sx + fb.put_str(sx, y + 2, LABEL, style);
        fb.put_u32(sx, y + 2, snap.score, style.bold());

        fb.put_str_centered(x, box_w, y + 3, "press R to restart", style);
    }
}

/// Drop the part of a rectangle left of or above the screen.
fn clip_origin(x: i32, y: i32, w: u16, h: u16) -> Option<(u16, u16, u16, u16)> {
    let cut_x = (-x).max(0) as u32;
    let cut_y = (-y).max(0) as u32;
    if cut_x >= w as u32 || cut_y >= h as u32 {
        return None;
    }
    Some((
        x.max(0) as u16,
        y.max(0) as u16,
        w - cut_x as u16,
        h - cut_y as u16,
    ))
}
