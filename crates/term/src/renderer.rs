//! TerminalRenderer: flushes framebuffers to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw. Later frames only emit the runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written to the terminal.
    front: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Draw a frame, diffing against the previous one when sizes match.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.front.as_mut() {
            Some(front) if front.width() == fb.width() && front.height() == fb.height() => {
                encode_diff_into(front, fb, &mut self.buf)?;
                front.clone_from(fb);
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                self.front = Some(fb.clone());
            }
        }
        if self.buf.is_empty() {
            return Ok(());
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the style currently active on the terminal so unchanged
/// attributes are not re-sent.
#[derive(Default)]
struct StyleCursor {
    current: Option<CellStyle>,
}

impl StyleCursor {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        let style = cell.style;
        let prev = self.current;
        if prev.map(|p| p.bold) != Some(style.bold) {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            // Reset clears colors too.
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        } else if let Some(prev) = prev {
            if prev.fg != style.fg {
                out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            }
            if prev.bg != style.bg {
                out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            }
        }
        self.current = Some(style);
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.take().is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut styles = StyleCursor::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            styles.print(out, cell)?;
        }
    }
    styles.finish(out)
}

/// Encode only the changed runs of `next` relative to `prev` into `out`.
///
/// Emits nothing when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleCursor::default();
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for &cell in &next.row(y)[x as usize..(x + len) as usize] {
            styles.print(out, cell)?;
        }
    }
    styles.finish(out)
}

/// Maximal horizontal runs `(x, y, len)` where the frames differ.
///
/// Frames of different sizes are entirely dirty.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    (0..next.height()).flat_map(move |y| {
        let a = prev.row(y);
        let b = next.row(y);
        let mut runs = RowRuns {
            a,
            b,
            x: 0,
            y,
            whole: !same_size,
        };
        std::iter::from_fn(move || runs.next_run())
    })
}

struct RowRuns<'a> {
    a: &'a [Cell],
    b: &'a [Cell],
    x: usize,
    y: u16,
    whole: bool,
}

impl RowRuns<'_> {
    fn next_run(&mut self) -> Option<(u16, u16, u16)> {
        if self.whole {
            self.whole = false;
            self.x = self.b.len();
            return (!self.b.is_empty()).then_some((0, self.y, self.b.len() as u16));
        }
        let differs = |i: usize| self.a.get(i) != self.b.get(i);
        while self.x < self.b.len() && !differs(self.x) {
            self.x += 1;
        }
        if self.x >= self.b.len() {
            return None;
        }
        let start = self.x;
        while self.x < self.b.len() && differs(self.x) {
            self.x += 1;
        }
        Some((start as u16, self.y, (self.x - start) as u16))
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
