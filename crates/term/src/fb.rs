//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward white by `amount` in `[0, 1]`.
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| -> u8 { (c as f32 + (255.0 - c as f32) * amount).round() as u8 };
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }

    /// Perceived brightness in `[0, 255]` (Rec. 601 weights).
    pub fn luma(self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// 2D framebuffer of styled character cells.
///
/// Writes outside the buffer are clipped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.cell(ch));
    }

    /// Write `s` starting at (x, y); returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut n = 0u16;
        for ch in s.chars() {
            let cx = x.saturating_add(n);
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            n += 1;
        }
        n
    }

    /// Write `s` centered within `[x, x + w)`.
    pub fn put_str_centered(&mut self, x: u16, w: u16, y: u16, s: &str, style: CellStyle) {
        let len = s.chars().count() as u16;
        self.put_str(x.saturating_add(w.saturating_sub(len) / 2), y, s, style);
    }

    /// Write a decimal number without allocating; returns its width.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let (digits, len) = decimal_digits(value);
        for (i, &d) in digits[..len].iter().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, d as char, style);
        }
        len as u16
    }

    /// Write a decimal number centered within `[x, x + w)`.
    pub fn put_u32_centered(&mut self, x: u16, w: u16, y: u16, value: u32, style: CellStyle) {
        let len = decimal_width(value);
        self.put_u32(x.saturating_add(w.saturating_sub(len) / 2), y, value, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                self.put_char(cx, cy, ch, style);
            }
        }
    }
}

/// Number of decimal digits in `value`.
pub fn decimal_width(value: u32) -> u16 {
    decimal_digits(value).1 as u16
}

fn decimal_digits(mut value: u32) -> ([u8; 10], usize) {
    let mut rev = [0u8; 10];
    let mut len = 0;
    loop {
        rev[len] = b'0' + (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    let mut out = [0u8; 10];
    for i in 0..len {
        out[i] = rev[len - 1 - i];
    }
    (out, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).iter().map(|c| c.ch).collect()
    }

    #[test]
    fn put_u32_writes_digits_in_order() {
        let mut fb = FrameBuffer::new(8, 1);
        let n = fb.put_u32(1, 0, 2048, CellStyle::default());
        assert_eq!(n, 4);
        assert_eq!(row_text(&fb, 0), " 2048   ");
    }

    #[test]
    fn put_u32_handles_zero_and_max() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(u32::MAX), 10);
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_u32(0, 0, 0, CellStyle::default());
        assert_eq!(fb.get(0, 0).unwrap().ch, '0');
    }

    #[test]
    fn centered_text_is_centered() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.put_str_centered(0, 10, 0, "2048", CellStyle::default());
        assert_eq!(row_text(&fb, 0), "   2048   ");
    }

    #[test]
    fn writes_outside_are_clipped() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.fill_rect(2, 1, 10, 10, '#', CellStyle::default());
        assert_eq!(row_text(&fb, 0), "    ");
        assert_eq!(row_text(&fb, 1), "  ##");
        assert_eq!(fb.put_str(3, 0, "abc", CellStyle::default()), 1);
        assert!(fb.row(5).is_empty());
    }

    #[test]
    fn lighten_moves_toward_white() {
        let c = Rgb::new(100, 0, 255);
        assert_eq!(c.lighten(0.0), c);
        assert_eq!(c.lighten(1.0), Rgb::new(255, 255, 255));
        let half = c.lighten(0.5);
        assert!(half.r > 100 && half.g > 0 && half.b == 255);
    }

    #[test]
    fn luma_orders_light_and_dark() {
        assert!(Rgb::new(245, 203, 192).luma() > Rgb::new(26, 26, 26).luma());
    }
}
