//! Framebuffer and style types for terminal rendering.
//!
//! Coordinates here are screen coordinates: `(0, 0)` is the top-left cell.
//! The game view flips world y before writing.

use crate::color::Color;

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn swapped(mut self) -> Self {
        std::mem::swap(&mut self.fg, &mut self.bg);
        self
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
    /// Paint priority; a write only lands on cells of equal or lower weight.
    pub weight: u8,
}

impl Cell {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self {
            ch,
            style,
            weight: 1,
        }
    }

    /// A cleared cell that any draw may overwrite.
    pub const fn blank(style: CellStyle) -> Self {
        Self {
            ch: ' ',
            style,
            weight: 0,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write `cell` unless the cell already holds a heavier one.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            if cell.weight >= self.cells[i].weight {
                self.cells[i] = cell;
            }
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell::new(ch, style));
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Toggle reverse video on one cell, keeping its glyph.
    pub fn reverse_cell(&mut self, x: u16, y: u16) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i].style.reverse = !self.cells[i].style.reverse;
        }
    }

    /// Read a row back as text (handy for tests and snapshots).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 0, "abcdef", CellStyle::default());
        fb.put_char(9, 9, 'x', CellStyle::default());
        assert_eq!(fb.row_text(0), " ab");
        assert_eq!(fb.row_text(1), "   ");
        assert_eq!(fb.get(3, 0), None);
    }

    #[test]
    fn heavier_cells_win() {
        let mut fb = FrameBuffer::new(1, 1);
        let style = CellStyle::default();
        fb.set(0, 0, Cell { ch: 'a', style, weight: 2 });
        fb.put_char(0, 0, 'b', style);
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('a'));

        fb.set(0, 0, Cell { ch: 'c', style, weight: 2 });
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('c'));

        fb.clear(Cell::blank(style));
        fb.put_char(0, 0, 'd', style);
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('d'));
    }

    #[test]
    fn equal_weight_later_write_wins() {
        let mut fb = FrameBuffer::new(2, 1);
        let style = CellStyle::default();
        fb.put_char(0, 0, 'a', style);
        fb.put_char(0, 0, 'b', style);
        assert_eq!(fb.row_text(0), "b ");
    }

    #[test]
    fn resize_resets_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(0, 0, 'x', CellStyle::default());
        fb.resize(3, 1);
        assert_eq!((fb.width(), fb.height()), (3, 1));
        assert_eq!(fb.row_text(0), "   ");
    }

    #[test]
    fn reverse_cell_toggles() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.reverse_cell(0, 0);
        assert!(fb.get(0, 0).map(|c| c.style.reverse).unwrap_or(false));
        fb.reverse_cell(0, 0);
        assert!(!fb.get(0, 0).map(|c| c.style.reverse).unwrap_or(true));
    }
}
