//! The column buffer backing the display.
//!
//! The buffer is one module wider than the chain on each side. The middle `num_modules * 8`
//! columns are the visible window; the margins are staging zones where glyphs are written before
//! they scroll into view, and where they linger after they have scrolled out.

use heapless::Vec;

use crate::config::MAX_MODULES;

/// Columns per module.
pub const MODULE_COLS: usize = 8;

/// Capacity for the longest supported chain, including both staging zones.
pub const BUFFER_CAPACITY: usize = (MAX_MODULES + 2) * MODULE_COLS;

/// A fixed-length sequence of column bytes, where bit `r` of a column lights row `r`.
pub struct ColumnBuffer {
    columns: Vec<u8, BUFFER_CAPACITY>,
    num_modules: usize,
}

impl ColumnBuffer {
    /// Allocate a zeroed buffer for a chain of `num_modules` modules. The caller guarantees
    /// `1 <= num_modules <= MAX_MODULES`; larger chains are clamped.
    pub(crate) fn new(num_modules: usize) -> Self {
        let num_modules = num_modules.min(MAX_MODULES);
        let mut columns = Vec::new();
        // Cannot fail: the length is at most BUFFER_CAPACITY.
        let _ = columns.resize((num_modules + 2) * MODULE_COLS, 0);
        ColumnBuffer {
            columns,
            num_modules,
        }
    }

    /// Total length, staging zones included.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn num_modules(&self) -> usize {
        self.num_modules
    }

    /// All columns, staging zones included.
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [u8] {
        &mut self.columns
    }

    /// The columns currently shown on the chain.
    pub fn visible(&self) -> &[u8] {
        &self.columns[MODULE_COLS..self.len() - MODULE_COLS]
    }

    /// The visible window, for drawing a static frame.
    pub fn visible_mut(&mut self) -> &mut [u8] {
        let end = self.len() - MODULE_COLS;
        &mut self.columns[MODULE_COLS..end]
    }

    /// The 8 columns shown by the module at `segment`, counting visible modules from the left.
    pub fn segment(&self, segment: usize) -> [u8; 8] {
        let mut cols = [0u8; 8];
        let start = MODULE_COLS * (segment + 1);
        cols.copy_from_slice(&self.columns[start..start + MODULE_COLS]);
        cols
    }

    /// Zero every column.
    pub fn clear(&mut self) {
        for col in self.columns.iter_mut() {
            *col = 0;
        }
    }

    /// Copy `data` into the buffer starting at column `start`, which may be negative. Columns
    /// that land outside the buffer are dropped.
    pub fn write_at(&mut self, start: isize, data: &[u8]) {
        let len = self.len() as isize;
        for (i, &col) in data.iter().enumerate() {
            let pos = start + i as isize;
            if pos >= 0 && pos < len {
                self.columns[pos as usize] = col;
            }
        }
    }

    /// Column where glyphs are staged: the start of the right staging zone, just past the
    /// visible window.
    pub fn staging_start(&self) -> usize {
        self.len() - MODULE_COLS
    }

    /// Move every column one place to the left. The leftmost column is discarded and a blank
    /// column enters on the right.
    pub fn shift_left(&mut self) {
        let len = self.len();
        self.columns.copy_within(1..len, 0);
        self.columns[len - 1] = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_for_chain() {
        for n in 1..=MAX_MODULES {
            let buf = ColumnBuffer::new(n);
            assert_eq!(buf.len(), (n + 2) * 8);
            assert_eq!(buf.visible().len(), n * 8);
            assert!(buf.is_blank());
        }
    }

    #[test]
    fn shift_left_moves_one_column() {
        let mut buf = ColumnBuffer::new(1);
        buf.write_at(0, &[1, 2, 3]);
        buf.write_at(23, &[9]);
        buf.shift_left();
        assert_eq!(&buf.columns()[..3], &[2, 3, 0]);
        assert_eq!(buf.columns()[22], 9);
        assert_eq!(buf.columns()[23], 0);
        assert_eq!(buf.len(), 24);
    }

    #[test]
    fn write_at_crops() {
        let mut buf = ColumnBuffer::new(1);
        buf.write_at(-2, &[1, 2, 3, 4]);
        assert_eq!(&buf.columns()[..3], &[3, 4, 0]);
        buf.write_at(22, &[5, 6, 7, 8]);
        assert_eq!(&buf.columns()[21..], &[0, 5, 6]);
        buf.write_at(100, &[1]);
        buf.write_at(-100, &[1]);
        assert_eq!(buf.len(), 24);
    }

    #[test]
    fn segments_and_window() {
        let mut buf = ColumnBuffer::new(2);
        for (i, col) in buf.visible_mut().iter_mut().enumerate() {
            *col = i as u8;
        }
        assert_eq!(buf.segment(0), [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(buf.segment(1), [8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(buf.columns()[8], 0);
        assert_eq!(buf.staging_start(), 24);
        buf.clear();
        assert!(buf.is_blank());
    }
}
