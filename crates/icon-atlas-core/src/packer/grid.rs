use crate::model::Rect;

/// Row-major cursor over fixed-size square cells of a square page.
///
/// Cells are handed out left to right; when the next cell would cross the
/// right edge the cursor wraps to a new row, and once a row would cross the
/// bottom edge the page is full.
#[derive(Debug, Clone)]
pub struct GridCursor {
    side: u32,
    stride: u32,
    x: u32,
    y: u32,
    row_height: u32,
}

impl GridCursor {
    pub fn new(side: u32, stride: u32) -> Self {
        Self {
            side,
            stride,
            x: 0,
            y: 0,
            row_height: 0,
        }
    }

    /// Reserves the next cell, or returns `None` when the page is full.
    pub fn next_cell(&mut self) -> Option<Rect> {
        if self.x + self.stride > self.side {
            self.x = 0;
            self.y += self.row_height;
            self.row_height = 0;
        }
        if self.y + self.stride > self.side {
            return None;
        }
        let cell = Rect::new(self.x, self.y, self.stride, self.stride);
        self.x += self.stride;
        self.row_height = self.row_height.max(self.stride);
        Some(cell)
    }

    /// Number of cells a fresh page of this geometry holds.
    pub fn capacity(&self) -> u64 {
        if self.stride == 0 {
            return u64::MAX;
        }
        let per_row = (self.side / self.stride) as u64;
        per_row * per_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_rows_at_right_edge() {
        let mut cur = GridCursor::new(32, 16);
        assert_eq!(cur.next_cell(), Some(Rect::new(0, 0, 16, 16)));
        assert_eq!(cur.next_cell(), Some(Rect::new(16, 0, 16, 16)));
        assert_eq!(cur.next_cell(), Some(Rect::new(0, 16, 16, 16)));
        assert_eq!(cur.next_cell(), Some(Rect::new(16, 16, 16, 16)));
        assert_eq!(cur.next_cell(), None);
        assert_eq!(cur.next_cell(), None);
    }

    #[test]
    fn oversized_stride_never_fits() {
        let mut cur = GridCursor::new(64, 128);
        assert_eq!(cur.capacity(), 0);
        assert_eq!(cur.next_cell(), None);
    }

    #[test]
    fn non_divisible_side_leaves_margin() {
        let mut cur = GridCursor::new(64, 48);
        assert_eq!(cur.capacity(), 1);
        assert!(cur.next_cell().is_some());
        assert!(cur.next_cell().is_none());
    }
}
