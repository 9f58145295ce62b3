//! Frame - 2D grid of pixel cells with configurable border semantics.
//!
//! A frame's dimensions are fixed at construction. Out-of-range access is
//! never an error: it is resolved by the active [`BorderMode`]. All drawing
//! primitives route through [`Frame::set`] and so inherit the border
//! semantics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for frame operations.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame dimensions mismatch: {dst_cols}x{dst_rows} vs {src_cols}x{src_rows}")]
    DimensionMismatch {
        dst_cols: usize,
        dst_rows: usize,
        src_cols: usize,
        src_rows: usize,
    },
}

/// A single cell of a frame.
///
/// `value` is a generic weight/flag field with no fixed meaning at the
/// engine level (alive flag in Life, intensity elsewhere).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramePoint {
    pub color: i32,
    pub bgcolor: i32,
    pub ch: u8,
    pub value: i32,
}

impl FramePoint {
    /// Create a point from all four fields.
    pub fn new(color: i32, bgcolor: i32, ch: u8, value: i32) -> Self {
        Self {
            color,
            bgcolor,
            ch,
            value,
        }
    }
}

/// Policy for out-of-range coordinate access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Reads outside the grid yield an all-zero point; writes are dropped.
    #[default]
    ZeroPadded,
    /// Coordinates are clamped to `[0, dim-1]` on read and write.
    Extended,
    /// Coordinates wrap modulo the dimension.
    Toroidal,
}

/// Fixed-size grid of [`FramePoint`] cells.
///
/// Stored as a flat vector in row-major order. `clone()` is the duplicate
/// operation: a new frame with identical dimensions, border mode and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cols: usize,
    rows: usize,
    border: BorderMode,
    buf: Vec<FramePoint>,
}

impl Frame {
    /// Allocate a zero-valued grid. Default border mode is zero-padded.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            border: BorderMode::ZeroPadded,
            buf: vec![FramePoint::default(); cols * rows],
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get `(cols, rows)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    pub fn border_mode(&self) -> BorderMode {
        self.border
    }

    pub fn set_border_mode(&mut self, mode: BorderMode) {
        self.border = mode;
    }

    /// Convert in-range coordinates to a flat index.
    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Resolve a possibly out-of-range coordinate pair to a flat index,
    /// or `None` when the access must be dropped (zero-padded mode).
    fn resolve(&self, col: i32, row: i32) -> Option<usize> {
        let (ncols, nrows) = (self.cols as i32, self.rows as i32);

        // A degenerate grid has no cell any coordinate could map to.
        if ncols == 0 || nrows == 0 {
            return None;
        }

        match self.border {
            BorderMode::ZeroPadded => {
                if col < 0 || row < 0 || col >= ncols || row >= nrows {
                    None
                } else {
                    Some(self.idx(col as usize, row as usize))
                }
            }
            BorderMode::Extended => {
                let col = col.clamp(0, ncols - 1);
                let row = row.clamp(0, nrows - 1);
                Some(self.idx(col as usize, row as usize))
            }
            BorderMode::Toroidal => {
                // rem_euclid folds any coordinate into [0, dim), including
                // exact negative multiples of the dimension.
                let col = col.rem_euclid(ncols);
                let row = row.rem_euclid(nrows);
                Some(self.idx(col as usize, row as usize))
            }
        }
    }

    /// Read the cell at `(col, row)` under the active border mode.
    pub fn get(&self, col: i32, row: i32) -> FramePoint {
        match self.resolve(col, row) {
            Some(i) => self.buf[i],
            None => FramePoint::default(),
        }
    }

    /// Write the cell at `(col, row)` under the active border mode.
    pub fn set(&mut self, col: i32, row: i32, pt: FramePoint) {
        if let Some(i) = self.resolve(col, row) {
            self.buf[i] = pt;
        }
    }

    /// Overwrite every cell of `self` with the cells of `src`.
    ///
    /// Dimensions must match; the border mode is not copied.
    pub fn copy_from(&mut self, src: &Frame) -> Result<(), FrameError> {
        if self.cols != src.cols || self.rows != src.rows {
            return Err(FrameError::DimensionMismatch {
                dst_cols: self.cols,
                dst_rows: self.rows,
                src_cols: src.cols,
                src_rows: src.rows,
            });
        }

        self.buf.copy_from_slice(&src.buf);
        Ok(())
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.buf.fill(FramePoint::default());
    }

    /// Set every cell to `pt`.
    pub fn fill(&mut self, pt: FramePoint) {
        self.buf.fill(pt);
    }

    /// Draw a line from `(col1, row1)` to `(col2, row2)`.
    ///
    /// Integer-only Bresenham walk. The starting cell itself is not
    /// plotted; a zero-length line draws nothing.
    pub fn draw_line(&mut self, col1: i32, row1: i32, col2: i32, row2: i32, pt: FramePoint) {
        let dx = col2 - col1;
        let dy = row2 - row1;

        let dxabs = dx.abs();
        let dyabs = dy.abs();

        let sdx = dx.signum();
        let sdy = dy.signum();

        let mut x = dyabs >> 1;
        let mut y = dxabs >> 1;

        let mut px = col1;
        let mut py = row1;

        if dxabs >= dyabs {
            // more horizontal than vertical
            for _ in 0..dxabs {
                y += dyabs;

                if y >= dxabs {
                    y -= dxabs;
                    py += sdy;
                }

                px += sdx;

                self.set(px, py, pt);
            }
        } else {
            // more vertical than horizontal
            for _ in 0..dyabs {
                x += dxabs;

                if x >= dyabs {
                    x -= dyabs;
                    px += sdx;
                }

                py += sdy;

                self.set(px, py, pt);
            }
        }
    }

    /// Draw the outline of a rectangle. Inverted corners are normalized.
    pub fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, pt: FramePoint) {
        let (top, bottom) = if top > bottom { (bottom, top) } else { (top, bottom) };
        let (left, right) = if left > right { (right, left) } else { (left, right) };

        for col in left..=right {
            self.set(col, top, pt);
            self.set(col, bottom, pt);
        }

        for row in top..=bottom {
            self.set(left, row, pt);
            self.set(right, row, pt);
        }
    }

    /// Draw a circle outline centered at `(col, row)`.
    ///
    /// Midpoint circle algorithm, plotting all eight octants per step.
    pub fn draw_circle(&mut self, col: i32, row: i32, radius: i32, pt: FramePoint) {
        let mut xoff = radius;
        let mut yoff = 0;
        let mut d = 1 - xoff;

        while xoff >= yoff {
            self.set(col + xoff, row + yoff, pt);
            self.set(col + yoff, row + xoff, pt);
            self.set(col - xoff, row + yoff, pt);
            self.set(col - yoff, row + xoff, pt);
            self.set(col - xoff, row - yoff, pt);
            self.set(col - yoff, row - xoff, pt);
            self.set(col + xoff, row - yoff, pt);
            self.set(col + yoff, row - xoff, pt);

            yoff += 1;

            if d <= 0 {
                d += (2 * yoff) + 1;
            } else {
                xoff -= 1;
                d += (2 * (yoff - xoff)) + 1;
            }
        }
    }

    /// Draw an ellipse outline centered at `(col, row)` with radii
    /// `(xr, yr)`.
    ///
    /// Two-region Bresenham-style algorithm, 4-way symmetry.
    pub fn draw_ellipse(&mut self, col: i32, row: i32, xr: i32, yr: i32, pt: FramePoint) {
        let two_a_square = 2 * xr * xr;
        let two_b_square = 2 * yr * yr;

        // Region 1: slopes > -1
        let mut x = xr;
        let mut y = 0;

        let mut xchange = yr * yr * (1 - (2 * xr));
        let mut ychange = xr * xr;

        let mut ellipse_error = 0;

        let mut stopx = two_b_square * xr;
        let mut stopy = 0;

        while stopx >= stopy {
            self.set(col + x, row + y, pt);
            self.set(col - x, row + y, pt);
            self.set(col - x, row - y, pt);
            self.set(col + x, row - y, pt);

            y += 1;

            stopy += two_a_square;
            ellipse_error += ychange;
            ychange += two_a_square;

            if (2 * ellipse_error) + xchange > 0 {
                x -= 1;

                stopx -= two_b_square;
                ellipse_error += xchange;
                xchange += two_b_square;
            }
        }

        // Region 2: slopes <= -1
        x = 0;
        y = yr;

        xchange = yr * yr;
        ychange = xr * xr * (1 - (2 * yr));

        ellipse_error = 0;

        stopx = 0;
        stopy = two_a_square * yr;

        while stopx <= stopy {
            self.set(col + x, row + y, pt);
            self.set(col - x, row + y, pt);
            self.set(col - x, row - y, pt);
            self.set(col + x, row - y, pt);

            x += 1;

            stopx += two_b_square;
            ellipse_error += xchange;
            xchange += two_b_square;

            if (2 * ellipse_error) + ychange > 0 {
                y -= 1;

                stopy -= two_a_square;
                ellipse_error += ychange;
                ychange += two_a_square;
            }
        }
    }
}
