//! Filter - pluggable per-pixel transform over a whole frame.
//!
//! A filter computes every output pixel as a pure function of the
//! *unfiltered* frame. [`Filter::apply`] enforces this by sampling the
//! pristine input while writing into a working copy, so convolution-style
//! filters are independent of raster scan order.

use super::frame::{Frame, FramePoint};

/// Per-pixel transform contract.
///
/// Implementations hold only their own parameters; they never retain frame
/// data between calls.
pub trait Filter {
    /// Compute the filtered cell at `(col, row)` by sampling `frame`.
    ///
    /// Must not depend on anything except `frame` contents and the
    /// filter's own parameters.
    fn filtered_point(&mut self, frame: &Frame, col: i32, row: i32) -> FramePoint;

    /// Filter `frame` in place.
    ///
    /// Every output pixel is computed against a pristine snapshot of the
    /// input, then the result replaces `frame` wholesale.
    fn apply(&mut self, frame: &mut Frame) {
        let mut work = frame.clone();
        let (ncols, nrows) = frame.dimensions();

        for col in 0..ncols as i32 {
            for row in 0..nrows as i32 {
                let pt = self.filtered_point(frame, col, row);
                work.set(col, row, pt);
            }
        }

        // Same dimensions by construction.
        let _ = frame.copy_from(&work);
    }
}
