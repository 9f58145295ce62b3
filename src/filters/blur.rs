//! Diagonal blur - averages a cell's color with its four diagonal
//! neighbors.

use crate::engine::{Filter, Frame, FramePoint};

#[derive(Debug, Default, Clone, Copy)]
pub struct Blur;

impl Blur {
    pub fn new() -> Self {
        Self
    }
}

impl Filter for Blur {
    fn filtered_point(&mut self, frame: &Frame, col: i32, row: i32) -> FramePoint {
        let center = frame.get(col, row);

        let sum = center.color
            + frame.get(col - 1, row - 1).color
            + frame.get(col + 1, row - 1).color
            + frame.get(col - 1, row + 1).color
            + frame.get(col + 1, row + 1).color;

        FramePoint::new(sum / 5, center.bgcolor, center.ch, center.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BorderMode;

    #[test]
    fn test_lone_spike_spreads_to_diagonals() {
        let mut frame = Frame::new(3, 3);
        frame.set(1, 1, FramePoint::new(100, 0, b' ', 0));

        let mut blur = Blur::new();
        blur.apply(&mut frame);

        assert_eq!(frame.get(1, 1).color, 20);
        for (c, r) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(frame.get(c, r).color, 20);
        }
        // Orthogonal neighbors see nothing.
        assert_eq!(frame.get(1, 0).color, 0);
        assert_eq!(frame.get(0, 1).color, 0);
    }

    #[test]
    fn test_glyph_and_background_pass_through() {
        let mut frame = Frame::new(3, 3);
        frame.set(1, 1, FramePoint::new(50, 7, b'*', 3));

        let mut blur = Blur::new();
        blur.apply(&mut frame);

        let pt = frame.get(1, 1);
        assert_eq!(pt.ch, b'*');
        assert_eq!(pt.bgcolor, 7);
        assert_eq!(pt.value, 3);
    }

    #[test]
    fn test_toroidal_frame_wraps_the_average() {
        let mut frame = Frame::new(3, 3);
        frame.set_border_mode(BorderMode::Toroidal);
        frame.set(0, 0, FramePoint::new(100, 0, b' ', 0));

        let mut blur = Blur::new();
        blur.apply(&mut frame);

        // The corner's diagonal neighbors wrap around the edges.
        assert_eq!(frame.get(2, 2).color, 20);
    }
}
