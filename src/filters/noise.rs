//! Noise - jitters each cell by sampling a nearby cell instead.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Filter, Frame, FramePoint};

const NOISE_DEFAULT_DISPERSION: i32 = 3;

pub struct Noise {
    rng: SmallRng,
    dispersion: i32,
}

impl Noise {
    pub fn new() -> Self {
        Self::with_dispersion(NOISE_DEFAULT_DISPERSION)
    }

    pub fn with_dispersion(dispersion: i32) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(rand::random()),
            dispersion: dispersion.max(0),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(dispersion: i32, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            dispersion: dispersion.max(0),
        }
    }

    fn offset(&mut self) -> i32 {
        self.rng.gen_range(0..self.dispersion + 1) - self.dispersion / 2
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for Noise {
    fn filtered_point(&mut self, frame: &Frame, col: i32, row: i32) -> FramePoint {
        let coff = self.offset();
        let roff = self.offset();
        frame.get(col + coff, row + roff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BorderMode;

    #[test]
    fn test_zero_dispersion_is_identity() {
        let mut frame = Frame::new(4, 4);
        frame.set(1, 2, FramePoint::new(9, 1, b'#', 5));
        let original = frame.clone();

        let mut noise = Noise::seeded(0, 7);
        noise.apply(&mut frame);

        assert_eq!(frame, original);
    }

    #[test]
    fn test_offsets_stay_within_dispersion() {
        let mut noise = Noise::seeded(3, 42);
        for _ in 0..1000 {
            let off = noise.offset();
            assert!((-1..=2).contains(&off));
        }
    }

    #[test]
    fn test_cells_come_from_the_input_frame() {
        let mut frame = Frame::new(6, 6);
        frame.set_border_mode(BorderMode::Toroidal);
        for row in 0..6 {
            for col in 0..6 {
                frame.set(col, row, FramePoint::new(row * 6 + col, 0, b' ', 0));
            }
        }
        let original = frame.clone();

        let mut noise = Noise::seeded(3, 11);
        noise.apply(&mut frame);

        // Every output cell is some cell of the pristine input.
        for row in 0..6 {
            for col in 0..6 {
                let pt = frame.get(col, row);
                let found = (0..6)
                    .flat_map(|r| (0..6).map(move |c| (c, r)))
                    .any(|(c, r)| original.get(c, r) == pt);
                assert!(found);
            }
        }
    }
}
