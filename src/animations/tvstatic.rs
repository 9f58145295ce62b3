//! TV static - every cell gets a fresh random gray each frame.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint, PALETTE_SIZE};

const TVSTATIC_NAME: &str = "TvStatic";
const TVSTATIC_DEFAULT_FPS: f64 = 10.0;

pub struct TvStatic {
    rng: SmallRng,
}

impl TvStatic {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for TvStatic {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for TvStatic {
    fn name(&self) -> &str {
        TVSTATIC_NAME
    }

    fn default_fps(&self) -> f64 {
        TVSTATIC_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        for i in 0..PALETTE_SIZE {
            ctx.palette.set_color(i, i as u8, i as u8, i as u8);
        }
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();

        for row in 0..nrows as i32 {
            for col in 0..ncols as i32 {
                let c = self.rng.gen_range(0..PALETTE_SIZE as i32);
                ctx.frame.set(col, row, FramePoint::new(c, c, b' ', c));
            }
        }

        ctx.console.add_line(&format!(
            "array={}x{} / colors={}",
            ncols, nrows, PALETTE_SIZE
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnimationHost, Console};

    #[test]
    fn test_every_cell_is_written() {
        let mut host = AnimationHost::new(Box::new(TvStatic::seeded(99)));
        let mut con = Console::new(2);
        host.initialize(32, 16, &mut con);
        host.next_frame(&mut con);

        let frame = host.frame().unwrap();
        let mut seen = std::collections::HashSet::new();
        for row in 0..16 {
            for col in 0..32 {
                let pt = frame.get(col, row);
                assert!((0..256).contains(&pt.color));
                assert_eq!(pt.color, pt.bgcolor);
                seen.insert(pt.color);
            }
        }

        // 512 random draws from 256 grays hit far more than a handful.
        assert!(seen.len() > 32);
    }

    #[test]
    fn test_frames_differ() {
        let mut host = AnimationHost::new(Box::new(TvStatic::seeded(7)));
        let mut con = Console::new(2);
        host.initialize(16, 8, &mut con);

        host.next_frame(&mut con);
        let first = host.frame().unwrap().clone();
        host.next_frame(&mut con);

        assert_ne!(host.frame().unwrap(), &first);
    }
}
