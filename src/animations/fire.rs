//! Fire - classic palette-cycling flame diffusion.
//!
//! Keeps a previous-frame buffer: two rows of random-intensity coals at
//! the bottom, then every cell becomes the cooled average of itself and
//! its three lower neighbors, shifted one row up.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, BorderMode, Frame, FramePoint};

const FIRE_NAME: &str = "Fire";
const FIRE_DEFAULT_FPS: f64 = 10.0;

pub struct Fire {
    rng: SmallRng,
    prev: Option<Frame>,
}

impl Fire {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            prev: None,
        }
    }
}

impl Default for Fire {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Fire {
    fn name(&self) -> &str {
        FIRE_NAME
    }

    fn default_fps(&self) -> f64 {
        FIRE_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        let mut prev = ctx.frame.clone();
        prev.set_border_mode(BorderMode::Toroidal);
        self.prev = Some(prev);

        // Red fire palette: black -> red -> yellow -> white.
        for i in 0..64 {
            let v = (i * 4) as u8;
            ctx.palette.set_color(i, v, 0, 0);
            ctx.palette.set_color(i + 64, 255, v, 0);
            ctx.palette.set_color(i + 128, 255, 255, v);
            ctx.palette.set_color(i + 192, 255, 255, 255);
        }
    }

    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {
        self.prev = None;
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let Some(prev) = self.prev.as_mut() else {
            return;
        };

        ctx.frame.set_border_mode(BorderMode::Toroidal);

        let (ncols, nrows) = prev.dimensions();
        let (ncols, nrows) = (ncols as i32, nrows as i32);

        // Coals: two bottom rows of random embers.
        for col in 0..ncols {
            for row in [nrows - 1, nrows - 2] {
                let color = self.rng.gen_range(32..256);
                let pt = FramePoint::new(color, color, b' ', 0);
                prev.set(col, row, pt);
            }
        }

        // Diffuse upward: average of self and the three cells below,
        // cooled by one step.
        for row in 0..nrows {
            for col in 0..ncols {
                let sum = prev.get(col, row).color
                    + prev.get(col - 1, row + 1).color
                    + prev.get(col, row + 1).color
                    + prev.get(col + 1, row + 1).color;

                let mut heat = sum / 4;
                if heat > 0 {
                    heat -= 1;
                }

                ctx.frame
                    .set(col, row - 1, FramePoint::new(heat, heat, b' ', 0));
            }
        }

        // copy_from cannot fail: prev was cloned from this frame.
        let _ = prev.copy_from(ctx.frame);

        ctx.console.add_line("burning!");
    }
}
