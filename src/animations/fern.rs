//! Barnsley fern - iterated function system plotted a batch of points per
//! frame.
//!
//! Accumulates onto the frame without clearing; once enough points have
//! landed the animation reinitializes itself and the fern regrows.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint};

const FERN_NAME: &str = "FernFractal";
const FERN_DEFAULT_FPS: f64 = 10.0;
const FERN_POINTS_PER_FRAME: u32 = 500;
const FERN_FRAMES_PER_FIGURE: u32 = 100;

/// Leaf size factor mapping IFS space onto the grid.
const FERN_SIZE: f64 = 45.0;

pub struct FernFractal {
    rng: SmallRng,
    xn: f64,
    yn: f64,
    points: u32,
}

impl FernFractal {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            xn: 0.0,
            yn: 0.0,
            points: 0,
        }
    }
}

impl Default for FernFractal {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for FernFractal {
    fn name(&self) -> &str {
        FERN_NAME
    }

    fn default_fps(&self) -> f64 {
        FERN_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        self.xn = 0.0;
        self.yn = 0.0;
        self.points = 0;

        ctx.frame.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        if self.points > FERN_POINTS_PER_FRAME * FERN_FRAMES_PER_FIGURE {
            self.reinitialize(ctx);
        }

        let (xmax, ymax) = ctx.frame.dimensions();
        let (xmax, ymax) = (xmax as i32, ymax as i32);
        let xmid = xmax / 2;
        let ymid = ymax / 2;

        let pt = FramePoint::new(2, 0, b'.', 0);

        for _ in 0..FERN_POINTS_PER_FRAME {
            let r = self.rng.gen_range(0..100);

            // Affine map per portion, weighted by Barnsley's probabilities.
            let (a, b, c, d, e, f) = if r <= 1 {
                // stem
                (0.0, 0.0, 0.0, 0.16, 0.0, 0.0)
            } else if r <= 85 {
                // successively smaller leaflets
                (0.85, 0.04, -0.04, 0.85, 0.0, 1.6)
            } else if r <= 92 {
                // largest left-hand leaflet
                (0.2, -0.26, 0.23, 0.22, 0.0, 1.6)
            } else {
                // largest right-hand leaflet
                (-0.15, 0.28, 0.26, 0.24, 0.0, 0.44)
            };

            let xn = (a * self.xn) + (b * self.yn) + e;
            let yn = (c * self.xn) + (d * self.yn) + f;
            self.xn = xn;
            self.yn = yn;

            ctx.console.add_line(&format!(
                "pts={} / r={} / xn={:.3} / yn={:.3}",
                self.points, r, xn, yn
            ));

            // Fit the figure to frame coordinates.
            let x = ((xn - 0.4738) * FERN_SIZE) as i32 + xmid;
            let y = ymax - (((yn - 4.9991) * FERN_SIZE) as i32 + ymid);

            ctx.frame.set(x, y, pt);

            self.points += 1;
        }
    }
}
