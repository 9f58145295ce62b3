//! Spirograph - hypotrochoid curves traced a slice per frame.
//!
//! Two random gear radii define the curve; when the rolling angle wraps
//! past a full turn the frame clears and a new pair of gears is drawn.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint};

const SPIROGRAPH_NAME: &str = "Spirograph";
const SPIROGRAPH_DEFAULT_FPS: f64 = 10.0;

/// Points plotted per frame over an angle slice of pi/10.
const SPIROGRAPH_POINTS_PER_FRAME: u32 = 1000;

pub struct Spirograph {
    rng: SmallRng,
    /// Fixed outer gear radius.
    big_r: f64,
    /// Rolling inner gear radius.
    small_r: f64,
    theta: f64,
}

impl Spirograph {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            big_r: 1.0,
            small_r: 1.0,
            theta: 0.0,
        }
    }
}

impl Default for Spirograph {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Spirograph {
    fn name(&self) -> &str {
        SPIROGRAPH_NAME
    }

    fn default_fps(&self) -> f64 {
        SPIROGRAPH_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        self.big_r = self.rng.gen_range(0..50) as f64 + 1.0;
        self.small_r = self.rng.gen_range(0..self.big_r as i32) as f64 + 1.0;
        self.theta = 0.0;

        ctx.frame.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        if self.theta > 2.0 * PI {
            self.theta = 0.0;
            self.big_r = self.rng.gen_range(0..100) as f64 + 20.0;
            self.small_r = self.rng.gen_range(0..20) as f64 + 1.0;
            ctx.frame.clear();
        }

        let (ncols, nrows) = ctx.frame.dimensions();
        let xmid = ncols as i32 / 2;
        let ymid = nrows as i32 / 2;

        // Pen offset from the inner gear center.
        let d = nrows as f64 / 3.0;

        let pt = FramePoint::new(2, 0, b'*', 0);
        let step = (PI / 10.0) / SPIROGRAPH_POINTS_PER_FRAME as f64;

        for _ in 0..SPIROGRAPH_POINTS_PER_FRAME {
            let t = self.theta;
            let b = ((self.big_r - self.small_r) * t) / self.small_r;

            let x = (self.big_r - self.small_r) * t.cos() + d * b.cos();
            let y = (self.big_r - self.small_r) * t.sin() - d * b.sin();

            ctx.frame.set(x as i32 + xmid, y as i32 + ymid, pt);
            self.theta += step;
        }

        ctx.console.add_line(&format!(
            "R={:.0} / r={:.0} / d={:.1} / theta={:.3}",
            self.big_r, self.small_r, d, self.theta
        ));
    }
}
