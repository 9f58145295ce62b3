//! Lissajous curves with a random phase shift and frequency pair.
//!
//! A figure is traced over a fixed number of frames, then the animation
//! reinitializes itself and a fresh curve starts.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint};

const LISSAJOUS_NAME: &str = "Lissajous";
const LISSAJOUS_DEFAULT_FPS: f64 = 10.0;
const LISSAJOUS_POINTS_PER_FRAME: u32 = 300;
const LISSAJOUS_FRAMES_PER_FIGURE: u32 = 30;

pub struct Lissajous {
    rng: SmallRng,
    /// Phase shift of the horizontal oscillation.
    phi: f64,
    /// Frequency pair.
    a: f64,
    b: f64,
    color: i32,
    theta: f64,
}

impl Lissajous {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            phi: 0.0,
            a: 1.0,
            b: 1.0,
            color: 1,
            theta: 0.0,
        }
    }
}

impl Default for Lissajous {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Lissajous {
    fn name(&self) -> &str {
        LISSAJOUS_NAME
    }

    fn default_fps(&self) -> f64 {
        LISSAJOUS_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        self.phi = (2.0 * PI * self.rng.gen_range(0..100) as f64 / 100.0) - PI;
        self.color = self.rng.gen_range(0..15) + 1;
        self.a = (self.rng.gen_range(0..10) + 1) as f64;
        self.b = (self.rng.gen_range(0..10) + 1) as f64;
        self.theta = 0.0;

        ctx.frame.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        if self.theta >= 2.0 * PI {
            self.reinitialize(ctx);
        }

        let (ncols, nrows) = ctx.frame.dimensions();
        let xmid = ncols as i32 / 2;
        let ymid = nrows as i32 / 2;
        let amp_x = (ncols as f64 / 2.0) - 1.0;
        let amp_y = (nrows as f64 / 2.0) - 1.0;

        let pt = FramePoint::new(self.color, 0, b'*', 0);
        let step = (2.0 * PI)
            / (LISSAJOUS_POINTS_PER_FRAME * LISSAJOUS_FRAMES_PER_FIGURE) as f64;

        for _ in 0..LISSAJOUS_POINTS_PER_FRAME {
            let x = amp_x * (self.theta * self.a + self.phi).sin();
            let y = amp_y * (self.theta * self.b).sin();

            ctx.frame.set(x as i32 + xmid, y as i32 + ymid, pt);
            self.theta += step;
        }

        ctx.console.add_line(&format!(
            "a={:.0} / b={:.0} / phi={:.3} / theta={:.3}",
            self.a, self.b, self.phi, self.theta
        ));
    }
}
