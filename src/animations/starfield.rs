//! Starfield - perspective-projected stars flying toward the viewer.
//!
//! Each star lives in a 3D box and is projected onto the frame every
//! pass; brightness grows as the star approaches. Stars leaving the
//! screen respawn at a random depth.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint};

const STARFIELD_NAME: &str = "Starfield";
const STARFIELD_DEFAULT_FPS: f64 = 20.0;
const STARFIELD_STARS: usize = 300;

/// Projection passes per rendered frame.
const STARFIELD_PASSES: u32 = 10;

struct Star {
    x: f64,
    y: f64,
    z: f64,
    speed: f64,
}

pub struct Starfield {
    rng: SmallRng,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            stars: Vec::new(),
        }
    }

    fn spawn(rng: &mut SmallRng) -> Star {
        Star {
            x: (rng.gen_range(0..2000) - 1000) as f64,
            y: (rng.gen_range(0..2000) - 1000) as f64,
            z: rng.gen_range(100..1000) as f64,
            speed: (rng.gen_range(0..4500) / 1000) as f64 + 0.5,
        }
    }

    fn respawn(rng: &mut SmallRng, star: &mut Star) {
        star.x = (rng.gen_range(0..1000) - 500) as f64;
        star.y = (rng.gen_range(0..1000) - 500) as f64;
        star.z = rng.gen_range(100..1000) as f64;
        star.speed = (rng.gen_range(0..4500) / 1000) as f64 + 0.5;
    }

    fn project(star: &Star, xmid: i32, ymid: i32) -> (i32, i32) {
        let x = (star.x / star.z * 100.0) as i32 + xmid;
        let y = (star.y / star.z * 100.0) as i32 + ymid;
        (x, y)
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Starfield {
    fn name(&self) -> &str {
        STARFIELD_NAME
    }

    fn default_fps(&self) -> f64 {
        STARFIELD_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        self.stars = (0..STARFIELD_STARS)
            .map(|_| Self::spawn(&mut self.rng))
            .collect();

        ctx.frame.clear();

        // Grayscale ramp, dim to bright.
        for i in 0..256 {
            ctx.palette.set_color(i, i as u8, i as u8, i as u8);
        }
    }

    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {
        self.stars.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();
        let (ncols, nrows) = (ncols as i32, nrows as i32);
        let xmid = ncols / 2;
        let ymid = nrows / 2;

        let blank = FramePoint::default();

        for _ in 0..STARFIELD_PASSES {
            for star in &mut self.stars {
                // Erase the current position before moving.
                let (x, y) = Self::project(star, xmid, ymid);
                ctx.frame.set(x, y, blank);

                star.z -= star.speed;

                let (x, y) = Self::project(star, xmid, ymid);
                let off_screen = x < 0 || x >= ncols || y < 0 || y >= nrows;
                if star.z < 1.0 || off_screen {
                    Self::respawn(&mut self.rng, star);
                    continue;
                }

                // Closer stars are brighter and faster-looking.
                let val = ((256.0 / 5.0 * star.speed) * (1000.0 / star.z)) as i32;
                let val = val.min(255);
                ctx.frame.set(x, y, FramePoint::new(val, 0, b'.', val));
            }
        }

        ctx.console
            .add_line(&format!("stars={} / passes={}", self.stars.len(), STARFIELD_PASSES));
    }
}
