//! Matrix rain - columns of glyphs falling at independent speeds with a
//! fading green trail behind each head.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, FramePoint};

const MATRIX_NAME: &str = "Matrix";
const MATRIX_DEFAULT_FPS: f64 = 2.0;
const MATRIX_TRAIL_LEN: i32 = 8;

struct Drop {
    row: i32,
    /// Frames to wait between single-row steps.
    lag: u32,
    countdown: u32,
}

pub struct Matrix {
    rng: SmallRng,
    drops: Vec<Drop>,
}

impl Matrix {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            drops: Vec::new(),
        }
    }

    fn glyph(rng: &mut SmallRng) -> u8 {
        // Printable ASCII, biased toward digits and letters.
        rng.gen_range(b'!'..=b'~')
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Matrix {
    fn name(&self) -> &str {
        MATRIX_NAME
    }

    fn default_fps(&self) -> f64 {
        MATRIX_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();

        self.drops = (0..ncols)
            .map(|_| Drop {
                row: -(self.rng.gen_range(0..nrows as i32 + 1)),
                lag: self.rng.gen_range(0..3),
                countdown: 0,
            })
            .collect();

        ctx.frame.clear();

        // Black background, green ramp, white-green head at the top.
        for i in 0..MATRIX_TRAIL_LEN as usize {
            let g = (255 * (i + 1) / (MATRIX_TRAIL_LEN as usize + 1)) as u8;
            ctx.palette.set_color(i + 1, 0, g, 0);
        }
        ctx.palette
            .set_color(MATRIX_TRAIL_LEN as usize + 1, 200, 255, 200);
    }

    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {
        self.drops.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();
        let nrows = nrows as i32;

        ctx.frame.clear();

        for (col, drop) in self.drops.iter_mut().enumerate() {
            if drop.countdown == 0 {
                drop.row += 1;
                drop.countdown = drop.lag;
            } else {
                drop.countdown -= 1;
            }

            if drop.row - MATRIX_TRAIL_LEN > nrows {
                drop.row = -(self.rng.gen_range(0..nrows + 1));
                drop.lag = self.rng.gen_range(0..3);
            }

            // Head glyph plus a trail fading to black above it.
            for back in 0..=MATRIX_TRAIL_LEN {
                let row = drop.row - back;
                let color = if back == 0 {
                    MATRIX_TRAIL_LEN + 1
                } else {
                    MATRIX_TRAIL_LEN - back + 1
                };
                if color <= 0 {
                    continue;
                }
                let ch = Self::glyph(&mut self.rng);
                ctx.frame
                    .set(col as i32, row, FramePoint::new(color, 0, ch, 0));
            }
        }

        ctx.console
            .add_line(&format!("columns={} / trail={}", ncols, MATRIX_TRAIL_LEN));
    }
}
