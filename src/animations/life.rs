//! Conway's Game of Life on a toroidal grid.
//!
//! `value` is the alive flag. Starts from a random 25% soup; each
//! generation is computed against the previous frame buffer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, BorderMode, Frame, FramePoint};

const LIFE_NAME: &str = "LifeGame";
const LIFE_DEFAULT_FPS: f64 = 10.0;
const LIFE_INITIAL_DENSITY_PCT: i32 = 25;

pub struct LifeGame {
    rng: SmallRng,
    prev: Option<Frame>,
    population: u32,
    generation: u32,
}

impl LifeGame {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            prev: None,
            population: 0,
            generation: 0,
        }
    }

    /// Replace the previous-generation buffer, e.g. to seed a known
    /// pattern.
    pub fn set_previous(&mut self, frame: Frame) {
        self.prev = Some(frame);
    }
}

impl Default for LifeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for LifeGame {
    fn name(&self) -> &str {
        LIFE_NAME
    }

    fn default_fps(&self) -> f64 {
        LIFE_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        let mut prev = ctx.frame.clone();
        prev.set_border_mode(BorderMode::Toroidal);
        prev.clear();

        self.population = 0;
        self.generation = 0;

        let (ncols, nrows) = prev.dimensions();
        for row in 0..nrows as i32 {
            for col in 0..ncols as i32 {
                let alive = self.rng.gen_range(0..100) < LIFE_INITIAL_DENSITY_PCT;
                let color = if alive { 2 } else { 7 };
                prev.set(col, row, FramePoint::new(color, 0, b'*', alive as i32));

                if alive {
                    self.population += 1;
                }
            }
        }

        self.prev = Some(prev);
    }

    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {
        self.prev = None;
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let Some(prev) = self.prev.as_mut() else {
            return;
        };

        ctx.frame.clear();
        ctx.frame.set_border_mode(prev.border_mode());

        let (ncols, nrows) = prev.dimensions();
        let mut population = 0;

        for row in 0..nrows as i32 {
            for col in 0..ncols as i32 {
                let mut neighbours = 0;
                for (dc, dr) in [
                    (-1, 1),
                    (0, 1),
                    (1, 1),
                    (-1, 0),
                    (1, 0),
                    (-1, -1),
                    (0, -1),
                    (1, -1),
                ] {
                    if prev.get(col + dc, row + dr).value != 0 {
                        neighbours += 1;
                    }
                }

                let was_alive = prev.get(col, row).value != 0;
                let alive = if was_alive {
                    neighbours == 2 || neighbours == 3
                } else {
                    neighbours == 3
                };

                if alive {
                    ctx.frame.set(col, row, FramePoint::new(10, 0, b'*', 1));
                    population += 1;
                }
            }
        }

        self.population = population;
        self.generation += 1;

        // cannot fail: prev was cloned from this frame
        let _ = prev.copy_from(ctx.frame);

        let total = ncols * nrows;
        ctx.console.add_line(&format!(
            "{}x{} / generation={} / alive={} / dead={} / total={}",
            ncols,
            nrows,
            self.generation,
            self.population,
            total as u32 - self.population,
            total
        ));
    }
}
