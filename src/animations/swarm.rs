//! Swarm - a cloud of bees steering toward a wandering target.
//!
//! Each bee holds a heading and a speed; every frame it measures the
//! bearing to the target and either attacks (closes in) or evades
//! (veers off) depending on how near it already is. Plotted on a
//! toroidal frame so the swarm can spill over the edges.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animation, AnimationContext, BorderMode, FramePoint};

const SWARM_NAME: &str = "Swarm";
const SWARM_DEFAULT_FPS: f64 = 2.0;
const SWARM_BEES: usize = 400;

const SWARM_MIN_SPEED: f64 = 50.0;
const SWARM_MAX_SPEED: f64 = 200.0;
const SWARM_MAX_ACCEL: f64 = 25.0;
const SWARM_MAX_TURN: f64 = PI;

/// Bees closer than this break off.
const SWARM_INNER_RADIUS: f64 = 5.0;
/// Bees farther than this resume the chase.
const SWARM_OUTER_RADIUS: f64 = 64.0;

/// Simulation timestep per frame.
const SWARM_DT: f64 = 0.02;

#[derive(Clone, Copy, PartialEq, Eq)]
enum BeeMode {
    Attack,
    Evade,
}

struct Bee {
    x: f64,
    y: f64,
    theta: f64,
    speed: f64,
    mode: BeeMode,
}

pub struct Swarm {
    rng: SmallRng,
    bees: Vec<Bee>,
    target_x: f64,
    target_y: f64,
}

impl Swarm {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            bees: Vec::new(),
            target_x: 0.0,
            target_y: 0.0,
        }
    }

    /// Fold an angle into [-pi, pi].
    fn wrap_angle(mut a: f64) -> f64 {
        while a > PI {
            a -= 2.0 * PI;
        }
        while a < -PI {
            a += 2.0 * PI;
        }
        a
    }
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Swarm {
    fn name(&self) -> &str {
        SWARM_NAME
    }

    fn default_fps(&self) -> f64 {
        SWARM_DEFAULT_FPS
    }

    fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();
        let (w, h) = (ncols as f64, nrows as f64);

        self.target_x = w / 2.0;
        self.target_y = h / 2.0;

        self.bees = (0..SWARM_BEES)
            .map(|_| Bee {
                x: self.rng.gen_range(0.0..w),
                y: self.rng.gen_range(0.0..h),
                theta: self.rng.gen_range(0.0..2.0 * PI),
                speed: self.rng.gen_range(SWARM_MIN_SPEED..SWARM_MAX_SPEED),
                mode: BeeMode::Attack,
            })
            .collect();

        ctx.frame.set_border_mode(BorderMode::Toroidal);
        ctx.frame.clear();
    }

    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {
        self.bees.clear();
    }

    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        let (ncols, nrows) = ctx.frame.dimensions();
        let (w, h) = (ncols as f64, nrows as f64);

        ctx.frame.set_border_mode(BorderMode::Toroidal);
        ctx.frame.clear();

        // Target drifts a little every frame.
        self.target_x += self.rng.gen_range(-2.0..=2.0);
        self.target_y += self.rng.gen_range(-1.0..=1.0);
        self.target_x = self.target_x.rem_euclid(w);
        self.target_y = self.target_y.rem_euclid(h);

        let mut attacking = 0usize;

        for bee in &mut self.bees {
            let dx = self.target_x - bee.x;
            let dy = self.target_y - bee.y;
            let dist = (dx * dx + dy * dy).sqrt();

            match bee.mode {
                BeeMode::Attack if dist < SWARM_INNER_RADIUS => bee.mode = BeeMode::Evade,
                BeeMode::Evade if dist > SWARM_OUTER_RADIUS => bee.mode = BeeMode::Attack,
                _ => {}
            }

            // Bearing to the target relative to the current heading.
            let phi = Self::wrap_angle(dy.atan2(dx) - bee.theta);

            let (accel, turn) = match bee.mode {
                BeeMode::Attack => (phi.cos() * SWARM_MAX_ACCEL, phi.sin() * SWARM_MAX_TURN),
                BeeMode::Evade => (phi.sin() * SWARM_MAX_ACCEL, phi.cos() * SWARM_MAX_TURN),
            };

            // Scale acceleration by the remaining speed headroom.
            let k = if accel > 0.0 {
                (SWARM_MAX_SPEED - bee.speed) / (SWARM_MAX_SPEED - SWARM_MIN_SPEED)
            } else {
                (bee.speed - SWARM_MIN_SPEED) / (SWARM_MAX_SPEED - SWARM_MIN_SPEED)
            };
            bee.speed = (bee.speed + k * accel).clamp(SWARM_MIN_SPEED, SWARM_MAX_SPEED);
            bee.theta = (bee.theta + turn * SWARM_DT).rem_euclid(2.0 * PI);

            bee.x += bee.speed * SWARM_DT * bee.theta.cos();
            bee.y += bee.speed * SWARM_DT * bee.theta.sin();

            let (color, ch) = match bee.mode {
                BeeMode::Attack => {
                    attacking += 1;
                    (11, b'x')
                }
                BeeMode::Evade => (3, b'o'),
            };
            ctx.frame
                .set(bee.x as i32, bee.y as i32, FramePoint::new(color, 0, ch, 0));
        }

        ctx.frame.set(
            self.target_x as i32,
            self.target_y as i32,
            FramePoint::new(15, 0, b'@', 0),
        );

        ctx.console.add_line(&format!(
            "bees={} / attacking={} / evading={}",
            self.bees.len(),
            attacking,
            self.bees.len() - attacking
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnimationHost, Console, Frame, Palette};

    #[test]
    fn test_wrap_angle_folds_into_half_turn() {
        assert!((Swarm::wrap_angle(3.0 * PI) - PI).abs() < 1e-9);
        assert!((Swarm::wrap_angle(-3.0 * PI) + PI).abs() < 1e-9);
        assert_eq!(Swarm::wrap_angle(0.5), 0.5);
    }

    #[test]
    fn test_speeds_stay_clamped() {
        let mut swarm = Swarm::seeded(6);
        let mut frame = Frame::new(80, 40);
        let mut palette = Palette::new();
        let mut con = Console::new(2);

        let mut ctx = AnimationContext {
            frame: &mut frame,
            palette: &mut palette,
            console: &mut con,
        };
        swarm.initialize(&mut ctx);
        for _ in 0..50 {
            swarm.next_frame(&mut ctx);
        }

        assert!(swarm
            .bees
            .iter()
            .all(|b| (SWARM_MIN_SPEED..=SWARM_MAX_SPEED).contains(&b.speed)));
    }

    #[test]
    fn test_swarm_closes_on_the_target() {
        let mut swarm = Swarm::seeded(12);
        let mut frame = Frame::new(200, 100);
        let mut palette = Palette::new();
        let mut con = Console::new(2);

        let mut ctx = AnimationContext {
            frame: &mut frame,
            palette: &mut palette,
            console: &mut con,
        };
        swarm.initialize(&mut ctx);

        let mean_dist = |s: &Swarm| {
            s.bees
                .iter()
                .map(|b| {
                    let dx = s.target_x - b.x;
                    let dy = s.target_y - b.y;
                    (dx * dx + dy * dy).sqrt()
                })
                .sum::<f64>()
                / s.bees.len() as f64
        };

        let before = mean_dist(&swarm);
        for _ in 0..100 {
            swarm.next_frame(&mut ctx);
        }
        assert!(mean_dist(&swarm) < before);
    }

    #[test]
    fn test_frame_goes_toroidal() {
        let mut host = AnimationHost::new(Box::new(Swarm::seeded(1)));
        let mut con = Console::new(2);
        host.initialize(40, 20, &mut con);
        host.next_frame(&mut con);

        assert_eq!(host.frame().unwrap().border_mode(), BorderMode::Toroidal);
    }
}
