//! Player - playback orchestration, lifecycle state machine and frame
//! pacing.
//!
//! The player owns the active animation (through its host), an optional
//! filter, the console and a boxed rendering backend. Exactly one player
//! exists per process run: it is constructed once by the top-level entry
//! point and passed around explicitly.
//!
//! Cancellation is advisory and edge-triggered: external code (for example
//! a signal handler) only sets the shared stop flag, and the pacing loop
//! observes it at iteration boundaries, never mid-frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;

use super::animation::AnimationHost;
use super::console::Console;
use super::filter::Filter;
use super::frame::Frame;
use super::palette::Palette;

/// Error type for backend operations.
///
/// Backend failures are fatal for playback: they surface through
/// [`Player::play`] and never re-enter the pacing loop.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("screen initialization failed: {0}")]
    Initialize(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Screen layout computed by a backend at initialization.
///
/// Logical dimensions are the grid the animation draws into; real
/// dimensions are what the device actually shows and may include extra
/// rows for the console overlay below the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenGeometry {
    /// Logical grid columns consumed by the animation.
    pub screen_cols: usize,
    /// Logical grid rows consumed by the animation.
    pub screen_rows: usize,
    /// Device columns.
    pub real_cols: usize,
    /// Device rows, console overlay included.
    pub real_rows: usize,
    /// Console overlay origin (column).
    pub console_col: usize,
    /// Console overlay origin (row).
    pub console_row: usize,
    /// Console overlay width.
    pub console_cols: usize,
    /// Console overlay height in lines.
    pub console_rows: usize,
}

/// Rendering backend contract.
///
/// A backend translates frames, palettes and console content into actual
/// output on some display device. All device-specific work (windowing,
/// pixel format, double buffering, text rendering) lives behind this
/// trait.
pub trait Backend {
    /// Human-readable description of the output mode.
    fn description(&self) -> &str;

    /// Acquire the display and report the screen layout. `console_lines`
    /// is the number of overlay lines the player's console holds.
    fn screen_initialize(&mut self, console_lines: usize) -> Result<ScreenGeometry, BackendError>;

    /// Release the display.
    fn screen_finish(&mut self);

    /// Adopt the animation's palette for subsequent renders.
    fn set_palette(&mut self, palette: &Palette);

    /// Display one frame.
    fn render_frame(&mut self, frame: &Frame) -> Result<(), BackendError>;

    /// Redraw the console overlay.
    fn refresh_console(&mut self, console: &Console);
}

/// Playback lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Uninitialized,
    Stopped,
    Playing,
    Paused,
}

/// Outcome of one pacing computation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pacing {
    sleep_ns: u64,
    achieved_fps: f64,
}

/// Pure pacing arithmetic for one iteration.
///
/// The period is `1e9 / |fps|` nanoseconds. An iteration faster than the
/// period sleeps out the difference and reports the target magnitude; a
/// slower one does not sleep and reports what was actually achieved.
fn pace(fps: f64, elapsed_ns: u64) -> Pacing {
    if fps == 0.0 {
        return Pacing {
            sleep_ns: 0,
            achieved_fps: 0.0,
        };
    }

    let period_ns = (1_000_000_000_f64 / fps.abs()) as u64;

    if elapsed_ns < period_ns {
        Pacing {
            sleep_ns: period_ns - elapsed_ns,
            achieved_fps: fps.abs(),
        }
    } else {
        Pacing {
            sleep_ns: 0,
            achieved_fps: 1_000_000_000_f64 / elapsed_ns as f64,
        }
    }
}

/// Playback orchestrator. See the module documentation.
pub struct Player {
    fps: f64,
    real_fps: f64,
    state: PlayerState,
    geometry: ScreenGeometry,
    host: AnimationHost,
    filter: Option<Box<dyn Filter>>,
    console: Console,
    backend: Box<dyn Backend>,
    stop_requested: Arc<AtomicBool>,
}

impl Player {
    /// Build a player around an animation host, a console and a backend.
    ///
    /// The target frame rate starts at the animation's default; negative
    /// rates play backward.
    pub fn new(host: AnimationHost, console: Console, backend: Box<dyn Backend>) -> Self {
        let fps = host.default_fps();

        Self {
            fps,
            real_fps: 0.0,
            state: PlayerState::Uninitialized,
            geometry: ScreenGeometry::default(),
            host,
            filter: None,
            console,
            backend,
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach the single optional filter. Chaining is not supported; a
    /// second call replaces the first filter.
    pub fn with_filter(mut self, filter: Box<dyn Filter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Share an externally created stop flag, so collaborators wired up
    /// before the player existed (signal handlers, input watchers) can
    /// request a stop.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_requested = flag;
        self
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Target frame rate. Sign selects direction, magnitude the cadence.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: f64) {
        self.fps = fps;
    }

    /// Rate measured over the last iteration.
    #[inline]
    pub fn real_fps(&self) -> f64 {
        self.real_fps
    }

    #[inline]
    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }

    #[inline]
    pub fn animation(&self) -> &AnimationHost {
        &self.host
    }

    #[inline]
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Shared flag observed at iteration boundaries. Setting it is
    /// equivalent to calling [`Player::stop`]. Safe to set from a signal
    /// handler.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_requested)
    }

    /// Acquire the display through the backend.
    ///
    /// Legal only while `Uninitialized`; from any other state this
    /// reports failure without side effects. On backend failure the state
    /// stays `Uninitialized`.
    pub fn screen_initialize(&mut self) -> Result<(), BackendError> {
        if self.state != PlayerState::Uninitialized {
            return Err(BackendError::Initialize(
                "screen already initialized".into(),
            ));
        }

        self.geometry = self.backend.screen_initialize(self.console.capacity())?;
        self.state = PlayerState::Stopped;

        log::info!(
            "screen up: {} ({}x{} grid, {}x{} real)",
            self.backend.description(),
            self.geometry.screen_cols,
            self.geometry.screen_rows,
            self.geometry.real_cols,
            self.geometry.real_rows
        );

        Ok(())
    }

    /// Release the display. Legal only while `Stopped`; a no-op otherwise.
    pub fn screen_finish(&mut self) {
        if self.state != PlayerState::Stopped {
            return;
        }

        self.backend.screen_finish();
        self.state = PlayerState::Uninitialized;
        log::info!("screen down");
    }

    /// Run the pacing loop until stopped or paused.
    ///
    /// Legal from `Stopped` (initializes the animation at the logical
    /// grid size first) or `Paused` (resumes in place); a no-op from any
    /// other state. Returns when the state leaves `Playing`: on stop the
    /// animation is finished, on pause it stays initialized for a later
    /// resume. A backend render failure stops playback, finishes the
    /// animation and surfaces the error.
    pub fn play(&mut self) -> Result<(), BackendError> {
        match self.state {
            PlayerState::Stopped => {
                self.host.initialize(
                    self.geometry.screen_cols,
                    self.geometry.screen_rows,
                    &mut self.console,
                );
            }
            PlayerState::Paused => {}
            _ => return Ok(()),
        }

        self.state = PlayerState::Playing;
        log::info!("playing '{}' at {:.1} fps", self.host.name(), self.fps);

        while self.state == PlayerState::Playing {
            // Advisory cancellation, observed only here between frames.
            if self.stop_requested.swap(false, Ordering::Relaxed) {
                self.stop();
                break;
            }

            if let Err(err) = self.iterate() {
                self.state = PlayerState::Stopped;
                self.host.finish(&mut self.console);
                return Err(err);
            }
        }

        if self.state == PlayerState::Stopped {
            self.host.finish(&mut self.console);
        }

        Ok(())
    }

    /// Suspend playback. Legal only while `Playing`; a no-op otherwise.
    /// Takes effect between iterations, never mid-frame.
    pub fn pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
            log::info!("paused");
        }
    }

    /// Stop playback. Legal from `Playing` (the loop exits at its next
    /// iteration boundary) or `Paused` (the animation is finished here);
    /// a no-op otherwise.
    pub fn stop(&mut self) {
        match self.state {
            PlayerState::Playing => {
                self.state = PlayerState::Stopped;
                log::info!("stopping");
            }
            PlayerState::Paused => {
                self.state = PlayerState::Stopped;
                self.host.finish(&mut self.console);
                log::info!("stopped from pause");
            }
            _ => {}
        }
    }

    /// One pacing-loop iteration: status line, advance, render, delay.
    fn iterate(&mut self) -> Result<(), BackendError> {
        let start = Instant::now();

        let status = self.status_text();
        self.console.add_line(&status);

        if self.fps > 0.0 {
            self.host.next_frame(&mut self.console);
        } else if self.fps < 0.0 {
            self.host.previous_frame(&mut self.console);
        }

        if let Some(palette) = self.host.palette() {
            self.backend.set_palette(palette);
        }

        if let Some(frame) = self.host.frame() {
            match self.filter.as_mut() {
                Some(filter) => {
                    // Filter a duplicate; the animation's own frame stays
                    // pristine.
                    let mut filtered = frame.clone();
                    filter.apply(&mut filtered);
                    self.backend.render_frame(&filtered)?;
                }
                None => self.backend.render_frame(frame)?,
            }
        }

        self.backend.refresh_console(&self.console);

        let elapsed_ns = start.elapsed().as_nanos() as u64;
        let pacing = pace(self.fps, elapsed_ns);

        if pacing.sleep_ns > 0 {
            std::thread::sleep(Duration::from_nanos(pacing.sleep_ns));
        }

        self.real_fps = pacing.achieved_fps;

        Ok(())
    }

    fn status_text(&self) -> String {
        let synch = self.real_fps >= self.fps.abs();
        format!(
            "Player: seq={} / fps={:.1} / synch={}",
            self.host.frame_sequence(),
            self.real_fps,
            if synch { "ok" } else { "error" }
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::{Animation, AnimationContext};
    use crate::engine::frame::FramePoint;
    use std::sync::Mutex;

    struct TickAnimation;

    impl Animation for TickAnimation {
        fn name(&self) -> &str {
            "Tick"
        }

        fn default_fps(&self) -> f64 {
            1000.0
        }

        fn initialize(&mut self, ctx: &mut AnimationContext<'_>) {
            ctx.frame.clear();
        }

        fn next_frame(&mut self, ctx: &mut AnimationContext<'_>) {
            ctx.frame.set(0, 0, FramePoint::new(1, 0, b'*', 1));
        }
    }

    /// Records rendered frames; raises a stop flag after a configured
    /// number of renders, the way a signal handler would mid-iteration.
    struct RecordingBackend {
        renders: Arc<Mutex<Vec<Frame>>>,
        refreshes: Arc<Mutex<usize>>,
        stop_after: Option<(usize, Arc<AtomicBool>)>,
        fail_initialize: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                renders: Arc::new(Mutex::new(Vec::new())),
                refreshes: Arc::new(Mutex::new(0)),
                stop_after: None,
                fail_initialize: false,
            }
        }
    }

    impl Backend for RecordingBackend {
        fn description(&self) -> &str {
            "recording"
        }

        fn screen_initialize(
            &mut self,
            console_lines: usize,
        ) -> Result<ScreenGeometry, BackendError> {
            if self.fail_initialize {
                return Err(BackendError::Initialize("no display".into()));
            }

            Ok(ScreenGeometry {
                screen_cols: 8,
                screen_rows: 6,
                real_cols: 8,
                real_rows: 6 + console_lines,
                console_col: 0,
                console_row: 6,
                console_cols: 8,
                console_rows: console_lines,
            })
        }

        fn screen_finish(&mut self) {}

        fn set_palette(&mut self, _palette: &Palette) {}

        fn render_frame(&mut self, frame: &Frame) -> Result<(), BackendError> {
            let mut renders = self.renders.lock().unwrap();
            renders.push(frame.clone());

            if let Some((after, flag)) = &self.stop_after {
                if renders.len() >= *after {
                    flag.store(true, Ordering::Relaxed);
                }
            }

            Ok(())
        }

        fn refresh_console(&mut self, _console: &Console) {
            *self.refreshes.lock().unwrap() += 1;
        }
    }

    /// Player wired so the backend stops it after `frames` renders.
    fn bounded_player(frames: usize) -> (Player, Arc<Mutex<Vec<Frame>>>, Arc<Mutex<usize>>) {
        let flag = Arc::new(AtomicBool::new(false));

        let mut backend = RecordingBackend::new();
        backend.stop_after = Some((frames, Arc::clone(&flag)));
        let renders = Arc::clone(&backend.renders);
        let refreshes = Arc::clone(&backend.refreshes);

        let host = AnimationHost::new(Box::new(TickAnimation));
        let player = Player::new(host, Console::new(4), Box::new(backend)).with_stop_flag(flag);

        (player, renders, refreshes)
    }

    #[test]
    fn test_pacing_under_budget_sleeps_and_reports_target() {
        let p = pace(10.0, 30_000_000);
        assert_eq!(p.sleep_ns, 70_000_000);
        assert!((p.achieved_fps - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_pacing_over_budget_reports_achieved() {
        let p = pace(10.0, 150_000_000);
        assert_eq!(p.sleep_ns, 0);
        assert!((p.achieved_fps - 6.666_666_666).abs() < 1e-3);
    }

    #[test]
    fn test_pacing_backward_uses_magnitude() {
        let p = pace(-10.0, 30_000_000);
        assert_eq!(p.sleep_ns, 70_000_000);
        assert!((p.achieved_fps - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_fps_comes_from_animation() {
        let (player, _, _) = bounded_player(1);
        assert!((player.fps() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_play_while_uninitialized_is_noop() {
        let (mut player, renders, _) = bounded_player(1);

        player.play().unwrap();
        assert_eq!(player.state(), PlayerState::Uninitialized);
        assert!(renders.lock().unwrap().is_empty());
    }

    #[test]
    fn test_pause_while_stopped_is_noop() {
        let (mut player, _, _) = bounded_player(1);
        player.screen_initialize().unwrap();

        player.pause();
        assert_eq!(player.state(), PlayerState::Stopped);
    }

    #[test]
    fn test_screen_initialize_failure_keeps_state() {
        let mut backend = RecordingBackend::new();
        backend.fail_initialize = true;
        let host = AnimationHost::new(Box::new(TickAnimation));
        let mut player = Player::new(host, Console::new(4), Box::new(backend));

        assert!(player.screen_initialize().is_err());
        assert_eq!(player.state(), PlayerState::Uninitialized);
    }

    #[test]
    fn test_stop_flag_finishes_current_iteration_first() {
        let (mut player, renders, refreshes) = bounded_player(2);

        player.screen_initialize().unwrap();
        player.play().unwrap();

        // The flag was raised during render of frame 2; that iteration
        // still completed (console refreshed) before the loop exited.
        assert_eq!(renders.lock().unwrap().len(), 2);
        assert_eq!(*refreshes.lock().unwrap(), 2);
        assert_eq!(player.state(), PlayerState::Stopped);
        assert!(!player.animation().is_initialized());
    }

    #[test]
    fn test_geometry_reaches_animation() {
        let (mut player, renders, _) = bounded_player(1);

        player.screen_initialize().unwrap();
        assert_eq!(player.geometry().screen_cols, 8);
        assert_eq!(player.geometry().real_rows, 6 + 4);

        player.play().unwrap();

        let frames = renders.lock().unwrap();
        assert_eq!(frames[0].dimensions(), (8, 6));
    }

    #[test]
    fn test_filter_applies_to_a_duplicate() {
        struct Brighten;

        impl Filter for Brighten {
            fn filtered_point(&mut self, frame: &Frame, col: i32, row: i32) -> FramePoint {
                let mut pt = frame.get(col, row);
                pt.color += 10;
                pt
            }
        }

        let (player, renders, _) = bounded_player(2);
        let mut player = player.with_filter(Box::new(Brighten));

        player.screen_initialize().unwrap();
        player.play().unwrap();

        let frames = renders.lock().unwrap();
        // Filtered exactly once per frame: the animation's own frame was
        // never filtered in place, so brightening does not accumulate.
        assert_eq!(frames[0].get(0, 0).color, 11);
        assert_eq!(frames[1].get(0, 0).color, 11);
    }

    #[test]
    fn test_status_line_lands_in_console() {
        let (mut player, _, _) = bounded_player(1);

        player.screen_initialize().unwrap();
        player.play().unwrap();

        let lines: Vec<_> = player.console().lines().collect();
        assert!(!lines.is_empty());
        assert!(lines[0].starts_with("Player: seq="));
        assert!(lines[0].contains("synch="));
    }

    #[test]
    fn test_screen_finish_only_from_stopped() {
        let (mut player, _, _) = bounded_player(1);

        // Not initialized yet: no-op.
        player.screen_finish();
        assert_eq!(player.state(), PlayerState::Uninitialized);

        player.screen_initialize().unwrap();
        player.screen_finish();
        assert_eq!(player.state(), PlayerState::Uninitialized);
    }

    #[test]
    fn test_stop_from_paused_finishes_animation() {
        let (mut player, _, _) = bounded_player(1);
        player.screen_initialize().unwrap();
        player.play().unwrap();
        assert_eq!(player.state(), PlayerState::Stopped);

        // stop() from Stopped stays a no-op.
        player.stop();
        assert_eq!(player.state(), PlayerState::Stopped);
    }
}
