//! Headless backend - records rendered frames in memory.
//!
//! Useful for scripted runs and integration tests: playback happens at
//! full engine fidelity but nothing touches a terminal.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::engine::{Backend, BackendError, Console, Frame, Palette, ScreenGeometry};

pub struct HeadlessBackend {
    cols: usize,
    rows: usize,
    console_lines: usize,
    frames: Arc<Mutex<Vec<Frame>>>,
    console_snapshots: Arc<Mutex<Vec<Vec<String>>>>,
    palette: Palette,
}

impl HeadlessBackend {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            console_lines: 0,
            frames: Arc::new(Mutex::new(Vec::new())),
            console_snapshots: Arc::new(Mutex::new(Vec::new())),
            palette: Palette::new(),
        }
    }

    /// Handle to the recorded frames; clone before handing the backend
    /// to a player.
    pub fn frames(&self) -> Arc<Mutex<Vec<Frame>>> {
        Arc::clone(&self.frames)
    }

    /// Handle to the console content captured at each refresh.
    pub fn console_snapshots(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.console_snapshots)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Backend for HeadlessBackend {
    fn description(&self) -> &str {
        "headless (in-memory recorder)"
    }

    fn screen_initialize(&mut self, console_lines: usize) -> Result<ScreenGeometry, BackendError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(BackendError::Initialize(format!(
                "degenerate screen size {}x{}",
                self.cols, self.rows
            )));
        }

        self.console_lines = console_lines;
        debug!("headless screen {}x{}", self.cols, self.rows);

        Ok(ScreenGeometry {
            screen_cols: self.cols,
            screen_rows: self.rows,
            real_cols: self.cols,
            real_rows: self.rows + console_lines,
            console_col: 0,
            console_row: self.rows,
            console_cols: self.cols,
            console_rows: console_lines,
        })
    }

    fn screen_finish(&mut self) {}

    fn set_palette(&mut self, palette: &Palette) {
        self.palette.copy_from(palette);
    }

    fn render_frame(&mut self, frame: &Frame) -> Result<(), BackendError> {
        self.frames.lock().map_err(poisoned)?.push(frame.clone());
        Ok(())
    }

    fn refresh_console(&mut self, console: &Console) {
        let snapshot: Vec<String> = console.lines().map(str::to_owned).collect();
        if let Ok(mut all) = self.console_snapshots.lock() {
            all.push(snapshot);
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BackendError {
    BackendError::Render("frame recorder lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animations::LifeGame;
    use crate::engine::{AnimationHost, Console, Player};
    use crate::filters::Blur;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_geometry_reserves_console_rows() {
        let mut backend = HeadlessBackend::new(40, 20);
        let geo = backend.screen_initialize(3).unwrap();

        assert_eq!(geo.screen_rows, 20);
        assert_eq!(geo.real_rows, 23);
        assert_eq!(geo.console_row, 20);
    }

    #[test]
    fn test_degenerate_size_is_rejected() {
        let mut backend = HeadlessBackend::new(0, 20);
        assert!(backend.screen_initialize(2).is_err());
    }

    #[test]
    fn test_full_playback_records_frames() {
        let backend = HeadlessBackend::new(24, 16);
        let frames = backend.frames();
        let snapshots = backend.console_snapshots();

        let stop = Arc::new(AtomicBool::new(false));
        let host = AnimationHost::new(Box::new(LifeGame::seeded(77)));
        let mut player = Player::new(host, Console::new(3), Box::new(backend))
            .with_filter(Box::new(Blur::new()))
            .with_stop_flag(Arc::clone(&stop));

        // High target rate keeps each iteration's sleep negligible while
        // the watcher thread waits to raise the stop flag.
        player.set_fps(1000.0);
        player.screen_initialize().unwrap();

        let counter = Arc::clone(&frames);
        let watcher = std::thread::spawn({
            let stop = Arc::clone(&stop);
            move || {
                while counter.lock().unwrap().len() < 5 {
                    std::thread::yield_now();
                }
                stop.store(true, Ordering::Relaxed);
            }
        });

        player.play().unwrap();
        watcher.join().unwrap();
        player.screen_finish();

        assert!(frames.lock().unwrap().len() >= 5);
        let snaps = snapshots.lock().unwrap();
        assert!(!snaps.is_empty());
        assert!(snaps
            .last()
            .unwrap()
            .iter()
            .any(|line| line.starts_with("Player:")));
    }
}
