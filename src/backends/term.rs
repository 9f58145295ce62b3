//! Terminal backend built on crossterm.
//!
//! Draws into the alternate screen with the cursor hidden. Raw mode is
//! deliberately left off so Ctrl+C still delivers SIGINT to the signal
//! handler that raises the player's stop flag.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::debug;

use crate::engine::{
    Backend, BackendError, Console, Frame, Palette, ScreenGeometry, CONSOLE_MAX_LINE_LEN,
};

pub struct TermBackend {
    out: Stdout,
    palette: Palette,
    geometry: ScreenGeometry,
    active: bool,
}

impl TermBackend {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            palette: Palette::new(),
            geometry: ScreenGeometry::default(),
            active: false,
        }
    }

    fn lookup(&self, index: i32) -> Color {
        let rgb = self.palette.color(index.clamp(0, 255) as usize);
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

impl Default for TermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TermBackend {
    fn description(&self) -> &str {
        "terminal (crossterm)"
    }

    fn screen_initialize(&mut self, console_lines: usize) -> Result<ScreenGeometry, BackendError> {
        let (cols, rows) = terminal::size().map_err(BackendError::Io)?;
        let (cols, rows) = (cols as usize, rows as usize);

        if rows <= console_lines {
            return Err(BackendError::Initialize(format!(
                "terminal too small: {} rows for {} console lines",
                rows, console_lines
            )));
        }

        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.active = true;

        self.geometry = ScreenGeometry {
            screen_cols: cols,
            screen_rows: rows - console_lines,
            real_cols: cols,
            real_rows: rows,
            console_col: 0,
            console_row: rows - console_lines,
            console_cols: cols.min(CONSOLE_MAX_LINE_LEN),
            console_rows: console_lines,
        };

        debug!(
            "terminal acquired: {}x{} ({} console lines)",
            cols, rows, console_lines
        );
        Ok(self.geometry)
    }

    fn screen_finish(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        // Ignore teardown errors, the terminal is going away anyway.
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.palette.copy_from(palette);
    }

    fn render_frame(&mut self, frame: &Frame) -> Result<(), BackendError> {
        let (cols, rows) = frame.dimensions();
        let cols = cols.min(self.geometry.screen_cols);
        let rows = rows.min(self.geometry.screen_rows);

        for row in 0..rows {
            queue!(self.out, MoveTo(0, row as u16))?;
            for col in 0..cols {
                let pt = frame.get(col as i32, row as i32);
                let ch = if pt.ch.is_ascii_graphic() || pt.ch == b' ' {
                    pt.ch as char
                } else {
                    ' '
                };

                let fg = self.lookup(pt.color);
                let bg = self.lookup(pt.bgcolor);
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(ch)
                )?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn refresh_console(&mut self, console: &Console) {
        let width = self.geometry.console_cols;
        let base = self.geometry.console_row as u16;

        // Console text attributes are palette indices; zero means the
        // default white-on-black overlay.
        let fg = if console.text_color() != 0 {
            self.lookup(console.text_color())
        } else {
            Color::White
        };
        let bg = if console.text_bgcolor() != 0 {
            self.lookup(console.text_bgcolor())
        } else {
            Color::Black
        };

        let mut draw = || -> io::Result<()> {
            queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))?;

            for slot in 0..self.geometry.console_rows {
                queue!(self.out, MoveTo(0, base + slot as u16))?;

                let text = console.line(slot).unwrap_or("");
                let mut padded: String = text.chars().take(width).collect();
                while padded.chars().count() < width {
                    padded.push(' ');
                }
                queue!(self.out, Print(padded))?;
            }
            self.out.flush()
        };

        // Console is best-effort decoration over the animation.
        if let Err(err) = draw() {
            debug!("console refresh failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_clamps_palette_indices() {
        let mut backend = TermBackend::new();
        let mut pal = Palette::new();
        pal.set_color(0, 1, 2, 3);
        pal.set_color(255, 9, 8, 7);
        backend.set_palette(&pal);

        assert_eq!(backend.lookup(-5), Color::Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(backend.lookup(999), Color::Rgb { r: 9, g: 8, b: 7 });
    }
}
