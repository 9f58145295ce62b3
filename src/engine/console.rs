//! Console - bounded circular buffer of diagnostic text lines.
//!
//! Animations and the player append one formatted line per frame; backends
//! draw the buffer below the grid. The engine treats it as an opaque sink.

use std::collections::VecDeque;

/// Maximum width of one console line. Longer lines are truncated, not
/// rejected.
pub const CONSOLE_MAX_LINE_LEN: usize = 100;

/// Fixed-capacity scrollback of fixed-width text lines.
#[derive(Debug, Clone)]
pub struct Console {
    lines: VecDeque<String>,
    capacity: usize,
    color: i32,
    bgcolor: i32,
}

impl Console {
    /// Create a console holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            color: 0,
            bgcolor: 0,
        }
    }

    /// Maximum number of lines.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a line, evicting the oldest when full. Input is truncated to
    /// [`CONSOLE_MAX_LINE_LEN`] characters.
    pub fn add_line(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }

        let line: String = line.chars().take(CONSOLE_MAX_LINE_LEN).collect();

        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }

        self.lines.push_back(line);
    }

    /// Line at `idx` (0 = oldest), or `None` out of range.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Iterate lines oldest-first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of lines currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[inline]
    pub fn text_color(&self) -> i32 {
        self.color
    }

    pub fn set_text_color(&mut self, color: i32) {
        self.color = color;
    }

    #[inline]
    pub fn text_bgcolor(&self) -> i32 {
        self.bgcolor
    }

    pub fn set_text_bgcolor(&mut self, bgcolor: i32) {
        self.bgcolor = bgcolor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_iterate_in_order() {
        let mut con = Console::new(3);
        con.add_line("a");
        con.add_line("b");

        let lines: Vec<_> = con.lines().collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut con = Console::new(2);
        con.add_line("a");
        con.add_line("b");
        con.add_line("c");

        let lines: Vec<_> = con.lines().collect();
        assert_eq!(lines, vec!["b", "c"]);
        assert_eq!(con.len(), 2);
    }

    #[test]
    fn test_truncation() {
        let mut con = Console::new(1);
        let long = "x".repeat(500);
        con.add_line(&long);

        assert_eq!(con.line(0).unwrap().len(), CONSOLE_MAX_LINE_LEN);
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut con = Console::new(0);
        con.add_line("a");
        assert!(con.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut con = Console::new(4);
        con.add_line("a");
        con.clear();
        assert!(con.is_empty());
    }
}
