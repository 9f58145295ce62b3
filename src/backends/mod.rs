//! Output backends.

mod headless;
mod term;

pub use headless::*;
pub use term::*;

use crate::engine::Backend;

/// Look up a backend by its registry name. `cols` and `rows` size the
/// headless grid; the terminal backend measures the real device instead.
pub fn create(name: &str, cols: usize, rows: usize) -> Option<Box<dyn Backend>> {
    match name {
        "term" => Some(Box::new(TermBackend::new())),
        "headless" => Some(Box::new(HeadlessBackend::new(cols, rows))),
        _ => None,
    }
}

/// Registry names accepted by [`create`], for usage text.
pub const NAMES: &[&str] = &["term", "headless"];
