//! Built-in frame filters.

mod blur;
mod noise;

pub use blur::*;
pub use noise::*;

use crate::engine::Filter;

/// Look up a filter by its registry name.
pub fn create(name: &str) -> Option<Box<dyn Filter>> {
    match name {
        "blur" => Some(Box::new(Blur::new())),
        "noise" => Some(Box::new(Noise::new())),
        _ => None,
    }
}

/// Registry names accepted by [`create`], for usage text.
pub const NAMES: &[&str] = &["blur", "noise"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_every_name() {
        for name in NAMES {
            assert!(create(name).is_some());
        }
        assert!(create("sharpen").is_none());
    }
}
