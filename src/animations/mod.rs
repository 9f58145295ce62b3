//! Built-in animation variants.

mod fern;
mod fire;
mod life;
mod lissajous;
mod matrix;
mod spirograph;
mod starfield;
mod swarm;
mod tvstatic;

pub use fern::*;
pub use fire::*;
pub use life::*;
pub use lissajous::*;
pub use matrix::*;
pub use spirograph::*;
pub use starfield::*;
pub use swarm::*;
pub use tvstatic::*;

use crate::engine::Animation;

/// Look up an animation variant by its registry name.
pub fn create(name: &str) -> Option<Box<dyn Animation>> {
    match name {
        "fern" => Some(Box::new(FernFractal::new())),
        "fire" => Some(Box::new(Fire::new())),
        "life" => Some(Box::new(LifeGame::new())),
        "lissajous" => Some(Box::new(Lissajous::new())),
        "matrix" => Some(Box::new(Matrix::new())),
        "spirograph" => Some(Box::new(Spirograph::new())),
        "starfield" => Some(Box::new(Starfield::new())),
        "swarm" => Some(Box::new(Swarm::new())),
        "tvstatic" => Some(Box::new(TvStatic::new())),
        _ => None,
    }
}

/// Registry names accepted by [`create`], for usage text.
pub const NAMES: &[&str] = &[
    "fern",
    "fire",
    "life",
    "lissajous",
    "matrix",
    "spirograph",
    "starfield",
    "swarm",
    "tvstatic",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_every_name() {
        for name in NAMES {
            let anim = create(name).unwrap();
            assert!(!anim.name().is_empty());
            assert!(anim.default_fps() > 0.0);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!(create("plasma").is_none());
        assert!(create("").is_none());
    }
}
