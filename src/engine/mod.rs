//! Engine module - frame data model, plugin contracts and the player.

mod animation;
mod console;
mod filter;
mod frame;
mod palette;
mod player;

pub use animation::*;
pub use console::*;
pub use filter::*;
pub use frame::*;
pub use palette::*;
pub use player::*;
