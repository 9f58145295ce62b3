//! Flicker - real-time character-cell animation playback.
//!
//! A small engine for palette-indexed pixel animations rendered as
//! character cells. Animations draw into a [`engine::Frame`] through the
//! [`engine::Animation`] contract; the [`engine::Player`] paces frames
//! against a target rate and pushes them through an optional
//! [`engine::Filter`] to a pluggable [`engine::Backend`].
//!
//! # Architecture
//!
//! - `engine`: frame data model, plugin contracts and the player
//! - `animations`: the built-in animation variants
//! - `filters`: whole-frame post-processing effects
//! - `backends`: terminal and headless output
//! - `config`: JSON run configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use flicker::{
//!     animations::LifeGame,
//!     backends::HeadlessBackend,
//!     engine::{AnimationHost, Console, Player},
//! };
//!
//! let host = AnimationHost::new(Box::new(LifeGame::new()));
//! let backend = HeadlessBackend::new(80, 24);
//! let frames = backend.frames();
//!
//! let mut player = Player::new(host, Console::new(4), Box::new(backend));
//! let stop = player.stop_handle();
//!
//! player.screen_initialize().unwrap();
//! stop.store(true, std::sync::atomic::Ordering::Relaxed);
//! player.play().unwrap();
//! player.screen_finish();
//!
//! println!("recorded {} frames", frames.lock().unwrap().len());
//! ```

pub mod animations;
pub mod backends;
pub mod config;
pub mod engine;
pub mod filters;

// Re-export commonly used types
pub use config::RunConfig;
pub use engine::{Animation, AnimationHost, Backend, Console, Filter, Frame, Palette, Player};
