//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Values that designers tune per session live in `crate::config` instead.

mod ai;
mod combat;
mod enemies;
mod gameplay;
mod time;
mod world;

pub use ai::*;
pub use combat::*;
pub use enemies::*;
pub use gameplay::*;
pub use time::*;
pub use world::*;
