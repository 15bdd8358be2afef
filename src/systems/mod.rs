//! Exploration-mode game systems organized by domain.
//!
//! - `combat`: monster strikes against the player
//! - `experience`: exp, leveling and battle reward application

pub mod combat;
pub mod experience;

pub use combat::{basic_damage, strike_player};
pub use experience::{apply_level_ups, exp_for_level, exp_progress, grant_exp};
