//! Monster simulation core: AI, species behavior, spawning, and a
//! turn-based battle resolver driven by a fixed-step game loop.

pub mod ai;
pub mod battle;
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod math;
pub mod monsters;
pub mod spawning;
pub mod systems;
pub mod time_system;

pub use config::GameConfig;
pub use engine::{GameEngine, GameMode};
pub use error::{BattleError, ConfigError};
pub use events::{EventQueue, GameEvent};
