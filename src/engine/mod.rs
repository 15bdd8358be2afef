//! Game engine - owns all game state and drives the fixed-step simulation.
//!
//! The engine handles:
//! - Exploration (player movement, monster AI, spawning)
//! - Switching into and out of battles
//! - Event collection for the application shell
//!
//! The application shell (main.rs) only supplies elapsed real time, movement
//! input and battle choices.

pub mod encounter;
mod game_state;

pub use game_state::GameState;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::battle::BattleSystem;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::{EventQueue, GameEvent};
use crate::game_loop::FixedTimestep;

/// Which simulation runs on each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Free movement; monsters think and spawn
    Exploration,
    /// Turn-based battle; the exploration clock is frozen
    Battle,
    /// The player is dead; nothing advances
    GameOver,
}

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    /// Current game mode
    pub mode: GameMode,

    /// Exploration state (player, monsters, clock)
    pub state: GameState,

    /// Active battle, only in `GameMode::Battle`
    battle: Option<BattleSystem>,

    /// Event queue for game events
    pub events: EventQueue,

    config: GameConfig,

    timestep: FixedTimestep,

    /// Seeds each battle's own rng
    rng: StdRng,

    /// Movement direction held by the player
    input: Vec2,
}

impl GameEngine {
    /// Validate `config` and start a session. The same seed replays the same game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new(&config, "hero", rng.gen());
        info!(fps = config.fps, seed, "Engine started");
        Ok(Self {
            mode: GameMode::Exploration,
            state,
            battle: None,
            events: EventQueue::new(),
            timestep: FixedTimestep::new(config.fps),
            config,
            rng,
            input: Vec2::ZERO,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Set the movement direction used during exploration
    pub fn set_movement_input(&mut self, direction: Vec2) {
        self.input = direction;
    }

    pub fn battle(&self) -> Option<&BattleSystem> {
        self.battle.as_ref()
    }

    /// The active battle, for feeding player choices
    pub fn battle_mut(&mut self) -> Option<&mut BattleSystem> {
        self.battle.as_mut()
    }

    /// Feed one frame of real time. Runs as many fixed steps as have
    /// accumulated and returns how many ran.
    pub fn frame(&mut self, real_dt: f32) -> u32 {
        puffin::profile_function!();
        let mut timestep = self.timestep;
        let steps = timestep.run(real_dt, |dt| self.step(dt));
        self.timestep = timestep;
        steps
    }

    /// Leftover fraction of a step, for render interpolation
    pub fn interpolation_alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    /// Advance the active simulation by one fixed step
    pub fn step(&mut self, dt: f32) {
        match self.mode {
            GameMode::Exploration => self.step_exploration(dt),
            GameMode::Battle => self.step_battle(dt),
            GameMode::GameOver => {}
        }
    }

    fn step_exploration(&mut self, dt: f32) {
        puffin::profile_function!();
        let state = &mut self.state;
        state.player.move_by_input(self.input, dt);
        state.clock.advance(dt);
        let game_time = state.clock.time;
        state
            .spawner
            .update(Some(&mut state.player), dt, game_time, &mut self.events);

        if !state.player.is_alive {
            self.enter_game_over();
            return;
        }

        if let Some(monster) = encounter::find_encounter(&self.state, &self.config.encounter) {
            let rng = StdRng::seed_from_u64(self.rng.gen());
            let battle = encounter::start_battle(
                &mut self.state,
                &monster,
                &self.config.battle,
                rng,
                &mut self.events,
            );
            self.battle = Some(battle);
            self.mode = GameMode::Battle;
        }
    }

    fn step_battle(&mut self, dt: f32) {
        puffin::profile_function!();
        let Some(battle) = self.battle.as_mut() else {
            warn!("Battle mode without an active battle");
            self.mode = GameMode::Exploration;
            return;
        };
        battle.update(dt);
        let Some(result) = battle.result() else {
            return;
        };

        self.battle = None;
        encounter::apply_battle_result(
            &mut self.state,
            &result,
            self.config.encounter.cooldown,
            &mut self.events,
        );
        if self.state.player.is_alive {
            self.mode = GameMode::Exploration;
        } else {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        info!(
            level = self.state.player.stats.level,
            gold = self.state.player.gold,
            time = self.state.clock.time,
            "Game over"
        );
        self.mode = GameMode::GameOver;
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// One-line population report
    pub fn status_summary(&self) -> String {
        self.state.spawner.status_summary(self.state.clock.time)
    }
}
