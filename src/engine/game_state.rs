//! Core game state - owns the exploration simulation data.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::Player;
use crate::config::GameConfig;
use crate::spawning::MonsterSpawner;
use crate::time_system::GameClock;

/// Core game state - owns the player, the monster population and exploration time.
pub struct GameState {
    /// The player character
    pub player: Player,

    /// Monster population and spawn scheduling
    pub spawner: MonsterSpawner,

    /// Exploration clock (frozen while a battle runs)
    pub clock: GameClock,

    /// Exploration time before which no new encounter can start
    pub encounter_ready_at: f32,
}

impl GameState {
    /// Fresh session: the player starts in the middle of the safe zone.
    pub fn new(config: &GameConfig, player_name: &str, seed: u64) -> Self {
        let start = config.spawner.safe_zone.center;
        Self {
            player: Player::new(player_name, start),
            spawner: MonsterSpawner::new(config.spawner.clone(), StdRng::seed_from_u64(seed)),
            clock: GameClock::new(),
            encounter_ready_at: 0.0,
        }
    }

    /// Whether a battle may start right now
    pub fn encounter_ready(&self) -> bool {
        self.player.is_alive && self.clock.time >= self.encounter_ready_at
    }
}
