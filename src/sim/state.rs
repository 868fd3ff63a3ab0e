//! Game state and the events a tick reports
//!
//! Everything a run needs lives here, including its RNG, so two states built
//! from the same seed and fed the same inputs stay identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use super::pool::EntityPool;
use super::terrain::Terrain;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; waiting for restart
    GameOver,
}

/// Things that happened during a tick, for audio and the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    Explosion { pos: Vec2 },
    WallDestroyed { pos: Vec2 },
    GameOver { score: u64 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub terrain: Terrain,
    pub pool: EntityPool,
    pub craft: Craft,
    pub ammo: u32,
    /// Seconds toward the next round
    pub ammo_timer: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run from `seed`
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::new(&mut rng);
        log::info!("new run, seed {seed}");

        Self {
            seed,
            rng,
            terrain,
            pool: EntityPool::new(),
            craft: Craft::new(),
            ammo: MAX_AMMO,
            ammo_timer: 0.0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Distance scrolled so far
    pub fn distance(&self) -> f32 {
        self.terrain.distance
    }

    /// Whole pixels flown
    pub fn score(&self) -> u64 {
        self.terrain.distance.max(0.0) as u64
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take this tick's events, leaving the list empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ammo, MAX_AMMO);
        assert_eq!(state.score(), 0);
        assert!(state.pool.is_empty());
        assert!(!state.craft.started);
    }

    #[test]
    fn test_same_seed_same_tunnel() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        assert_eq!(a.terrain.segments, b.terrain.segments);
        assert_eq!(a.terrain.cursor, b.terrain.cursor);
    }
}
