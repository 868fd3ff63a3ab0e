//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collections are kept in insertion or x order)
//! - No rendering or platform dependencies

pub mod craft;
pub mod entities;
pub mod geom;
pub mod missile;
pub mod pool;
pub mod state;
pub mod terrain;
pub mod tick;

pub use craft::Craft;
pub use entities::{Explosion, PlayerShot, Rock};
pub use geom::{Rect, Triangle};
pub use missile::{Missile, MissileKind};
pub use pool::EntityPool;
pub use state::{GameEvent, GamePhase, GameState};
pub use terrain::{
    GenCursor, Hazard, LevelText, ProjectileHit, Side, StepColumn, Terrain, TerrainSegment,
    Wall,
};
pub use tick::{TickInput, tick};
