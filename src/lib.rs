//! Cave Flyer - a side-scrolling cave tunnel arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain generation, entities, collisions)
//! - `renderer`: Draw data and vertex tessellation for an external renderer
//! - `audio`: Sound cues derived from simulation events
//! - `highscores`: Plain-text leaderboard
//! - `settings`: JSON player settings

pub mod audio;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
///
/// Motion constants are expressed per tick and assume `SIM_DT`.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second, for converting per-tick speeds into per-second ones
    pub const TICKS_PER_SECOND: f32 = 60.0;

    /// Viewport
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Height of the HUD strip at the top of the screen (never playable)
    pub const HUD_HEIGHT: f32 = 50.0;

    /// Terrain scroll per tick (also the distance gained per tick)
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Width of one terrain column
    pub const TERRAIN_STEP: f32 = 10.0;
    /// Width of the flat, wide opening stretch
    pub const SAFE_ZONE_WIDTH: f32 = 500.0;
    /// Safe zone ceiling bottom / floor top
    pub const SAFE_ZONE_CEILING: f32 = HUD_HEIGHT + 50.0;
    pub const SAFE_ZONE_FLOOR: f32 = 400.0;
    /// Width of each chunk appended while scrolling
    pub const CHUNK_WIDTH: f32 = 100.0;
    /// Generate more terrain once the frontier is closer than this past the right edge
    pub const LOOKAHEAD: f32 = 50.0;

    /// Gap shrinks from the initial height to the minimum, one decrement per column
    pub const INITIAL_GAP_HEIGHT: f32 = 300.0;
    pub const MIN_GAP_HEIGHT: f32 = 100.0;
    pub const GAP_SHRINK_PER_STEP: f32 = 0.05;

    /// Distance before walls and hazards can appear
    pub const FEATURE_WARMUP_DISTANCE: f32 = 500.0;

    /// Destructible walls
    pub const WALL_WIDTH: f32 = 30.0;
    pub const WEAK_SPOT_HEIGHT: f32 = 30.0;
    pub const WALL_MIN_SPACING: f32 = 400.0;
    /// Percent chance (out of 101 rolls) per column
    pub const WALL_CHANCE: u32 = 2;

    /// Stalactites / stalagmites
    pub const HAZARD_CHANCE: u32 = 3;
    pub const HAZARD_MIN_WIDTH: u32 = 20;
    pub const HAZARD_MAX_WIDTH: u32 = 40;
    pub const HAZARD_MIN_HEIGHT: u32 = 15;
    pub const HAZARD_MAX_HEIGHT: u32 = 35;
    /// Fraction of the local gap a hazard may occupy
    pub const HAZARD_MAX_GAP_FRACTION: f32 = 0.3;

    /// Player craft
    pub const CRAFT_WIDTH: f32 = 40.0;
    pub const CRAFT_HEIGHT: f32 = 20.0;
    pub const CRAFT_START_X: f32 = 100.0;
    pub const CRAFT_START_Y: f32 = 330.0;
    pub const CRAFT_GRAVITY: f32 = 0.2;
    pub const CRAFT_THRUST: f32 = 0.4;
    pub const CRAFT_STRAFE: f32 = 0.2;
    pub const CRAFT_DRAG: f32 = 0.98;

    /// Weapon
    pub const MAX_AMMO: u32 = 5;
    pub const AMMO_RECHARGE_SECS: f32 = 1.5;
    pub const SHOT_SPEED: f32 = 12.0;
    pub const SHOT_GRAVITY: f32 = 0.08;
    pub const SHOT_RADIUS: f32 = 5.0;

    /// Enemy missiles
    pub const MISSILE_SPEED: f32 = 5.0;
    pub const MISSILE_BODY_WIDTH: f32 = 30.0;
    pub const MISSILE_NOSE_LENGTH: f32 = 10.0;
    pub const MISSILE_HEIGHT: f32 = 10.0;
    /// Missiles deactivate once this far past the left edge
    pub const MISSILE_DESPAWN_X: f32 = -50.0;
    pub const MISSILE_SPAWN_MARGIN: f32 = 50.0;
    pub const MISSILE_SPAWN_SECS: f32 = 3.0;
    pub const MISSILE_WARMUP_DISTANCE: f32 = 1500.0;

    /// Rocks
    pub const ROCK_SPEED: f32 = 2.0;
    pub const ROCK_RADIUS: f32 = 15.0;
    pub const ROCK_SPAWN_SECS: f32 = 5.0;
    pub const ROCK_WARMUP_DISTANCE: f32 = 2500.0;

    /// Explosion lifetime (seconds)
    pub const EXPLOSION_SECS: f32 = 0.5;

    /// Projectiles further than this outside the viewport are dropped
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
}

/// Vertical midpoint of the playable band (below the HUD strip)
#[inline]
pub fn playfield_mid_y() -> f32 {
    (consts::SCREEN_HEIGHT + consts::HUD_HEIGHT) / 2.0
}

/// Heading in degrees of a movement from `from` to `to`
#[inline]
pub fn heading_degrees(from: glam::Vec2, to: glam::Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}
