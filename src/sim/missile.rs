//! Enemy missiles and their motion models
//!
//! Speeds are per tick at 60 Hz; `time_alive` drives the periodic motions.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;
use crate::heading_degrees;

/// Seeker steering limits
const SEEKER_ACCEL: f32 = 0.05;
const SEEKER_MAX_VY: f32 = 2.0;
/// Cosmetic wobble on top of the tracked line
const SEEKER_WOBBLE_FREQ: f32 = 8.0;
const SEEKER_WOBBLE_AMP: f32 = 5.0;

/// Motion model, with per-instance parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MissileKind {
    /// Straight line to the left
    Standard,
    /// Sine wave around the spawn height
    Oscillator { amplitude: f32, frequency: f32 },
    /// Circular orbit around a center drifting left; fast orbits loop backwards
    Looper { radius: f32, angular_speed: f32 },
    /// Steers toward the player's height with bounded acceleration
    Seeker { base_y: f32, vertical_vel: f32 },
}

impl MissileKind {
    pub fn name(&self) -> &'static str {
        match self {
            MissileKind::Standard => "standard",
            MissileKind::Oscillator { .. } => "oscillator",
            MissileKind::Looper { .. } => "looper",
            MissileKind::Seeker { .. } => "seeker",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    /// Top-left of the collision box
    pub pos: Vec2,
    pub start_pos: Vec2,
    pub active: bool,
    /// Seconds since spawn
    pub time_alive: f32,
    /// Heading in degrees, for drawing
    pub rotation: f32,
    pub kind: MissileKind,
}

impl Missile {
    pub fn new(start_pos: Vec2, kind: MissileKind) -> Self {
        Self {
            pos: start_pos,
            start_pos,
            active: true,
            time_alive: 0.0,
            rotation: 180.0,
            kind,
        }
    }

    /// One of the four kinds, picked uniformly, with randomized parameters
    pub fn random<R: Rng + ?Sized>(start_pos: Vec2, rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Self::oscillator(start_pos, rng),
            1 => Self::looper(start_pos, rng),
            2 => Self::seeker(start_pos),
            _ => Self::new(start_pos, MissileKind::Standard),
        }
    }

    pub fn oscillator<R: Rng + ?Sized>(start_pos: Vec2, rng: &mut R) -> Self {
        let amplitude = rng.random_range(40..=90) as f32;
        let frequency = rng.random_range(20..=50) as f32 / 10.0;
        Self::new(
            start_pos,
            MissileKind::Oscillator {
                amplitude,
                frequency,
            },
        )
    }

    pub fn looper<R: Rng + ?Sized>(start_pos: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(40..=70) as f32;
        let mut angular_speed = rng.random_range(50..=80) as f32 / 10.0;
        if rng.random_bool(0.5) {
            angular_speed = -angular_speed;
        }
        Self::new(
            start_pos,
            MissileKind::Looper {
                radius,
                angular_speed,
            },
        )
    }

    pub fn seeker(start_pos: Vec2) -> Self {
        Self::new(
            start_pos,
            MissileKind::Seeker {
                base_y: start_pos.y,
                vertical_vel: 0.0,
            },
        )
    }

    /// Advance one tick. Missiles past the left margin deactivate instead of moving.
    pub fn advance(&mut self, player_pos: Vec2, dt: f32) {
        if !self.active {
            return;
        }

        self.time_alive += dt;
        if self.pos.x < MISSILE_DESPAWN_X {
            self.active = false;
            return;
        }

        let old = self.pos;
        let t = self.time_alive;

        match &mut self.kind {
            MissileKind::Standard => {
                self.pos.x -= MISSILE_SPEED;
            }
            MissileKind::Oscillator {
                amplitude,
                frequency,
            } => {
                self.pos.x -= MISSILE_SPEED;
                self.pos.y = self.start_pos.y + (t * *frequency).sin() * *amplitude;
            }
            MissileKind::Looper {
                radius,
                angular_speed,
            } => {
                // Orbit center drifts at the base speed; offset so the orbit starts at the spawn point
                let center_x = self.start_pos.x - MISSILE_SPEED * TICKS_PER_SECOND * t - *radius;
                let angle = t * *angular_speed;
                self.pos.x = center_x + angle.cos() * *radius;
                self.pos.y = self.start_pos.y + angle.sin() * *radius;
            }
            MissileKind::Seeker {
                base_y,
                vertical_vel,
            } => {
                self.pos.x -= MISSILE_SPEED;

                if player_pos.y > *base_y {
                    *vertical_vel += SEEKER_ACCEL;
                } else {
                    *vertical_vel -= SEEKER_ACCEL;
                }
                *vertical_vel = vertical_vel.clamp(-SEEKER_MAX_VY, SEEKER_MAX_VY);
                *base_y += *vertical_vel;

                self.pos.y = *base_y + (t * SEEKER_WOBBLE_FREQ).sin() * SEEKER_WOBBLE_AMP;
            }
        }

        if self.pos != old {
            self.rotation = heading_degrees(old, self.pos);
        }
    }

    /// Collision box, nose included
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            MISSILE_BODY_WIDTH + MISSILE_NOSE_LENGTH,
            MISSILE_HEIGHT,
        )
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
