//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const CAVE_FAR: [f32; 4] = [0.18, 0.14, 0.12, 1.0];
    pub const CAVE_NEAR: [f32; 4] = [0.25, 0.22, 0.2, 1.0];
    pub const START_PAD: [f32; 4] = [0.51, 0.51, 0.51, 1.0]; // Gray
    pub const SIGN: [f32; 4] = [0.31, 0.31, 0.31, 1.0];
    pub const SIGN_EMPHASIS: [f32; 4] = [0.5, 0.13, 0.22, 1.0];
    pub const TERRAIN: [f32; 4] = [0.5, 0.13, 0.22, 1.0]; // Maroon
    pub const HAZARD: [f32; 4] = [0.4, 0.1, 0.16, 1.0];
    pub const WALL: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
    pub const WEAK_SPOT: [f32; 4] = [0.0, 0.89, 0.19, 1.0];
    pub const SHOT: [f32; 4] = [0.99, 0.98, 0.0, 1.0];
    pub const ROCK: [f32; 4] = [0.5, 0.42, 0.31, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.63, 0.0, 1.0];
    pub const EXPLOSION_CORE: [f32; 4] = [0.99, 0.98, 0.0, 1.0];
    pub const MISSILE_STANDARD: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    pub const MISSILE_OSCILLATOR: [f32; 4] = [0.78, 0.48, 1.0, 1.0];
    pub const MISSILE_LOOPER: [f32; 4] = [1.0, 0.63, 0.0, 1.0];
    pub const MISSILE_SEEKER: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
    pub const MISSILE_NOSE: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
    pub const CRAFT: [f32; 4] = [0.0, 0.32, 0.67, 1.0];
    pub const ROTOR: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
    pub const HUD: [f32; 4] = [0.31, 0.31, 0.31, 1.0];
    pub const AMMO_PIP: [f32; 4] = [0.99, 0.98, 0.0, 1.0];
}
