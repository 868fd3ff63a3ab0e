//! The player's helicopter

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::tick::TickInput;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    /// Top-left of the body
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
    pub facing_right: bool,
    /// Hovers in place until the first control input
    pub started: bool,
    /// Rotor animation clock, seconds
    #[serde(skip)]
    pub anim_time: f32,
}

impl Default for Craft {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CRAFT_START_X, CRAFT_START_Y),
            vel: Vec2::ZERO,
            facing_right: true,
            started: false,
            anim_time: 0.0,
        }
    }
}

impl Craft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, input: &TickInput, dt: f32) {
        if !self.started {
            if input.thrust || input.left || input.right {
                self.started = true;
                log::debug!("craft engaged");
            } else {
                return;
            }
        }

        self.vel.y += CRAFT_GRAVITY;
        if input.thrust {
            self.vel.y -= CRAFT_THRUST;
        }
        if input.left {
            self.vel.x -= CRAFT_STRAFE;
            self.facing_right = false;
        }
        if input.right {
            self.vel.x += CRAFT_STRAFE;
            self.facing_right = true;
        }
        self.pos += self.vel;

        let max_x = SCREEN_WIDTH - CRAFT_WIDTH;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }

        self.vel *= CRAFT_DRAG;
        self.anim_time += dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CRAFT_WIDTH, CRAFT_HEIGHT)
    }

    /// Muzzle point: front edge, mid-height
    pub fn nose(&self) -> Vec2 {
        let x = if self.facing_right {
            self.pos.x + CRAFT_WIDTH
        } else {
            self.pos.x
        };
        Vec2::new(x, self.pos.y + CRAFT_HEIGHT / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thrust() -> TickInput {
        TickInput {
            thrust: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_hovers_until_first_input() {
        let mut craft = Craft::new();
        for _ in 0..60 {
            craft.update(&TickInput::default(), SIM_DT);
        }
        assert!(!craft.started);
        assert_eq!(craft.pos, Vec2::new(CRAFT_START_X, CRAFT_START_Y));
        // Rotor stays still on the pad
        assert_eq!(craft.anim_time, 0.0);

        craft.update(&thrust(), SIM_DT);
        assert!(craft.started);
        assert_eq!(craft.anim_time, SIM_DT);
    }

    #[test]
    fn test_gravity_then_thrust() {
        let mut craft = Craft::new();
        craft.started = true;
        for _ in 0..10 {
            craft.update(&TickInput::default(), SIM_DT);
        }
        assert!(craft.pos.y > CRAFT_START_Y);
        let fallen = craft.pos.y;

        for _ in 0..40 {
            craft.update(&thrust(), SIM_DT);
        }
        assert!(craft.vel.y < 0.0);
        assert!(craft.pos.y < fallen);
    }

    #[test]
    fn test_strafe_sets_facing_and_clamps() {
        let mut craft = Craft::new();
        let left = TickInput {
            left: true,
            thrust: true,
            ..Default::default()
        };
        for _ in 0..300 {
            craft.update(&left, SIM_DT);
        }
        assert!(!craft.facing_right);
        assert_eq!(craft.pos.x, 0.0);
        assert_eq!(craft.vel.x, 0.0);
        assert_eq!(craft.nose().x, 0.0);

        let right = TickInput {
            right: true,
            thrust: true,
            ..Default::default()
        };
        for _ in 0..600 {
            craft.update(&right, SIM_DT);
        }
        assert!(craft.facing_right);
        assert_eq!(craft.pos.x, SCREEN_WIDTH - CRAFT_WIDTH);
    }

    #[test]
    fn test_nose_and_rect() {
        let craft = Craft::new();
        assert_eq!(craft.nose(), Vec2::new(140.0, 340.0));
        assert_eq!(craft.rect(), Rect::new(100.0, 330.0, 40.0, 20.0));
    }
}
