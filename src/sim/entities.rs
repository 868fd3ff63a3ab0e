//! Player shots, rocks and explosions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// A round fired by the player; falls slowly under gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShot {
    pub pos: Vec2,
    /// Speed magnitude on x; direction comes from `facing_right`
    pub vel: Vec2,
    pub facing_right: bool,
    pub active: bool,
    pub radius: f32,
}

impl PlayerShot {
    pub fn new(pos: Vec2, facing_right: bool) -> Self {
        Self {
            pos,
            vel: Vec2::new(SHOT_SPEED, 0.0),
            facing_right,
            active: true,
            radius: SHOT_RADIUS,
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }

        self.vel.y += SHOT_GRAVITY;
        if self.facing_right {
            self.pos.x += self.vel.x;
        } else {
            self.pos.x -= self.vel.x;
        }
        self.pos.y += self.vel.y;

        if self.pos.x > SCREEN_WIDTH + OFFSCREEN_MARGIN
            || self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN
        {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A boulder rolling in from the left edge at constant speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Rock {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            active: true,
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }

        self.pos.x += ROCK_SPEED;
        if self.pos.x - self.radius > SCREEN_WIDTH + OFFSCREEN_MARGIN {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Short-lived visual marker; no collision footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Seconds left
    pub timer: f32,
    pub active: bool,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            timer: EXPLOSION_SECS,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = false;
        }
    }

    /// 0 at spawn, 1 when it expires
    pub fn progress(&self) -> f32 {
        (1.0 - self.timer / EXPLOSION_SECS).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_arcs_down_in_facing_direction() {
        let mut right = PlayerShot::new(Vec2::new(100.0, 300.0), true);
        let mut left = PlayerShot::new(Vec2::new(100.0, 300.0), false);
        for _ in 0..10 {
            right.update();
            left.update();
        }
        assert!((right.pos.x - 220.0).abs() < 1e-3);
        assert!((left.pos.x + 20.0).abs() < 1e-3);
        assert!(right.pos.y > 300.0);
        assert!(right.active);
        // Left shot crosses the left margin on its 13th tick
        for _ in 0..3 {
            left.update();
        }
        assert!(!left.active);
    }

    #[test]
    fn test_shot_leaves_right_edge() {
        let mut shot = PlayerShot::new(Vec2::new(SCREEN_WIDTH + 45.0, 300.0), true);
        shot.update();
        assert!(!shot.active);
    }

    #[test]
    fn test_rock_moves_right_and_leaves() {
        let mut rock = Rock::new(Vec2::new(0.0, 300.0), ROCK_RADIUS);
        rock.update();
        assert_eq!(rock.pos.x, ROCK_SPEED);
        assert_eq!(rock.rect(), Rect::new(ROCK_SPEED - 15.0, 285.0, 30.0, 30.0));

        rock.pos.x = SCREEN_WIDTH + OFFSCREEN_MARGIN + ROCK_RADIUS;
        rock.update();
        assert!(!rock.active);
    }

    #[test]
    fn test_explosion_expires() {
        let mut e = Explosion::new(Vec2::ZERO);
        for _ in 0..25 {
            e.update(SIM_DT);
        }
        assert!(e.active);
        for _ in 0..10 {
            e.update(SIM_DT);
        }
        assert!(!e.active);
        assert_eq!(e.progress(), 1.0);
    }
}
