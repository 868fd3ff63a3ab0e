//! Draw list for one frame
//!
//! `scene` walks a finished `GameState` back to front and emits primitives;
//! `tessellate` turns them into a triangle list ready for upload. Text is
//! passed through as a command for the front end's glyph renderer.

use glam::Vec2;

use super::background::background;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, MissileKind, Rect, Triangle};

/// Segments used for every circle
pub const CIRCLE_SEGMENTS: u32 = 16;

/// A single filled primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Rect { rect: Rect, color: [f32; 4] },
    Triangle { tri: Triangle, color: [f32; 4] },
    Circle { center: Vec2, radius: f32, color: [f32; 4] },
    /// Top-left anchored label; no vertices
    Text {
        pos: Vec2,
        text: &'static str,
        size: f32,
        color: [f32; 4],
    },
}

fn missile_color(kind: &MissileKind) -> [f32; 4] {
    match kind {
        MissileKind::Standard => colors::MISSILE_STANDARD,
        MissileKind::Oscillator { .. } => colors::MISSILE_OSCILLATOR,
        MissileKind::Looper { .. } => colors::MISSILE_LOOPER,
        MissileKind::Seeker { .. } => colors::MISSILE_SEEKER,
    }
}

/// Build the draw list for `state`
pub fn scene(state: &GameState) -> Vec<DrawCmd> {
    let terrain = &state.terrain;
    let pool = &state.pool;
    let mut cmds = Vec::with_capacity(terrain.segments.len() + 128);

    cmds.push(DrawCmd::Rect {
        rect: Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
        color: colors::BACKGROUND,
    });
    cmds.extend(background(state.distance()));

    if let Some(pad) = terrain.start_pad {
        cmds.push(DrawCmd::Rect {
            rect: pad,
            color: colors::START_PAD,
        });
    }
    for sign in &terrain.signs {
        cmds.push(DrawCmd::Text {
            pos: sign.pos,
            text: sign.text,
            size: sign.size,
            color: if sign.emphasis {
                colors::SIGN_EMPHASIS
            } else {
                colors::SIGN
            },
        });
    }

    for seg in &terrain.segments {
        cmds.push(DrawCmd::Rect {
            rect: seg.rect,
            color: colors::TERRAIN,
        });
    }
    for hazard in &terrain.hazards {
        cmds.push(DrawCmd::Triangle {
            tri: hazard.tri,
            color: colors::HAZARD,
        });
    }
    for wall in terrain.active_walls() {
        cmds.push(DrawCmd::Rect {
            rect: wall.rect,
            color: colors::WALL,
        });
        cmds.push(DrawCmd::Rect {
            rect: wall.weak_spot,
            color: colors::WEAK_SPOT,
        });
    }

    for rock in pool.rocks.iter().filter(|r| r.active) {
        cmds.push(DrawCmd::Circle {
            center: rock.pos,
            radius: rock.radius,
            color: colors::ROCK,
        });
    }
    for shot in pool.shots.iter().filter(|s| s.active) {
        cmds.push(DrawCmd::Circle {
            center: shot.pos,
            radius: shot.radius,
            color: colors::SHOT,
        });
    }
    for missile in pool.missiles.iter().filter(|m| m.active) {
        // Nose on the left, body behind it
        let Vec2 { x, y } = missile.pos;
        cmds.push(DrawCmd::Triangle {
            tri: Triangle::new(
                Vec2::new(x, y + MISSILE_HEIGHT / 2.0),
                Vec2::new(x + MISSILE_NOSE_LENGTH, y),
                Vec2::new(x + MISSILE_NOSE_LENGTH, y + MISSILE_HEIGHT),
            ),
            color: colors::MISSILE_NOSE,
        });
        cmds.push(DrawCmd::Rect {
            rect: Rect::new(
                x + MISSILE_NOSE_LENGTH,
                y,
                MISSILE_BODY_WIDTH,
                MISSILE_HEIGHT,
            ),
            color: missile_color(&missile.kind),
        });
    }
    for explosion in pool.explosions.iter().filter(|e| e.active) {
        let t = explosion.progress();
        cmds.push(DrawCmd::Circle {
            center: explosion.pos,
            radius: 10.0 + 20.0 * t,
            color: colors::EXPLOSION,
        });
        cmds.push(DrawCmd::Circle {
            center: explosion.pos,
            radius: 10.0 * (1.0 - t),
            color: colors::EXPLOSION_CORE,
        });
    }

    let craft = &state.craft;
    cmds.push(DrawCmd::Rect {
        rect: craft.rect(),
        color: colors::CRAFT,
    });
    // Rotor blade, pulsing with the animation clock
    let blade = CRAFT_WIDTH * (0.6 + 0.4 * (craft.anim_time * 30.0).sin().abs());
    cmds.push(DrawCmd::Rect {
        rect: Rect::new(
            craft.pos.x + (CRAFT_WIDTH - blade) / 2.0,
            craft.pos.y - 4.0,
            blade,
            2.0,
        ),
        color: colors::ROTOR,
    });

    cmds.push(DrawCmd::Rect {
        rect: Rect::new(0.0, 0.0, SCREEN_WIDTH, HUD_HEIGHT),
        color: colors::HUD,
    });
    for i in 0..state.ammo {
        cmds.push(DrawCmd::Rect {
            rect: Rect::new(SCREEN_WIDTH - 20.0 - i as f32 * 16.0, 18.0, 10.0, 14.0),
            color: colors::AMMO_PIP,
        });
    }

    cmds
}

/// Flatten a draw list into a triangle list
pub fn tessellate(cmds: &[DrawCmd]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(cmds.len() * 6);
    for cmd in cmds {
        match cmd {
            DrawCmd::Rect { rect, color } => vertices.extend(shapes::rect(rect, *color)),
            DrawCmd::Triangle { tri, color } => vertices.extend(shapes::triangle(tri, *color)),
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => vertices.extend(shapes::circle(*center, *radius, *color, CIRCLE_SEGMENTS)),
            DrawCmd::Text { .. } => {}
        }
    }
    vertices
}

/// Raw bytes for a vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
