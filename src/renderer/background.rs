//! Parallax cave silhouettes behind the tunnel
//!
//! Both layers are a pure function of the distance flown: each 40 px cell
//! hashes its index to decide whether it holds a spike and how big it is, so
//! the same stretch of cave always looks the same.

use glam::Vec2;

use super::scene::DrawCmd;
use super::vertex::colors;
use crate::consts::SCREEN_WIDTH;
use crate::sim::Triangle;

/// Width of one background cell
pub const CELL_SIZE: f32 = 40.0;

/// Scroll factors relative to the tunnel
pub const FAR_FACTOR: f32 = 0.1;
pub const NEAR_FACTOR: f32 = 0.2;

/// Extra cells drawn past each screen edge so wide spikes never pop in
const MARGIN: f32 = 100.0;

/// Integer noise in [0, 1], stable across platforms
pub fn hash_unit(x: i32, salt: u32) -> f32 {
    let mut n = x.wrapping_add((salt as i32).wrapping_mul(57));
    n = (n << 13) ^ n;
    n = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589);
    (n & 0x7fff_ffff) as f32 / 2_147_483_647.0
}

/// Cell indices visible at scroll offset `eff`
fn cells(eff: f32) -> std::ops::RangeInclusive<i32> {
    let first = ((eff - MARGIN) / CELL_SIZE) as i32;
    let last = ((eff + SCREEN_WIDTH + MARGIN) / CELL_SIZE) as i32;
    first..=last
}

fn spike(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> DrawCmd {
    DrawCmd::Triangle {
        tri: Triangle::new(a, b, c),
        color,
    }
}

/// Slow layer: sparse spikes close to the tunnel mouth
pub fn far_layer(distance: f32) -> Vec<DrawCmd> {
    let eff = distance * FAR_FACTOR;
    let mut cmds = Vec::new();
    for i in cells(eff) {
        if hash_unit(i, 999) > 0.4 && hash_unit(i, 123) > 0.3 {
            continue;
        }
        let x = i as f32 * CELL_SIZE - eff;

        if hash_unit(i, 111) > 0.3 {
            let h = 100.0 + hash_unit(i, 456) * 200.0;
            let w = 25.0 + hash_unit(i, 789) * 40.0;
            cmds.push(spike(
                Vec2::new(x - w, 150.0 - h),
                Vec2::new(x, 150.0),
                Vec2::new(x + w, 150.0 - h),
                colors::CAVE_FAR,
            ));
        }
        if hash_unit(i, 222) > 0.3 {
            let h = 100.0 + hash_unit(i, 321) * 200.0;
            let w = 25.0 + hash_unit(i, 654) * 40.0;
            cmds.push(spike(
                Vec2::new(x - w, 450.0 + h),
                Vec2::new(x + w, 450.0 + h),
                Vec2::new(x, 450.0),
                colors::CAVE_FAR,
            ));
        }
    }
    cmds
}

/// Faster layer: larger spikes in dense and sparse stretches of ten cells
pub fn near_layer(distance: f32) -> Vec<DrawCmd> {
    let eff = distance * NEAR_FACTOR;
    let mut cmds = Vec::new();
    for i in cells(eff) {
        let density = if hash_unit(i / 10, 888) > 0.6 { 0.9 } else { 0.2 };
        if hash_unit(i, 101) > density {
            continue;
        }
        let x = i as f32 * CELL_SIZE - eff;

        if hash_unit(i, 404) > 0.4 {
            let h = 100.0 + hash_unit(i, 202) * 250.0;
            let w = 40.0 + hash_unit(i, 303) * 60.0;
            cmds.push(spike(
                Vec2::new(x - w, -50.0),
                Vec2::new(x, h - 50.0),
                Vec2::new(x + w, -50.0),
                colors::CAVE_NEAR,
            ));
        }
        if hash_unit(i, 505) > 0.4 {
            let h = 100.0 + hash_unit(i, 606) * 250.0;
            let w = 40.0 + hash_unit(i, 707) * 60.0;
            let base = 650.0;
            cmds.push(spike(
                Vec2::new(x - w, base),
                Vec2::new(x + w, base),
                Vec2::new(x, base - h),
                colors::CAVE_NEAR,
            ));
        }
    }
    cmds
}

/// Both layers, far first
pub fn background(distance: f32) -> Vec<DrawCmd> {
    let mut cmds = far_layer(distance);
    cmds.extend(near_layer(distance));
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangles(cmds: &[DrawCmd]) -> Vec<Triangle> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Triangle { tri, .. } => Some(*tri),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hash_is_unit_and_stable() {
        for x in -500..500 {
            for salt in [101, 123, 888, 999] {
                let h = hash_unit(x, salt);
                assert!((0.0..=1.0).contains(&h), "hash({x}, {salt}) = {h}");
                assert_eq!(h, hash_unit(x, salt));
            }
        }
        assert_ne!(hash_unit(7, 111), hash_unit(7, 222));
    }

    #[test]
    fn test_layers_are_deterministic_and_not_empty() {
        for distance in [0.0, 1234.0, 98_765.0] {
            let bg = background(distance);
            assert_eq!(bg, background(distance));
            assert_eq!(bg.len(), far_layer(distance).len() + near_layer(distance).len());
        }
        assert!(!background(0.0).is_empty());
    }

    #[test]
    fn test_far_layer_scrolls_at_a_tenth() {
        // Cell range is the same for both offsets, so every spike just slides
        let before = triangles(&far_layer(0.0));
        let after = triangles(&far_layer(5.0));
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            for (p, q) in [(a.a, b.a), (a.b, b.b), (a.c, b.c)] {
                assert!((q.x - (p.x - 0.5)).abs() < 1e-3);
                assert_eq!(p.y, q.y);
            }
        }
    }

    #[test]
    fn test_near_layer_spans_the_screen() {
        for tri in triangles(&near_layer(4321.0)) {
            assert!(tri.max_x() >= -MARGIN - 100.0);
            assert!(tri.min_x() <= SCREEN_WIDTH + MARGIN + 100.0);
        }
    }
}
