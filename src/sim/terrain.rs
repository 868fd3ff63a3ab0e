//! Procedural cave terrain
//!
//! The tunnel is generated column by column ahead of the viewport. A cursor
//! walks the tunnel center toward randomly re-rolled targets one pixel per
//! column, so the path bends at irregular intervals without jagged jumps.
//! The gap narrows a little every column until it reaches `MIN_GAP_HEIGHT`.
//!
//! All collections are kept in ascending-x order so culling only ever pops
//! from the front.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Triangle};
use crate::consts::*;
use crate::playfield_mid_y;

/// Which side of the tunnel a piece of geometry hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Ceiling,
    Floor,
}

/// One ceiling or floor slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSegment {
    pub rect: Rect,
    pub side: Side,
}

/// Full-height barrier that a shot through its weak spot destroys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
    /// Sub-rect of `rect`, inside the tunnel gap at creation time
    pub weak_spot: Rect,
    /// Cleared once, permanently, when the weak spot is hit
    pub active: bool,
}

/// Stalactite (ceiling) or stalagmite (floor)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub tri: Triangle,
    pub side: Side,
}

/// Tutorial text painted on the opening stretch of the cave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelText {
    pub pos: Vec2,
    pub text: &'static str,
    pub size: f32,
    /// Drawn in the warning color
    pub emphasis: bool,
}

const TUTORIAL: [&str; 5] = [
    "W / UP to Fly",
    "A / LEFT to Move Left",
    "D / RIGHT to Move Right",
    "SPACE to Shoot",
    "Avoid Obstacles!",
];

/// Signs are dropped once this far left of the screen
const SIGN_CULL_X: f32 = -300.0;

/// Outcome of a player shot against the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    Miss,
    /// Stopped by rock, the screen bottom, or a wall's armored part
    Blocked,
    /// Went through a weak spot; the wall is now inactive
    WallDestroyed,
}

impl ProjectileHit {
    #[inline]
    pub fn is_hit(self) -> bool {
        self != ProjectileHit::Miss
    }
}

/// Ceiling bottom and floor top of one generated column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepColumn {
    pub ceiling_y: f32,
    pub floor_y: f32,
}

impl StepColumn {
    pub fn gap(&self) -> f32 {
        self.floor_y - self.ceiling_y
    }
}

/// Random-walk state carried from one column to the next (and across chunks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenCursor {
    /// Current tunnel center
    pub last_y: f32,
    /// Center the walk is heading toward
    pub target_y: f32,
    /// Columns left before a new target is rolled
    pub steps_to_target: i32,
    /// Current gap height; never increases
    pub gap_height: f32,
}

impl Default for GenCursor {
    fn default() -> Self {
        let mid = playfield_mid_y();
        Self {
            last_y: mid,
            target_y: mid,
            steps_to_target: 0,
            gap_height: INITIAL_GAP_HEIGHT,
        }
    }
}

impl GenCursor {
    /// Advance the walk by one column and return that column's ceiling/floor
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepColumn {
        self.gap_height = (self.gap_height - GAP_SHRINK_PER_STEP).max(MIN_GAP_HEIGHT);

        self.steps_to_target -= 1;
        if self.steps_to_target <= 0 {
            let (lo, hi) = self.target_band();
            self.target_y = rng.random_range(lo..=hi) as f32;
            self.steps_to_target = rng.random_range(30..=80);
        }

        let diff = self.target_y - self.last_y;
        let mut movement = if diff.abs() > 1.0 { diff.signum() } else { diff };

        // Rare nudge so long straight runs don't look machined
        if rng.random_range(0..=10) == 0 {
            movement += rng.random_range(-1..=1) as f32 * 0.5;
        }

        self.last_y += movement;

        let half = self.gap_height / 2.0;
        let min_h = HUD_HEIGHT + half + 20.0;
        let max_h = SCREEN_HEIGHT - half - 20.0;
        self.last_y = if min_h <= max_h {
            self.last_y.clamp(min_h, max_h)
        } else {
            playfield_mid_y()
        };

        StepColumn {
            ceiling_y: (self.last_y - half).floor(),
            floor_y: (self.last_y + half).floor(),
        }
    }

    /// Integer band a new target may be drawn from; falls back to a narrow band
    /// around the playfield middle if the gap is too tall for the screen.
    fn target_band(&self) -> (i32, i32) {
        let half = (self.gap_height / 2.0) as i32;
        let lo = HUD_HEIGHT as i32 + half + 50;
        let hi = SCREEN_HEIGHT as i32 - half - 50;
        if lo > hi {
            let mid = playfield_mid_y() as i32;
            (mid - 20, mid + 20)
        } else {
            (lo, hi)
        }
    }
}

/// The scrolling tunnel and everything attached to it
#[derive(Debug, Clone)]
pub struct Terrain {
    pub segments: VecDeque<TerrainSegment>,
    pub walls: VecDeque<Wall>,
    pub hazards: VecDeque<Hazard>,
    /// Landing pad under the craft's start position; gone once scrolled off
    pub start_pad: Option<Rect>,
    pub signs: VecDeque<LevelText>,
    pub cursor: GenCursor,
    /// Total distance scrolled since `init`
    pub distance: f32,
    /// Right edge of generated terrain (screen space)
    pub frontier: f32,
}

impl Terrain {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut terrain = Self {
            segments: VecDeque::new(),
            walls: VecDeque::new(),
            hazards: VecDeque::new(),
            start_pad: None,
            signs: VecDeque::new(),
            cursor: GenCursor::default(),
            distance: 0.0,
            frontier: 0.0,
        };
        terrain.init(rng);
        terrain
    }

    /// Reset to a fresh tunnel: flat safe zone, then one chunk up to the lookahead
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.segments.clear();
        self.walls.clear();
        self.hazards.clear();
        self.cursor = GenCursor::default();
        self.distance = 0.0;

        self.start_pad = Some(Rect::new(50.0, 350.0, 100.0, 20.0));
        self.signs = TUTORIAL
            .iter()
            .enumerate()
            .map(|(i, &text)| LevelText {
                pos: Vec2::new(200.0, 200.0 + i as f32 * 30.0),
                text,
                size: 20.0,
                emphasis: i == TUTORIAL.len() - 1,
            })
            .collect();

        let columns = (SAFE_ZONE_WIDTH / TERRAIN_STEP).ceil() as usize;
        for i in 0..columns {
            let x = i as f32 * TERRAIN_STEP;
            self.push_column(
                x,
                StepColumn {
                    ceiling_y: SAFE_ZONE_CEILING,
                    floor_y: SAFE_ZONE_FLOOR,
                },
            );
        }
        self.frontier = SAFE_ZONE_WIDTH;

        self.generate_chunk(
            SAFE_ZONE_WIDTH,
            SCREEN_WIDTH + CHUNK_WIDTH - SAFE_ZONE_WIDTH,
            rng,
        );
    }

    /// Scroll one tick, cull what left the screen, and top up the lookahead
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dx = -SCROLL_SPEED;
        for seg in self.segments.iter_mut() {
            seg.rect.translate_x(dx);
        }
        for wall in self.walls.iter_mut() {
            wall.rect.translate_x(dx);
            wall.weak_spot.translate_x(dx);
        }
        for hazard in self.hazards.iter_mut() {
            hazard.tri.translate_x(dx);
        }
        for sign in self.signs.iter_mut() {
            sign.pos.x += dx;
        }
        if let Some(pad) = self.start_pad.as_mut() {
            pad.translate_x(dx);
        }
        self.frontier += dx;
        self.distance += SCROLL_SPEED;

        while self.segments.front().is_some_and(|s| s.rect.right() < 0.0) {
            self.segments.pop_front();
        }
        while self.walls.front().is_some_and(|w| w.rect.right() < 0.0) {
            self.walls.pop_front();
        }
        // Ordered by min_x, so a wide hazard can sit in front of a narrow one
        self.hazards.retain(|h| h.tri.max_x() >= 0.0);
        while self.signs.front().is_some_and(|t| t.pos.x < SIGN_CULL_X) {
            self.signs.pop_front();
        }
        if self.start_pad.is_some_and(|pad| pad.right() < 0.0) {
            self.start_pad = None;
        }

        if self.frontier < SCREEN_WIDTH + LOOKAHEAD {
            self.generate_chunk(self.frontier, CHUNK_WIDTH, rng);
        }
    }

    /// Append terrain columns covering `[start_x, start_x + width)`
    pub fn generate_chunk<R: Rng + ?Sized>(&mut self, start_x: f32, width: f32, rng: &mut R) {
        let columns = (width / TERRAIN_STEP).ceil().max(0.0) as usize;
        log::trace!(
            "generating {} columns at x={:.1} (distance {:.0}, gap {:.2})",
            columns,
            start_x,
            self.distance,
            self.cursor.gap_height
        );

        for i in 0..columns {
            let x = start_x + i as f32 * TERRAIN_STEP;
            let column = self.cursor.step(rng);
            self.push_column(x, column);

            if self.distance < FEATURE_WARMUP_DISTANCE {
                continue;
            }

            let spawned_wall = self.maybe_spawn_wall(x, column, rng);
            if !spawned_wall {
                self.maybe_spawn_hazard(x, column, rng);
            }
        }

        self.frontier = self.frontier.max(start_x + columns as f32 * TERRAIN_STEP);
    }

    fn push_column(&mut self, x: f32, column: StepColumn) {
        if column.ceiling_y > HUD_HEIGHT {
            self.segments.push_back(TerrainSegment {
                rect: Rect::new(x, HUD_HEIGHT, TERRAIN_STEP, column.ceiling_y - HUD_HEIGHT),
                side: Side::Ceiling,
            });
        }
        if column.floor_y < SCREEN_HEIGHT {
            self.segments.push_back(TerrainSegment {
                rect: Rect::new(x, column.floor_y, TERRAIN_STEP, SCREEN_HEIGHT - column.floor_y),
                side: Side::Floor,
            });
        }
    }

    fn maybe_spawn_wall<R: Rng + ?Sized>(&mut self, x: f32, column: StepColumn, rng: &mut R) -> bool {
        if rng.random_range(0..=100) >= WALL_CHANCE {
            return false;
        }
        if self
            .walls
            .back()
            .is_some_and(|w| x - w.rect.x < WALL_MIN_SPACING)
        {
            return false;
        }
        if column.gap() <= MIN_GAP_HEIGHT * 0.6 {
            return false;
        }

        let lo = column.ceiling_y as i32;
        let hi = (column.floor_y - WEAK_SPOT_HEIGHT) as i32;
        let weak_y = rng.random_range(lo..=hi.max(lo)) as f32;

        self.walls.push_back(Wall {
            rect: Rect::new(x, 0.0, WALL_WIDTH, SCREEN_HEIGHT),
            weak_spot: Rect::new(x, weak_y, WALL_WIDTH, WEAK_SPOT_HEIGHT),
            active: true,
        });
        log::debug!(
            "wall spawned at distance {:.0}, weak spot y={:.0}",
            self.distance,
            weak_y
        );
        true
    }

    fn maybe_spawn_hazard<R: Rng + ?Sized>(&mut self, x: f32, column: StepColumn, rng: &mut R) {
        if rng.random_range(0..=100) >= HAZARD_CHANCE {
            return;
        }

        let side = if rng.random_bool(0.5) {
            Side::Ceiling
        } else {
            Side::Floor
        };
        let width = rng.random_range(HAZARD_MIN_WIDTH..=HAZARD_MAX_WIDTH) as f32;
        let height = (rng.random_range(HAZARD_MIN_HEIGHT..=HAZARD_MAX_HEIGHT) as f32)
            .min(column.gap() * HAZARD_MAX_GAP_FRACTION);

        let tri = match side {
            Side::Ceiling => Triangle::new(
                Vec2::new(x, column.ceiling_y),
                Vec2::new(x + width, column.ceiling_y),
                Vec2::new(x + width / 2.0, column.ceiling_y + height),
            ),
            Side::Floor => Triangle::new(
                Vec2::new(x, column.floor_y),
                Vec2::new(x + width, column.floor_y),
                Vec2::new(x + width / 2.0, column.floor_y - height),
            ),
        };
        self.hazards.push_back(Hazard { tri, side });
    }

    /// Collision predicate for the craft, missiles and rocks
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.segments.iter().any(|s| rect.overlaps(&s.rect))
            || self.active_walls().any(|w| rect.overlaps(&w.rect))
            || self.hazards.iter().any(|h| h.tri.touches_rect_corner(rect))
            || rect.bottom() > SCREEN_HEIGHT
    }

    /// Collision predicate for player shots; true on any hit.
    ///
    /// Hitting a wall's weak spot destroys the wall.
    pub fn check_projectile_collision(&mut self, rect: &Rect) -> bool {
        self.projectile_hit(rect).is_hit()
    }

    /// Resolve a player shot against the terrain.
    ///
    /// Order matters: rock always blocks, then the first active wall the shot
    /// touches decides between blocked and destroyed, then the screen bottom.
    pub fn projectile_hit(&mut self, rect: &Rect) -> ProjectileHit {
        if self.segments.iter().any(|s| rect.overlaps(&s.rect)) {
            return ProjectileHit::Blocked;
        }

        for wall in self.walls.iter_mut().filter(|w| w.active) {
            if !rect.overlaps(&wall.rect) {
                continue;
            }
            if rect.overlaps(&wall.weak_spot) {
                wall.active = false;
                log::debug!("wall destroyed at x={:.0}", wall.rect.x);
                return ProjectileHit::WallDestroyed;
            }
            return ProjectileHit::Blocked;
        }

        if rect.bottom() > SCREEN_HEIGHT {
            return ProjectileHit::Blocked;
        }

        ProjectileHit::Miss
    }

    /// Walls that still block (destroyed walls scroll on but are inert)
    pub fn active_walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(|w| w.active)
    }

    /// Tunnel center at the generation frontier; missiles spawn here
    pub fn current_gap_center(&self) -> f32 {
        self.cursor.last_y
    }

    /// Tunnel center at screen column `x`, from the segments covering it
    pub fn gap_center_at(&self, x: f32) -> f32 {
        let covers = |s: &&TerrainSegment| s.rect.x <= x && x < s.rect.right();
        let ceiling = self
            .segments
            .iter()
            .filter(|s| s.side == Side::Ceiling)
            .find(covers)
            .map(|s| s.rect.bottom());
        let floor = self
            .segments
            .iter()
            .filter(|s| s.side == Side::Floor)
            .find(covers)
            .map(|s| s.rect.y);

        match (ceiling, floor) {
            (Some(c), Some(f)) => (c + f) / 2.0,
            (Some(c), None) => (c + SCREEN_HEIGHT) / 2.0,
            (None, Some(f)) => (HUD_HEIGHT + f) / 2.0,
            (None, None) => self.cursor.last_y,
        }
    }
}
