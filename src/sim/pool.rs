//! Entity pool: shots, missiles, rocks and explosions
//!
//! Updates run in two phases. During the scan phases only `active` flags
//! change; `cleanup` removes the inactive entities afterwards, once the
//! orchestrator is done querying the pool for the frame.

use glam::Vec2;
use rand::Rng;

use super::entities::{Explosion, PlayerShot, Rock};
use super::geom::Rect;
use super::missile::Missile;
use super::state::GameEvent;
use super::terrain::{ProjectileHit, Terrain};
use crate::consts::*;

#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    pub shots: Vec<PlayerShot>,
    pub missiles: Vec<Missile>,
    pub rocks: Vec<Rock>,
    pub explosions: Vec<Explosion>,
    missile_timer: f32,
    rock_timer: f32,
}

/// Spawn an explosion and report it
fn explode(explosions: &mut Vec<Explosion>, events: &mut Vec<GameEvent>, pos: Vec2) {
    explosions.push(Explosion::new(pos));
    events.push(GameEvent::Explosion { pos });
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fire a shot from `pos` in the craft's facing direction
    pub fn spawn_shot(&mut self, pos: Vec2, facing_right: bool) {
        self.shots.push(PlayerShot::new(pos, facing_right));
    }

    /// Run one frame of spawning, movement and collision resolution.
    ///
    /// Does not remove anything; call `cleanup` once the frame's queries are done.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        terrain: &mut Terrain,
        player_pos: Vec2,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_enemies(dt, terrain, rng);

        self.update_shots(terrain, events);
        self.update_missiles(player_pos, dt, terrain, events);
        self.resolve_missile_hits(events);
        self.update_rocks(terrain, events);
        self.update_explosions(dt);
    }

    fn spawn_enemies<R: Rng + ?Sized>(&mut self, dt: f32, terrain: &Terrain, rng: &mut R) {
        if terrain.distance < MISSILE_WARMUP_DISTANCE {
            return;
        }

        self.missile_timer += dt;
        if self.missile_timer > MISSILE_SPAWN_SECS {
            self.missile_timer = 0.0;
            let pos = Vec2::new(
                SCREEN_WIDTH + MISSILE_SPAWN_MARGIN,
                terrain.current_gap_center(),
            );
            let missile = Missile::random(pos, rng);
            log::debug!(
                "{} missile spawned at y={:.0} (distance {:.0})",
                missile.kind.name(),
                pos.y,
                terrain.distance
            );
            self.missiles.push(missile);
        }

        if terrain.distance > ROCK_WARMUP_DISTANCE {
            self.rock_timer += dt;
            if self.rock_timer > ROCK_SPAWN_SECS {
                self.rock_timer = 0.0;
                let pos = Vec2::new(0.0, terrain.gap_center_at(0.0));
                self.rocks.push(Rock::new(pos, ROCK_RADIUS));
                log::debug!("rock spawned at y={:.0}", pos.y);
            }
        }
    }

    fn update_shots(&mut self, terrain: &mut Terrain, events: &mut Vec<GameEvent>) {
        for shot in self.shots.iter_mut().filter(|s| s.active) {
            shot.update();
            if !shot.active {
                continue;
            }

            match terrain.projectile_hit(&shot.rect()) {
                ProjectileHit::Miss => {}
                hit => {
                    shot.deactivate();
                    if hit == ProjectileHit::WallDestroyed {
                        events.push(GameEvent::WallDestroyed { pos: shot.pos });
                    }
                    explode(&mut self.explosions, events, shot.pos);
                }
            }
        }
    }

    fn update_missiles(
        &mut self,
        player_pos: Vec2,
        dt: f32,
        terrain: &Terrain,
        events: &mut Vec<GameEvent>,
    ) {
        for missile in self.missiles.iter_mut().filter(|m| m.active) {
            missile.advance(player_pos, dt);
            if !missile.active {
                continue;
            }

            let rect = missile.rect();
            if terrain.check_collision(&rect) {
                missile.deactivate();
                explode(
                    &mut self.explosions,
                    events,
                    Vec2::new(rect.x + MISSILE_BODY_WIDTH / 2.0, rect.y + MISSILE_HEIGHT / 2.0),
                );
            }
        }
    }

    /// Missile vs shot; the first overlapping shot takes the missile out
    fn resolve_missile_hits(&mut self, events: &mut Vec<GameEvent>) {
        for missile in self.missiles.iter_mut().filter(|m| m.active) {
            let rect = missile.rect();
            if let Some(shot) = self
                .shots
                .iter_mut()
                .filter(|s| s.active)
                .find(|s| rect.overlaps(&s.rect()))
            {
                missile.deactivate();
                shot.deactivate();
                let mid = (Vec2::new(rect.x, rect.y) + shot.pos) / 2.0;
                explode(&mut self.explosions, events, mid);
            }
        }
    }

    fn update_rocks(&mut self, terrain: &Terrain, events: &mut Vec<GameEvent>) {
        for rock in self.rocks.iter_mut().filter(|r| r.active) {
            rock.update();
            if !rock.active {
                continue;
            }

            let rect = rock.rect();
            if terrain.check_collision(&rect) {
                rock.deactivate();
                explode(&mut self.explosions, events, rock.pos);
                continue;
            }

            if let Some(shot) = self
                .shots
                .iter_mut()
                .filter(|s| s.active)
                .find(|s| rect.overlaps(&s.rect()))
            {
                rock.deactivate();
                shot.deactivate();
                let mid = (Vec2::new(rect.x, rect.y) + shot.pos) / 2.0;
                explode(&mut self.explosions, events, mid);
            }
        }
    }

    fn update_explosions(&mut self, dt: f32) {
        for explosion in self.explosions.iter_mut() {
            explosion.update(dt);
        }
        self.explosions.retain(|e| e.active);
    }

    /// True if any live missile or rock touches the player's rect
    pub fn check_player_collision(&self, player: &Rect) -> bool {
        self.missiles
            .iter()
            .any(|m| m.active && player.overlaps(&m.rect()))
            || self
                .rocks
                .iter()
                .any(|r| r.active && player.overlaps(&r.rect()))
    }

    /// Drop everything deactivated during the frame
    pub fn cleanup(&mut self) {
        self.shots.retain(|s| s.active);
        self.missiles.retain(|m| m.active);
        self.rocks.retain(|r| r.active);
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
            && self.missiles.is_empty()
            && self.rocks.is_empty()
            && self.explosions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::missile::MissileKind;
    use crate::sim::terrain::Wall;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_terrain(rng: &mut Pcg32) -> Terrain {
        let mut t = Terrain::new(rng);
        t.segments.clear();
        t.walls.clear();
        t.hazards.clear();
        t
    }

    #[test]
    fn test_first_hit_wins_for_missile_vs_shots() {
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        pool.missiles.push(Missile::new(
            Vec2::new(500.0, 300.0),
            MissileKind::Standard,
        ));
        pool.spawn_shot(Vec2::new(505.0, 305.0), true);
        pool.spawn_shot(Vec2::new(520.0, 305.0), true);

        pool.resolve_missile_hits(&mut events);

        assert!(!pool.missiles[0].active);
        assert!(!pool.shots[0].active);
        assert!(pool.shots[1].active);
        assert_eq!(pool.explosions.len(), 1);
        assert_eq!(pool.explosions[0].pos, Vec2::new(502.5, 302.5));
        assert_eq!(
            events,
            vec![GameEvent::Explosion {
                pos: Vec2::new(502.5, 302.5)
            }]
        );
    }

    #[test]
    fn test_first_hit_wins_for_rock_vs_shots() {
        let mut rng = Pcg32::seed_from_u64(1);
        let terrain = open_terrain(&mut rng);
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        pool.rocks.push(Rock::new(Vec2::new(498.0, 300.0), ROCK_RADIUS));
        pool.spawn_shot(Vec2::new(500.0, 300.0), true);
        pool.spawn_shot(Vec2::new(505.0, 300.0), true);

        pool.update_rocks(&terrain, &mut events);

        assert!(!pool.rocks[0].active);
        assert_eq!(pool.shots.iter().filter(|s| s.active).count(), 1);
        assert_eq!(pool.explosions.len(), 1);
    }

    #[test]
    fn test_rock_running_into_terrain_explodes() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut events = Vec::new();

        // Into the safe-zone floor
        let terrain = Terrain::new(&mut rng);
        let mut pool = EntityPool::new();
        pool.rocks.push(Rock::new(Vec2::new(100.0, 420.0), ROCK_RADIUS));
        pool.update_rocks(&terrain, &mut events);
        assert!(!pool.rocks[0].active);
        assert_eq!(pool.explosions.len(), 1);
        assert_eq!(pool.explosions[0].pos, Vec2::new(102.0, 420.0));

        // Into an active wall in open air
        let mut terrain = open_terrain(&mut rng);
        terrain.walls.push_back(Wall {
            rect: Rect::new(116.0, 0.0, WALL_WIDTH, SCREEN_HEIGHT),
            weak_spot: Rect::new(116.0, 400.0, WALL_WIDTH, WEAK_SPOT_HEIGHT),
            active: true,
        });
        let mut pool = EntityPool::new();
        pool.rocks.push(Rock::new(Vec2::new(100.0, 300.0), ROCK_RADIUS));
        pool.update_rocks(&terrain, &mut events);
        assert!(!pool.rocks[0].active);
        assert_eq!(pool.explosions.len(), 1);

        // A destroyed wall lets it roll on
        terrain.walls[0].active = false;
        let mut pool = EntityPool::new();
        pool.rocks.push(Rock::new(Vec2::new(100.0, 300.0), ROCK_RADIUS));
        pool.update_rocks(&terrain, &mut events);
        assert!(pool.rocks[0].active);
        assert!(pool.explosions.is_empty());
    }

    #[test]
    fn test_removal_is_deferred_to_cleanup() {
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        pool.missiles.push(Missile::new(
            Vec2::new(500.0, 300.0),
            MissileKind::Standard,
        ));
        pool.spawn_shot(Vec2::new(505.0, 305.0), true);
        pool.resolve_missile_hits(&mut events);

        assert_eq!(pool.missiles.len(), 1);
        assert_eq!(pool.shots.len(), 1);
        pool.cleanup();
        assert!(pool.missiles.is_empty());
        assert!(pool.shots.is_empty());
        // Explosions live on until their timer runs out
        assert_eq!(pool.explosions.len(), 1);

        pool.reset();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_shot_against_terrain_explodes() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut terrain = Terrain::new(&mut rng);
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        // Inside the safe-zone floor
        pool.spawn_shot(Vec2::new(200.0, 410.0), true);

        pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);

        assert!(!pool.shots[0].active);
        assert_eq!(pool.explosions.len(), 1);
        assert!(matches!(events[0], GameEvent::Explosion { .. }));
    }

    #[test]
    fn test_shot_through_weak_spot_destroys_wall() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut terrain = open_terrain(&mut rng);
        terrain.walls.push_back(Wall {
            rect: Rect::new(520.0, 0.0, WALL_WIDTH, SCREEN_HEIGHT),
            weak_spot: Rect::new(520.0, 290.0, WALL_WIDTH, WEAK_SPOT_HEIGHT),
            active: true,
        });
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        pool.spawn_shot(Vec2::new(505.0, 300.0), true);

        pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);

        assert!(!terrain.walls[0].active);
        assert!(!pool.shots[0].active);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::WallDestroyed { .. })));
    }

    #[test]
    fn test_missile_hitting_terrain_explodes() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut terrain = Terrain::new(&mut rng);
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        // Inside the safe-zone floor
        pool.missiles.push(Missile::new(
            Vec2::new(300.0, 450.0),
            MissileKind::Standard,
        ));

        pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);

        assert!(!pool.missiles[0].active);
        assert_eq!(pool.explosions.len(), 1);
    }

    #[test]
    fn test_no_enemies_before_warmup() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut terrain = open_terrain(&mut rng);
        terrain.distance = MISSILE_WARMUP_DISTANCE - 10.0;
        let mut pool = EntityPool::new();
        let mut events = Vec::new();
        for _ in 0..600 {
            pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);
        }
        assert!(pool.missiles.is_empty());
        assert!(pool.rocks.is_empty());
    }

    #[test]
    fn test_missile_spawn_cadence() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut terrain = open_terrain(&mut rng);
        terrain.distance = MISSILE_WARMUP_DISTANCE;
        let mut pool = EntityPool::new();
        let mut events = Vec::new();

        for _ in 0..200 {
            pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);
        }
        assert_eq!(pool.missiles.len(), 1);
        assert_eq!(pool.missiles[0].start_pos.y, terrain.current_gap_center());
        // Rocks are gated behind a longer warmup
        assert!(pool.rocks.is_empty());
    }

    #[test]
    fn test_rocks_spawn_after_long_warmup() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut terrain = open_terrain(&mut rng);
        terrain.distance = ROCK_WARMUP_DISTANCE + 1.0;
        let mut pool = EntityPool::new();
        let mut events = Vec::new();

        for _ in 0..320 {
            pool.update(SIM_DT, &mut terrain, Vec2::ZERO, &mut rng, &mut events);
        }
        assert_eq!(pool.rocks.len(), 1);
        assert!(pool.rocks[0].pos.x > 0.0);
    }

    #[test]
    fn test_player_collision() {
        let mut pool = EntityPool::new();
        let player = Rect::new(100.0, 330.0, CRAFT_WIDTH, CRAFT_HEIGHT);
        assert!(!pool.check_player_collision(&player));

        pool.rocks.push(Rock::new(Vec2::new(90.0, 340.0), ROCK_RADIUS));
        assert!(pool.check_player_collision(&player));

        pool.rocks[0].deactivate();
        assert!(!pool.check_player_collision(&player));

        pool.missiles.push(Missile::new(
            Vec2::new(130.0, 335.0),
            MissileKind::Standard,
        ));
        assert!(pool.check_player_collision(&player));
    }
}
