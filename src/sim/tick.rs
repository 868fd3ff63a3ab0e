//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// How far ahead of the nose the autopilot reads the tunnel
const AUTOPILOT_LOOKAHEAD: f32 = 60.0;
/// Vertical velocity projection, in ticks, used when deciding to thrust
const AUTOPILOT_PROJECTION: f32 = 6.0;
/// Range at which the autopilot starts shooting at what's ahead
const AUTOPILOT_FIRE_RANGE: f32 = 320.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Climb (space / up)
    pub thrust: bool,
    pub left: bool,
    pub right: bool,
    /// Fire one shot (edge-triggered by the front end)
    pub fire: bool,
    /// Start a new run once the current one is over
    pub restart: bool,
    /// Demo mode - AI flies the craft
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            let seed = state.rng.random::<u64>();
            log::info!("restarting after score {}", state.score());
            *state = GameState::new(seed);
        }
        return;
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    state.craft.update(&input, dt);
    state.terrain.update(&mut state.rng);

    if input.fire && state.ammo > 0 {
        state.pool.spawn_shot(state.craft.nose(), state.craft.facing_right);
        state.ammo -= 1;
        state.events.push(GameEvent::ShotFired);
    }

    if state.ammo < MAX_AMMO {
        state.ammo_timer += dt;
        if state.ammo_timer >= AMMO_RECHARGE_SECS {
            state.ammo += 1;
            state.ammo_timer = 0.0;
        }
    }

    state.pool.update(
        dt,
        &mut state.terrain,
        state.craft.pos,
        &mut state.rng,
        &mut state.events,
    );

    let player = state.craft.rect();
    if state.terrain.check_collision(&player) || state.pool.check_player_collision(&player) {
        state.phase = GamePhase::GameOver;
        let score = state.score();
        state.events.push(GameEvent::GameOver { score });
        log::info!("game over at tick {}, score {score}", state.time_ticks);
    }

    state.pool.cleanup();
}

/// Steer for the middle of the tunnel just ahead, lining up with weak spots
/// when a wall is coming, and shoot at whatever is in range.
fn autopilot(state: &GameState) -> TickInput {
    let craft = &state.craft;
    let nose = craft.nose();
    let mid_y = craft.pos.y + CRAFT_HEIGHT / 2.0;

    let wall_ahead = state
        .terrain
        .active_walls()
        .find(|w| w.rect.x > nose.x && w.rect.x - nose.x < AUTOPILOT_FIRE_RANGE);

    let target_y = match wall_ahead {
        Some(wall) => wall.weak_spot.center().y,
        None => state.terrain.gap_center_at(nose.x + AUTOPILOT_LOOKAHEAD),
    };

    let projected = mid_y + craft.vel.y * AUTOPILOT_PROJECTION;
    let thrust = projected > target_y;

    let missile_ahead = state.pool.missiles.iter().any(|m| {
        m.active
            && m.pos.x > nose.x
            && m.pos.x - nose.x < AUTOPILOT_FIRE_RANGE
            && (m.pos.y - nose.y).abs() < 40.0
    });
    let lined_up = wall_ahead.is_some_and(|w| (w.weak_spot.center().y - nose.y).abs() < 12.0);
    // Space shots out so the magazine isn't dumped in one burst
    let fire = (missile_ahead || lined_up) && state.time_ticks % 12 == 0;

    TickInput {
        thrust,
        fire,
        autopilot: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::missile::{Missile, MissileKind};
    use glam::Vec2;

    #[test]
    fn test_idle_ticks_scroll_without_game_over() {
        let mut state = GameState::new(12345);
        let input = TickInput::default();
        for _ in 0..90 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.distance(), 270.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 90);
        assert_eq!(state.craft.pos, Vec2::new(CRAFT_START_X, CRAFT_START_Y));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(999);
        let mut b = GameState::new(999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.distance(), b.distance());
        assert_eq!(a.craft.pos, b.craft.pos);
        assert_eq!(a.terrain.segments, b.terrain.segments);
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_fire_spends_and_recharges_ammo() {
        let mut state = GameState::new(1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.ammo, MAX_AMMO - 1);
        assert_eq!(state.pool.shots.len(), 1);
        assert!(state.events.contains(&GameEvent::ShotFired));

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.ammo, MAX_AMMO);
    }

    #[test]
    fn test_fire_with_empty_magazine_does_nothing() {
        let mut state = GameState::new(1);
        state.ammo = 0;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.ammo, 0);
        assert!(state.pool.shots.is_empty());
        assert!(!state.events.contains(&GameEvent::ShotFired));
    }

    #[test]
    fn test_terrain_crash_ends_run() {
        let mut state = GameState::new(2);
        state.craft.pos.y = 500.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver { score: 3 })
        ));

        // Frozen until restart
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.distance(), 0.0);
        assert_ne!(state.seed, 2);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(3);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.seed, 3);
    }

    #[test]
    fn test_missile_hit_ends_run() {
        let mut state = GameState::new(4);
        let at = state.craft.pos + Vec2::new(10.0, 5.0);
        state
            .pool
            .missiles
            .push(Missile::new(at, MissileKind::Standard));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_over());
    }

    #[test]
    fn test_autopilot_survives_the_opening() {
        let mut state = GameState::new(5);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.craft.started);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
