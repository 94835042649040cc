//! Fixed timestep simulation tick
//!
//! Advances one frame of gameplay: steering, entity integration, Bernoulli
//! spawn draws, off-screen removal with dodge scoring, pickup and crash
//! collision passes, and the timed-effect expiry poll. Emits events the
//! driver turns into audio, particle bursts and loop transitions.

use glam::Vec2;
use rand::Rng;

use super::effects::EffectKind;
use super::state::{Enemy, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::{enemy_spawn_chance_at, enemy_speed_at};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering axis, -1.0 (left) to 1.0 (right)
    pub steer: f32,
    /// Absolute lateral target (touch input); overrides `steer` when set
    pub target_x: Option<f32>,
}

/// What happened during a tick, for audio/particles/loop transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    /// An enemy car left the bottom of the road without being hit
    Dodged,
    /// The player collected a power-up
    PowerUpCollected(PowerUpKind, Vec2),
    /// An enemy hit the shield and was destroyed
    ShieldBlock(Vec2),
    /// An enemy hit the player and cost a life
    Crash(Vec2),
    /// Lives reached zero. Emitted exactly once per run.
    GameOver,
}

impl From<PowerUpKind> for EffectKind {
    fn from(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Shield => EffectKind::Shield,
            PowerUpKind::SlowMotion => EffectKind::SlowMotion,
            PowerUpKind::DoublePoints => EffectKind::DoublePoints,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<TickEvent> {
    let mut events = Vec::new();

    // A finished run never advances. The loop stops calling update after the
    // GameOver transition; this guard keeps repeated calls harmless.
    if state.game_over {
        return events;
    }

    state.time_ticks += 1;
    state.clock += dt as f64;

    // Expiry poll: once per tick against the sim clock
    state.effects.expire(state.clock);

    let slow = state.effects.is_active(EffectKind::SlowMotion, state.clock);
    let world_scale = if slow { SLOW_FACTOR } else { 1.0 };
    let double = state.effects.is_active(EffectKind::DoublePoints, state.clock);
    let score_mult: u64 = if double { 2 } else { 1 };

    // Distance accrual follows the world speed, so slow-motion also slows
    // the odometer
    state.distance_m += (SCROLL_SPEED * world_scale * dt / PIXELS_PER_METER) as f64;

    // Steering
    let half_w = state.player.size.x / 2.0;
    state.player.vel_x = match input.target_x {
        Some(target) => {
            let delta = target - state.player.pos.x;
            let max_step = PLAYER_LATERAL_SPEED * dt;
            delta.clamp(-max_step, max_step) / dt
        }
        None => input.steer.clamp(-1.0, 1.0) * PLAYER_LATERAL_SPEED,
    };
    state.player.pos.x =
        (state.player.pos.x + state.player.vel_x * dt).clamp(half_w, ROAD_WIDTH - half_w);

    // Integrate entities
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * world_scale * dt;
    }
    for powerup in &mut state.powerups {
        powerup.pos += powerup.vel * world_scale * dt;
    }

    // Remove enemies fully past the lower bound, scoring each exactly once
    let mut i = 0;
    while i < state.enemies.len() {
        if state.enemies[i].aabb().fully_below(ROAD_HEIGHT) {
            state.enemies.swap_remove(i);
            state.score += DODGE_POINTS * score_mult;
            state.dodged += 1;
            events.push(TickEvent::Dodged);
        } else {
            i += 1;
        }
    }
    state
        .powerups
        .retain(|p| !p.aabb().fully_below(ROAD_HEIGHT));

    // Spawn draws: independent Bernoulli trials per tick, so spawn rate is
    // probabilistic rather than scheduled
    spawn_entities(state);

    // Pickups are processed before enemy collisions, and both passes run to
    // completion: a tick where the player overlaps a shield and an enemy
    // collects the shield first and blocks the crash
    let player_box = state.player.aabb();
    let mut i = 0;
    while i < state.powerups.len() {
        if player_box.overlaps(&state.powerups[i].aabb()) {
            let powerup = state.powerups.swap_remove(i);
            state.effects.apply(powerup.kind.into(), state.clock);
            events.push(TickEvent::PowerUpCollected(powerup.kind, powerup.pos));
        } else {
            i += 1;
        }
    }

    let shield = state.effects.is_active(EffectKind::Shield, state.clock);
    let mut i = 0;
    while i < state.enemies.len() {
        if player_box.overlaps(&state.enemies[i].aabb()) {
            let enemy = state.enemies.swap_remove(i);
            if shield {
                state.score += SHIELD_DESTROY_POINTS * score_mult;
                events.push(TickEvent::ShieldBlock(enemy.pos));
            } else {
                events.push(TickEvent::Crash(enemy.pos));
                state.lives = state.lives.saturating_sub(1);
                if state.lives == 0 && !state.game_over {
                    state.game_over = true;
                    events.push(TickEvent::GameOver);
                }
            }
        } else {
            i += 1;
        }
    }

    events
}

/// Roll the per-tick spawn probabilities and place new entities above the
/// visible road
fn spawn_entities(state: &mut GameState) {
    let enemy_chance = enemy_spawn_chance_at(state.distance_m);
    if state.rng.random_bool(enemy_chance) {
        let id = state.next_entity_id();
        let half_w = ENEMY_WIDTH / 2.0;
        let x = state.rng.random_range(half_w..ROAD_WIDTH - half_w);
        let speed = enemy_speed_at(state.distance_m) * state.rng.random_range(0.9..1.15);
        let color = state.rng.random_range(0..5u8);
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, -ENEMY_HEIGHT / 2.0),
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            vel: Vec2::new(0.0, speed),
            color,
        });
    }

    if state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        let id = state.next_entity_id();
        let half_w = POWERUP_SIZE / 2.0;
        let x = state.rng.random_range(half_w..ROAD_WIDTH - half_w);
        let kind = match state.rng.random_range(0..3u8) {
            0 => PowerUpKind::Shield,
            1 => PowerUpKind::SlowMotion,
            _ => PowerUpKind::DoublePoints,
        };
        state.powerups.push(PowerUp {
            id,
            kind,
            pos: Vec2::new(x, -POWERUP_SIZE / 2.0),
            size: Vec2::splat(POWERUP_SIZE),
            vel: Vec2::new(0.0, POWERUP_SPEED),
        });
    }
}
