//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. A run is in-memory only; the
//! persisted objects (settings, high scores, lifetime stats) live in their
//! own modules and are derived from this state when a run ends.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::effects::ActiveEffects;
use crate::consts::*;

/// The player's car. Exactly one exists, owned directly by the state -
/// it is never stored in an entity array.
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Current lateral velocity (set from steer input each tick)
    pub vel_x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ROAD_WIDTH / 2.0, PLAYER_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_x: 0.0,
        }
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// An oncoming enemy car
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Palette index for rendering
    pub color: u8,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// Power-up kinds, one per timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    SlowMotion,
    DoublePoints,
}

/// A falling power-up pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Player lives remaining
    pub lives: u8,
    pub score: u64,
    /// Distance travelled this run (meters)
    pub distance_m: f64,
    /// Sim clock: seconds of simulated (unpaused) time
    pub clock: f64,
    /// Tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Oncoming cars; no ordering requirement
    pub enemies: Vec<Enemy>,
    /// Falling pickups; no ordering requirement
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Set once when lives hit zero, so game over is reported exactly once
    pub game_over: bool,
    /// Dodged-car counter for lifetime stats
    pub dodged: u64,
    /// Spawn RNG, seeded per run
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            lives: START_LIVES,
            score: 0,
            distance_m: 0.0,
            clock: 0.0,
            time_ticks: 0,
            player: Player::default(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            game_over: false,
            dodged: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
