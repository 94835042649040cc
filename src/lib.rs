//! Road Rush - a top-down lane-dodging racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, timed effects)
//! - `game_loop`: Frame pacing and the menu/playing/paused/game-over machine
//! - `particles`: Visual particle bursts
//! - `audio`: Web Audio synth wrapper (degrades to silence)
//! - `storage`: LocalStorage-backed persistence with in-memory fallback

pub mod audio;
pub mod game_loop;
pub mod highscores;
pub mod particles;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod storage;

pub use game_loop::{Game, GameLoop, Phase};
pub use highscores::HighScores;
pub use settings::Settings;
pub use stats::Stats;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Frame delta clamp - a resumed tab must not produce a huge jump
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Road dimensions (logical pixels, origin top-left)
    pub const ROAD_WIDTH: f32 = 400.0;
    pub const ROAD_HEIGHT: f32 = 600.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Fixed vertical position of the player car center
    pub const PLAYER_Y: f32 = ROAD_HEIGHT - 80.0;
    /// Lateral speed at full steer (pixels/s)
    pub const PLAYER_LATERAL_SPEED: f32 = 280.0;

    /// Enemy cars
    pub const ENEMY_WIDTH: f32 = 28.0;
    pub const ENEMY_HEIGHT: f32 = 48.0;
    /// Downward speed of a fresh enemy at distance 0 (pixels/s)
    pub const ENEMY_BASE_SPEED: f32 = 180.0;
    /// Extra enemy speed gained per 1000 m travelled (pixels/s)
    pub const ENEMY_SPEED_PER_KM: f32 = 60.0;
    /// Per-tick Bernoulli spawn probability at distance 0
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.020;
    /// Spawn probability gained per 1000 m travelled
    pub const ENEMY_SPAWN_PER_KM: f64 = 0.012;
    /// Spawn probability ceiling
    pub const ENEMY_SPAWN_MAX: f64 = 0.08;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 22.0;
    pub const POWERUP_SPEED: f32 = 140.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.004;

    /// Scoring
    pub const DODGE_POINTS: u64 = 10;
    pub const SHIELD_DESTROY_POINTS: u64 = 25;

    /// Lives
    pub const START_LIVES: u8 = 3;

    /// Road scroll speed (pixels/s), used for distance accrual
    pub const SCROLL_SPEED: f32 = 240.0;
    /// Pixels of scroll per meter of distance
    pub const PIXELS_PER_METER: f32 = 8.0;

    /// Effect durations (seconds on the sim clock)
    pub const SHIELD_DURATION: f64 = 5.0;
    pub const SLOW_DURATION: f64 = 4.0;
    pub const DOUBLE_POINTS_DURATION: f64 = 6.0;
    /// Enemy/power-up velocity multiplier while slow-motion is active
    pub const SLOW_FACTOR: f32 = 0.5;
}

/// Enemy speed for the current distance travelled (meters)
#[inline]
pub fn enemy_speed_at(distance_m: f64) -> f32 {
    consts::ENEMY_BASE_SPEED + consts::ENEMY_SPEED_PER_KM * (distance_m as f32 / 1000.0)
}

/// Per-tick enemy spawn probability for the current distance (meters)
#[inline]
pub fn enemy_spawn_chance_at(distance_m: f64) -> f64 {
    (consts::ENEMY_SPAWN_CHANCE + consts::ENEMY_SPAWN_PER_KM * distance_m / 1000.0)
        .min(consts::ENEMY_SPAWN_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_chance_grows_with_distance_up_to_cap() {
        let mut prev = enemy_spawn_chance_at(0.0);
        assert_eq!(prev, consts::ENEMY_SPAWN_CHANCE);
        for km in 1..50 {
            let chance = enemy_spawn_chance_at(km as f64 * 1000.0);
            assert!(chance >= prev);
            prev = chance;
        }
        assert_eq!(prev, consts::ENEMY_SPAWN_MAX);
    }

    #[test]
    fn test_spawn_chance_stays_a_valid_probability() {
        // The cap is what keeps the Bernoulli draw in range on long runs
        for distance in [0.0, 1e3, 1e5, 1e7, f64::MAX] {
            let chance = enemy_spawn_chance_at(distance);
            assert!(chance > 0.0);
            assert!(chance <= consts::ENEMY_SPAWN_MAX);
            assert!(chance <= 1.0);
        }
    }

    #[test]
    fn test_enemy_speed_grows_with_distance() {
        assert_eq!(enemy_speed_at(0.0), consts::ENEMY_BASE_SPEED);
        assert!(enemy_speed_at(1000.0) > enemy_speed_at(0.0));
        assert!(enemy_speed_at(5000.0) > enemy_speed_at(1000.0));
    }
}
