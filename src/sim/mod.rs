//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//!
//! The driver owns a [`GameState`], feeds it [`TickInput`]s through
//! [`tick`], and reacts to the returned [`TickEvent`]s.

pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use effects::{ActiveEffects, EffectKind};
pub use state::{Enemy, GameState, Player, PowerUp, PowerUpKind};
pub use tick::{TickEvent, TickInput, tick};
