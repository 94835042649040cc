//! Timed status effects on the player car
//!
//! Each effect is an optional expiry instant on the sim clock (seconds of
//! simulated time, frozen while paused). Pickup refreshes take the later of
//! the old and new expiry, and expiry is a per-tick poll against the clock.
//! There are no deferred callbacks, so re-acquiring an active effect can
//! never turn it off early. While an effect is active its expiry only moves
//! forward.

use crate::consts::{DOUBLE_POINTS_DURATION, SHIELD_DURATION, SLOW_DURATION};

/// Kinds of timed effect a power-up grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Enemy collisions destroy the enemy instead of costing a life
    Shield,
    /// Enemy cars and power-ups fall at half speed
    SlowMotion,
    /// Dodge and destroy scores are doubled
    DoublePoints,
}

impl EffectKind {
    /// Duration granted per pickup (seconds)
    pub fn duration(&self) -> f64 {
        match self {
            EffectKind::Shield => SHIELD_DURATION,
            EffectKind::SlowMotion => SLOW_DURATION,
            EffectKind::DoublePoints => DOUBLE_POINTS_DURATION,
        }
    }
}

/// Active effect expiries, keyed on the sim clock
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    shield_until: Option<f64>,
    slow_until: Option<f64>,
    double_until: Option<f64>,
}

impl ActiveEffects {
    fn slot(&mut self, kind: EffectKind) -> &mut Option<f64> {
        match kind {
            EffectKind::Shield => &mut self.shield_until,
            EffectKind::SlowMotion => &mut self.slow_until,
            EffectKind::DoublePoints => &mut self.double_until,
        }
    }

    /// Apply a pickup at the given sim clock. Refreshing an active effect
    /// keeps the later of the two expiries.
    pub fn apply(&mut self, kind: EffectKind, clock: f64) {
        let new_end = clock + kind.duration();
        let slot = self.slot(kind);
        *slot = Some(match *slot {
            Some(end) => end.max(new_end),
            None => new_end,
        });
    }

    /// Whether an effect is active at the given sim clock
    pub fn is_active(&self, kind: EffectKind, clock: f64) -> bool {
        let end = match kind {
            EffectKind::Shield => self.shield_until,
            EffectKind::SlowMotion => self.slow_until,
            EffectKind::DoublePoints => self.double_until,
        };
        end.is_some_and(|end| clock < end)
    }

    /// Remaining seconds of an effect, for HUD display
    pub fn remaining(&self, kind: EffectKind, clock: f64) -> f64 {
        let end = match kind {
            EffectKind::Shield => self.shield_until,
            EffectKind::SlowMotion => self.slow_until,
            EffectKind::DoublePoints => self.double_until,
        };
        end.map_or(0.0, |end| (end - clock).max(0.0))
    }

    /// Per-tick poll: clear expired slots
    pub fn expire(&mut self, clock: f64) {
        for slot in [
            &mut self.shield_until,
            &mut self.slow_until,
            &mut self.double_until,
        ] {
            if slot.is_some_and(|end| clock >= end) {
                *slot = None;
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_expire() {
        let mut fx = ActiveEffects::default();
        fx.apply(EffectKind::Shield, 10.0);
        assert!(fx.is_active(EffectKind::Shield, 10.0));
        assert_eq!(fx.remaining(EffectKind::Shield, 10.0), SHIELD_DURATION);
        assert_eq!(fx.remaining(EffectKind::Shield, 12.0), SHIELD_DURATION - 2.0);
        assert!(fx.is_active(EffectKind::Shield, 10.0 + SHIELD_DURATION - 0.01));
        assert!(!fx.is_active(EffectKind::Shield, 10.0 + SHIELD_DURATION));

        fx.expire(10.0 + SHIELD_DURATION);
        assert_eq!(fx.remaining(EffectKind::Shield, 10.0 + SHIELD_DURATION), 0.0);
    }

    #[test]
    fn test_reacquire_extends_to_later_expiry() {
        let mut fx = ActiveEffects::default();
        fx.apply(EffectKind::SlowMotion, 0.0);
        // Re-acquire mid-effect: new expiry is 2.0 + duration, later than the old
        fx.apply(EffectKind::SlowMotion, 2.0);
        assert!(fx.is_active(EffectKind::SlowMotion, 2.0 + SLOW_DURATION - 0.01));
        assert!(!fx.is_active(EffectKind::SlowMotion, 2.0 + SLOW_DURATION));
    }

    #[test]
    fn test_refresh_never_shortens() {
        // A pickup applied at an earlier clock than a pending expiry must not
        // pull the expiry backward
        let mut fx = ActiveEffects::default();
        fx.apply(EffectKind::DoublePoints, 100.0);
        fx.apply(EffectKind::DoublePoints, 98.0);
        assert!(fx.is_active(EffectKind::DoublePoints, 100.0 + DOUBLE_POINTS_DURATION - 0.01));
    }

    #[test]
    fn test_effects_independent() {
        let mut fx = ActiveEffects::default();
        fx.apply(EffectKind::Shield, 0.0);
        assert!(!fx.is_active(EffectKind::SlowMotion, 0.0));
        assert!(!fx.is_active(EffectKind::DoublePoints, 0.0));
    }
}
