//! Canvas-2D render pass (wasm32 only)
//!
//! Thin by design: road surface, lane markings scrolled by the odometer,
//! cars, pickups and particles. All drawing happens in logical road
//! coordinates; the context is scaled to the backing canvas size each frame.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::particles::ParticleSystem;
use crate::sim::{EffectKind, GameState, PowerUpKind};

/// Enemy car palette, indexed by `Enemy::color`
const CAR_COLORS: [&str; 5] = ["#d9534f", "#f0ad4e", "#5bc0de", "#b07cc6", "#8a9a5b"];
/// Particle palette, indexed by `Particle::color`
const PARTICLE_COLORS: [&str; 3] = ["#ffd166", "#6fe3ff", "#ff6b6b"];

/// Owns the 2D context for one canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, canvas })
    }

    /// Draw one frame of the frozen or live state
    pub fn draw(&self, state: &GameState, particles: &ParticleSystem) {
        let sx = self.canvas.width() as f64 / ROAD_WIDTH as f64;
        let sy = self.canvas.height() as f64 / ROAD_HEIGHT as f64;

        self.ctx.save();
        let _ = self.ctx.scale(sx, sy);

        self.draw_road(state);
        self.draw_powerups(state);
        self.draw_enemies(state);
        self.draw_player(state);
        self.draw_particles(particles);

        self.ctx.restore();
    }

    fn draw_road(&self, state: &GameState) {
        self.ctx.set_fill_style_str("#2b2b33");
        self.ctx
            .fill_rect(0.0, 0.0, ROAD_WIDTH as f64, ROAD_HEIGHT as f64);

        // Lane markings scroll with the odometer
        let dash_len = 24.0;
        let gap = 16.0;
        let period = dash_len + gap;
        let offset = (state.distance_m * PIXELS_PER_METER as f64).rem_euclid(period);

        self.ctx.set_fill_style_str("#4a4a55");
        for lane in 1..4 {
            let x = ROAD_WIDTH as f64 * lane as f64 / 4.0 - 2.0;
            let mut y = offset - period;
            while y < ROAD_HEIGHT as f64 {
                self.ctx.fill_rect(x, y, 4.0, dash_len);
                y += period;
            }
        }
    }

    fn draw_player(&self, state: &GameState) {
        let p = &state.player;
        let min = p.pos - p.size * 0.5;

        // Shield halo while active
        if state
            .effects
            .is_active(EffectKind::Shield, state.clock)
        {
            self.ctx.set_global_alpha(0.35);
            self.ctx.set_fill_style_str("#6fe3ff");
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                (p.size.y * 0.75) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
            self.ctx.set_global_alpha(1.0);
        }

        self.ctx.set_fill_style_str("#3ddc84");
        self.ctx.fill_rect(
            min.x as f64,
            min.y as f64,
            p.size.x as f64,
            p.size.y as f64,
        );
    }

    fn draw_enemies(&self, state: &GameState) {
        for enemy in &state.enemies {
            let min = enemy.pos - enemy.size * 0.5;
            let color = CAR_COLORS[enemy.color as usize % CAR_COLORS.len()];
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                min.x as f64,
                min.y as f64,
                enemy.size.x as f64,
                enemy.size.y as f64,
            );
        }
    }

    fn draw_powerups(&self, state: &GameState) {
        for powerup in &state.powerups {
            let color = match powerup.kind {
                PowerUpKind::Shield => "#6fe3ff",
                PowerUpKind::SlowMotion => "#b07cc6",
                PowerUpKind::DoublePoints => "#ffd166",
            };
            self.ctx.set_fill_style_str(color);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                powerup.pos.x as f64,
                powerup.pos.y as f64,
                (powerup.size.x / 2.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
    }

    fn draw_particles(&self, particles: &ParticleSystem) {
        for p in particles.iter() {
            let color = PARTICLE_COLORS[p.color as usize % PARTICLE_COLORS.len()];
            self.ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                (p.pos.x - p.size / 2.0) as f64,
                (p.pos.y - p.size / 2.0) as f64,
                p.size as f64,
                p.size as f64,
            );
        }
        self.ctx.set_global_alpha(1.0);
    }
}
