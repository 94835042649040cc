//! Frame pacing and the game's phase machine
//!
//! One `GameLoop` is constructed per game instance and passed to the driver;
//! there are no global singletons. The phase value lives inside the loop and
//! changes only through the methods here. `frame` runs fixed-timestep update
//! substeps while playing, and renders every frame regardless, so a paused
//! game still draws its frozen state.
//!
//! `frame` takes `&mut self` and `&mut G`: re-entrant or concurrent
//! invocation is a compile error, which is the only concurrency model the
//! browser's single animation callback needs.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Phase of the loop's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Per-frame callbacks supplied by the driver
pub trait Game {
    /// Advance one fixed timestep. Called only while `Phase::Playing`.
    /// May request a phase transition (e.g. the sim reporting game over).
    fn update(&mut self, dt: f32) -> Option<Phase>;

    /// Draw the current state. Called every frame, in every phase.
    fn render(&mut self, dt: f32);
}

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Drives update/render once per display refresh
#[derive(Debug)]
pub struct GameLoop {
    phase: Phase,
    last_ms: f64,
    accumulator: f32,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            phase: Phase::Menu,
            last_ms: 0.0,
            accumulator: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rolling FPS estimate over the last 60 frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Begin a run (from the menu or after game over)
    pub fn start(&mut self) {
        match self.phase {
            Phase::Menu | Phase::GameOver => {
                self.phase = Phase::Playing;
                self.accumulator = 0.0;
                log::info!("Run started");
            }
            _ => log::warn!("start ignored in {:?}", self.phase),
        }
    }

    /// Suspend updates; rendering continues
    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Playing;
            // Drop time accrued while paused so resume doesn't fast-forward
            self.accumulator = 0.0;
            log::info!("Resumed");
        }
    }

    /// End the current run
    pub fn end_game(&mut self) {
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            self.phase = Phase::GameOver;
            log::info!("Game over");
        }
    }

    /// Back to the menu from any phase
    pub fn to_menu(&mut self) {
        self.phase = Phase::Menu;
    }

    /// Apply a transition requested by an update callback
    fn apply_request(&mut self, request: Phase) {
        match request {
            Phase::GameOver => self.end_game(),
            Phase::Paused => self.pause(),
            Phase::Playing => self.resume(),
            Phase::Menu => self.to_menu(),
        }
    }

    /// One display-refresh callback: clamp the elapsed time, run update
    /// substeps while playing, then always render
    pub fn frame<G: Game>(&mut self, now_ms: f64, game: &mut G) {
        let raw_dt = if self.last_ms > 0.0 {
            ((now_ms - self.last_ms) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_ms = now_ms;
        // Clamp so a suspended tab doesn't replay seconds of simulation
        let dt = raw_dt.clamp(0.0, MAX_FRAME_DT);

        self.record_frame_time(now_ms);

        if self.phase == Phase::Playing {
            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let request = game.update(SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
                if let Some(phase) = request {
                    self.apply_request(phase);
                    if self.phase != Phase::Playing {
                        break;
                    }
                }
            }
            // Shed backlog the substep cap didn't absorb
            if self.accumulator >= SIM_DT {
                self.accumulator = 0.0;
            }
        }

        game.render(dt);
    }

    fn record_frame_time(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest slot is the one we're about to overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts callback invocations; update can request a transition once
    struct StubGame {
        updates: u32,
        renders: u32,
        request: Option<Phase>,
    }

    impl StubGame {
        fn new() -> Self {
            Self {
                updates: 0,
                renders: 0,
                request: None,
            }
        }
    }

    impl Game for StubGame {
        fn update(&mut self, _dt: f32) -> Option<Phase> {
            self.updates += 1;
            self.request.take()
        }

        fn render(&mut self, _dt: f32) {
            self.renders += 1;
        }
    }

    fn run_frames(game_loop: &mut GameLoop, game: &mut StubGame, n: u32) {
        // 60 Hz frame timestamps
        let start = game_loop.last_ms;
        for i in 1..=n {
            game_loop.frame(start + 1000.0 + i as f64 * 1000.0 / 60.0, game);
        }
    }

    #[test]
    fn test_menu_renders_without_updating() {
        let mut game_loop = GameLoop::new();
        let mut game = StubGame::new();
        run_frames(&mut game_loop, &mut game, 10);
        assert_eq!(game.updates, 0);
        assert_eq!(game.renders, 10);
    }

    #[test]
    fn test_pause_suspends_update_but_not_render() {
        let mut game_loop = GameLoop::new();
        let mut game = StubGame::new();
        game_loop.start();
        run_frames(&mut game_loop, &mut game, 10);
        assert!(game.updates > 0);

        game_loop.pause();
        assert_eq!(game_loop.phase(), Phase::Paused);
        let updates_frozen = game.updates;
        let renders_before = game.renders;
        run_frames(&mut game_loop, &mut game, 10);
        // Frozen state keeps drawing
        assert_eq!(game.updates, updates_frozen);
        assert_eq!(game.renders, renders_before + 10);

        game_loop.resume();
        run_frames(&mut game_loop, &mut game, 10);
        assert!(game.updates > updates_frozen);
    }

    #[test]
    fn test_large_frame_gap_is_clamped() {
        let mut game_loop = GameLoop::new();
        let mut game = StubGame::new();
        game_loop.start();
        game_loop.frame(1000.0, &mut game);

        // Tab suspended for 10 seconds: at most MAX_SUBSTEPS updates, not 600
        game_loop.frame(11000.0, &mut game);
        assert!(game.updates <= 1 + MAX_SUBSTEPS);
    }

    #[test]
    fn test_update_can_request_game_over() {
        let mut game_loop = GameLoop::new();
        let mut game = StubGame::new();
        game_loop.start();
        game.request = Some(Phase::GameOver);
        run_frames(&mut game_loop, &mut game, 5);
        assert_eq!(game_loop.phase(), Phase::GameOver);
        let updates_after = game.updates;
        run_frames(&mut game_loop, &mut game, 5);
        assert_eq!(game.updates, updates_after);
    }

    #[test]
    fn test_transitions_only_through_methods() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.phase(), Phase::Menu);
        // pause/resume are no-ops outside their source phase
        game_loop.pause();
        assert_eq!(game_loop.phase(), Phase::Menu);
        game_loop.resume();
        assert_eq!(game_loop.phase(), Phase::Menu);

        game_loop.start();
        assert_eq!(game_loop.phase(), Phase::Playing);
        // start is ignored while playing
        game_loop.start();
        assert_eq!(game_loop.phase(), Phase::Playing);
        game_loop.end_game();
        assert_eq!(game_loop.phase(), Phase::GameOver);
        game_loop.start();
        assert_eq!(game_loop.phase(), Phase::Playing);
    }
}
