use crate::audio::AudioManager;
use crate::controls;
use crate::render::Renderer;
use chaser::config::PREPARATION_SECONDS;
use chaser::error::ConfigError;
use chaser::game::MatchLoop;
use chaser::input::{InputFrame, Intent};
use chaser::snapshot::{EndReason, MatchEvent, MatchResult, RenderSnapshot};
use chaser::MatchConfig;
use log::info;
use macroquad::prelude::*;

enum Next {
    Play,
    Exit,
}

/// Wall-clock time with paused spans cut out.
#[derive(Debug, Default)]
struct PauseClock {
    paused_total: f64,
    paused_at: Option<f64>,
}

impl PauseClock {
    fn now(&self, wall: f64) -> f64 {
        let frozen_wall = self.paused_at.unwrap_or(wall);
        frozen_wall - self.paused_total
    }

    fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    fn toggle(&mut self, wall: f64) {
        match self.paused_at.take() {
            Some(since) => self.paused_total += wall - since,
            None => self.paused_at = Some(wall),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PausedAction {
    Stay,
    Quit,
}

// Applies resume and mute from a paused frame; quit is left to the match
fn apply_paused_frame(frame: &InputFrame, clock: &mut PauseClock, audio: &mut AudioManager, wall: f64) -> PausedAction {
    for intent in frame.iter() {
        match intent {
            Intent::TogglePause => clock.toggle(wall),
            Intent::ToggleMute => audio.toggle_mute(),
            Intent::Quit => return PausedAction::Quit,
            Intent::Move { .. } => {}
        }
    }
    PausedAction::Stay
}

// Runs matches back to back until the player leaves
pub struct Session {
    config: MatchConfig,
    countdown: bool,
    renderer: Renderer,
    audio: AudioManager,
    round: u64,
}

impl Session {
    pub fn new(config: MatchConfig, countdown: bool, renderer: Renderer, audio: AudioManager) -> Self {
        Session {
            config,
            countdown,
            renderer,
            audio,
            round: 0,
        }
    }

    pub async fn run(&mut self) -> Result<(), ConfigError> {
        loop {
            if self.countdown {
                if let Next::Exit = self.prepare().await {
                    break;
                }
            }

            let (snapshot, result) = self.play().await?;
            if result.end_reason == EndReason::Quit {
                break;
            }
            if let Next::Exit = self.show_end(&snapshot, &result).await {
                break;
            }
        }
        info!("Exiting Chaser.");
        Ok(())
    }

    async fn prepare(&mut self) -> Next {
        let start = get_time();
        loop {
            if controls::quit_requested() {
                return Next::Exit;
            }
            let left = PREPARATION_SECONDS - (get_time() - start);
            if left <= 0.0 || controls::skip_requested() {
                return Next::Play;
            }
            self.renderer.draw_preparation(left, self.config.bot_enabled);
            next_frame().await;
        }
    }

    // Each round gets its own seed so replays differ but stay reproducible
    fn round_config(&self) -> MatchConfig {
        let mut config = self.config.clone();
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(self.round));
        config
    }

    async fn play(&mut self) -> Result<(RenderSnapshot, MatchResult), ConfigError> {
        let mut clock = PauseClock::default();
        let mut game = MatchLoop::new(self.round_config(), clock.now(get_time()))?;
        self.round += 1;
        self.audio.start_music();

        let outcome = loop {
            let wall = get_time();

            if clock.is_paused() {
                // The match is not ticked while paused, except to deliver a quit
                let frame = controls::read_paused_frame();
                if let PausedAction::Quit = apply_paused_frame(&frame, &mut clock, &mut self.audio, wall) {
                    let outcome = game.tick(clock.now(wall), &frame);
                    if let Some(result) = outcome.result {
                        break (outcome.snapshot, result);
                    }
                }
                self.renderer
                    .draw_match(&game.snapshot(clock.now(wall)), true, self.audio.is_muted());
                next_frame().await;
                continue;
            }

            let frame = controls::read_frame();
            let outcome = game.tick(clock.now(wall), &frame);
            self.audio.handle_events(&outcome.events);
            if outcome.events.contains(&MatchEvent::PauseToggled) {
                clock.toggle(wall);
            }

            if let Some(result) = outcome.result {
                break (outcome.snapshot, result);
            }
            self.renderer
                .draw_match(&outcome.snapshot, clock.is_paused(), self.audio.is_muted());
            next_frame().await;
        };

        self.audio.stop_music();
        Ok(outcome)
    }

    async fn show_end(&mut self, snapshot: &RenderSnapshot, result: &MatchResult) -> Next {
        loop {
            if controls::quit_requested() {
                return Next::Exit;
            }
            if controls::skip_requested() {
                // Let the Space press clear before the countdown reads it
                next_frame().await;
                return Next::Play;
            }
            self.renderer.draw_end(snapshot, result);
            next_frame().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_pause_clock_excludes_paused_time() {
        let mut clock = PauseClock::default();
        assert_approx_eq!(clock.now(5.0), 5.0);
        clock.toggle(5.0);
        assert!(clock.is_paused());
        assert_approx_eq!(clock.now(9.0), 5.0);
        clock.toggle(9.0);
        assert_approx_eq!(clock.now(10.0), 6.0);
    }

    #[test]
    fn test_paused_frame_resumes_and_mutes() {
        let mut clock = PauseClock::default();
        clock.toggle(2.0);
        let mut audio = AudioManager::new();

        let frame = InputFrame::new().with(Intent::ToggleMute).with(Intent::TogglePause);
        assert_eq!(apply_paused_frame(&frame, &mut clock, &mut audio, 7.0), PausedAction::Stay);
        assert!(audio.is_muted());
        assert!(!clock.is_paused());
        assert_approx_eq!(clock.now(8.0), 3.0);
    }

    #[test]
    fn test_paused_frame_quit() {
        let mut clock = PauseClock::default();
        clock.toggle(1.0);
        let mut audio = AudioManager::new();
        let frame = InputFrame::new().with(Intent::Quit);
        assert_eq!(apply_paused_frame(&frame, &mut clock, &mut audio, 4.0), PausedAction::Quit);
        assert!(clock.is_paused());
    }
}
