use chaser::config::{EFFECT_VOLUME, MUSIC_VOLUME};
use chaser::snapshot::MatchEvent;
use log::{info, warn};
use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound, set_sound_volume, stop_sound};

const MUSIC_PATH: &str = "assets/music.ogg";
const POP_PATH: &str = "assets/pop.ogg";

#[derive(Default)]
pub struct AudioManager {
    music: Option<Sound>,
    pop: Option<Sound>,
    muted: bool,
    music_playing: bool,
}

async fn load_optional(path: &str, what: &str) -> Option<Sound> {
    load_sound(path)
        .await
        .map_err(|e| {
            warn!("Failed to load {} '{}': {}", what, path, e);
            e
        })
        .ok()
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    // Missing files leave the slot empty and playback becomes a no-op
    pub async fn load_assets(&mut self) {
        self.music = load_optional(MUSIC_PATH, "music").await;
        self.pop = load_optional(POP_PATH, "pop sound").await;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn start_music(&mut self) {
        if let Some(ref music) = self.music {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume: self.music_volume(),
                },
            );
            self.music_playing = true;
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(ref music) = self.music {
            stop_sound(music);
        }
        self.music_playing = false;
    }

    pub fn play_pop(&self) {
        if self.muted {
            return;
        }
        if let Some(ref pop) = self.pop {
            play_sound(
                pop,
                PlaySoundParams {
                    looped: false,
                    volume: EFFECT_VOLUME,
                },
            );
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        if let (Some(music), true) = (&self.music, self.music_playing) {
            set_sound_volume(music, self.music_volume());
        }
    }

    /// Reacts to the audible events of one tick.
    pub fn handle_events(&mut self, events: &[MatchEvent]) {
        for event in events {
            match event {
                MatchEvent::FoodEaten { .. } => self.play_pop(),
                MatchEvent::MuteToggled => self.toggle_mute(),
                _ => {}
            }
        }
    }

    fn music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { MUSIC_VOLUME }
    }
}
